//! ClipVault Storage Library
//!
//! This crate provides the blob store abstraction and its local filesystem
//! implementation.
//!
//! # Blob naming
//!
//! Every clip is stored as a single flat file named `{clip_id}{extension}`
//! (for example `3f9a0c1e.mp4`) directly inside the upload directory. Filenames
//! never contain path separators or `..`; name generation lives in the `keys`
//! module so the layout stays consistent.

pub mod digest;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalBlobStore;
pub use traits::{BlobStore, BlobStream, StorageError, StorageResult, StoredBlob};
