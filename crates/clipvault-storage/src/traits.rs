//! Blob store abstraction
//!
//! This module defines the BlobStore trait that every blob backend implements.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid blob name: {0}")]
    InvalidKey(String),

    #[error("Upload exceeds maximum size of {max} bytes")]
    TooLarge { max: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Outcome of a successful [`BlobStore::put`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub clip_id: String,
    /// `{clip_id}{extension}`
    pub filename: String,
    pub size: u64,
    /// Truncated SHA-256 of the stored bytes
    pub hash: String,
}

/// Chunked byte stream of a stored blob
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// An opened blob ready to be streamed to a client.
pub struct BlobStream {
    pub size: u64,
    pub stream: ByteStream,
}

/// Blob store abstraction
///
/// Blobs are addressed by their flat filename (`{clip_id}{extension}`). Reads and
/// writes are streamed so clips are never held in memory whole.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the reader's content under a freshly generated clip id.
    ///
    /// The reader is consumed until EOF. If it yields more than `max_size` bytes the
    /// partial blob is removed and [`StorageError::TooLarge`] is returned.
    async fn put(
        &self,
        extension: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
        max_size: u64,
    ) -> StorageResult<StoredBlob>;

    /// Open a blob for streaming. Returns [`StorageError::NotFound`] if it is absent.
    async fn open(&self, filename: &str) -> StorageResult<BlobStream>;

    /// Remove a blob. Deleting an absent blob succeeds.
    async fn delete(&self, filename: &str) -> StorageResult<()>;

    /// Check if a blob exists
    async fn exists(&self, filename: &str) -> StorageResult<bool>;

    /// Verify the backend is usable (directory present and writable).
    async fn health_check(&self) -> StorageResult<()>;
}
