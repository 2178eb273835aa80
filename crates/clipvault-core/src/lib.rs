//! ClipVault Core Library
//!
//! This crate provides the domain models, error types, configuration and upload
//! validation shared by the storage, metadata and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    ClipRecord, ClipUrls, DeleteResponse, MetadataDocument, ServiceInfo, UploadResponse,
};
