//! Domain models for clips and the metadata document.

pub mod clip;
pub mod service;

pub use clip::{ClipRecord, ClipUrls, DeleteResponse, MetadataDocument, UploadResponse};
pub use service::ServiceInfo;
