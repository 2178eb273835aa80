//! Application state and sub-state extractors.
//!
//! Clip handlers extract the whole [`AppState`]. The health check only needs the
//! stores and extracts [`ClipStore`] through `FromRef`.

use axum::extract::FromRef;
use clipvault_core::{ClipUrls, Config};
use clipvault_db::ClipRepository;
use clipvault_storage::BlobStore;
use std::sync::Arc;

/// Metadata repository and blob store backing the clip routes.
#[derive(Clone)]
pub struct ClipStore {
    pub repository: ClipRepository,
    pub blobs: Arc<dyn BlobStore>,
}

/// Upload acceptance rules.
#[derive(Clone, Debug)]
pub struct UploadLimits {
    pub max_file_size: u64,
    pub allowed_extensions: Vec<String>,
}

impl UploadLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_file_size: config.max_upload_size_bytes,
            allowed_extensions: config.allowed_extensions.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub clips: ClipStore,
    pub limits: UploadLimits,
    pub urls: ClipUrls,
}

impl AppState {
    pub fn new(config: &Config, repository: ClipRepository, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            config: config.clone(),
            clips: ClipStore { repository, blobs },
            limits: UploadLimits::from_config(config),
            urls: ClipUrls::new(&config.base_url),
        }
    }
}

impl FromRef<Arc<AppState>> for ClipStore {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.clips.clone()
    }
}
