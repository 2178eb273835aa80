//! Metadata and blob store setup

use anyhow::{Context, Result};
use clipvault_core::Config;
use clipvault_db::ClipRepository;
use clipvault_storage::{BlobStore, LocalBlobStore};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<(ClipRepository, Arc<dyn BlobStore>)> {
    let repository = ClipRepository::open(&config.metadata_file)
        .await
        .with_context(|| format!("Failed to open metadata file {}", config.metadata_file))?;

    let blobs = LocalBlobStore::new(&config.upload_folder)
        .await
        .with_context(|| format!("Failed to prepare upload folder {}", config.upload_folder))?;

    tracing::info!(
        metadata_file = %repository.path().display(),
        upload_folder = %blobs.base_path().display(),
        clip_count = repository.list().await.len(),
        "Clip storage initialized"
    );

    Ok((repository, Arc::new(blobs)))
}
