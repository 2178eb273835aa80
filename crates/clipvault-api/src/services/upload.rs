//! Clip upload service
//!
//! Drives one upload through the pipeline: find the file part, validate its name,
//! stream it into the blob store, then persist the metadata record.

use std::sync::Arc;

use axum::extract::Multipart;
use chrono::Utc;
use clipvault_core::validation::validate_clip_filename;
use clipvault_core::{AppError, ClipRecord};

use crate::error::{multipart_to_app_error, storage_to_app_error};
use crate::state::AppState;
use crate::utils::upload::{field_reader, is_file_part};

pub struct ClipUploadService {
    state: Arc<AppState>,
}

impl ClipUploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Store the first file part of `multipart` and record it.
    ///
    /// Nothing touches the disk until the filename passed validation. If the record
    /// cannot be persisted the blob is removed again so no orphan is left behind.
    pub async fn upload(&self, mut multipart: Multipart) -> Result<ClipRecord, AppError> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(multipart_to_app_error)?
        {
            if !is_file_part(&field) {
                continue;
            }

            let original_filename = field.file_name().unwrap_or_default().to_string();
            let extension = validate_clip_filename(
                Some(original_filename.as_str()),
                &self.state.limits.allowed_extensions,
            )?;

            let mut reader = field_reader(field);
            let stored = self
                .state
                .clips
                .blobs
                .put(&extension, &mut reader, self.state.limits.max_file_size)
                .await
                .map_err(storage_to_app_error)?;

            let record = ClipRecord {
                url: self.state.urls.download_url(&stored.clip_id),
                clip_id: stored.clip_id,
                filename: stored.filename,
                original_filename,
                upload_time: Utc::now(),
                file_size: stored.size,
                file_hash: stored.hash,
            };

            if let Err(e) = self.state.clips.repository.insert(record.clone()).await {
                self.discard_blob(&record.filename).await;
                return Err(e);
            }

            tracing::info!(
                clip_id = %record.clip_id,
                original_filename = %record.original_filename,
                size_bytes = record.file_size,
                file_hash = %record.file_hash,
                "Clip uploaded"
            );

            return Ok(record);
        }

        Err(AppError::InvalidInput("No file provided".to_string()))
    }

    async fn discard_blob(&self, filename: &str) {
        if let Err(e) = self.state.clips.blobs.delete(filename).await {
            tracing::error!(
                filename = %filename,
                error = %e,
                "Failed to remove blob after metadata write failed"
            );
        }
    }
}
