use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One uploaded clip as persisted in the metadata document.
///
/// Records are immutable once written; they only leave the document on delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClipRecord {
    /// Short identifier used as the external reference key
    pub clip_id: String,
    /// Stored blob name: `clip_id` + lower-cased original extension
    pub filename: String,
    /// Client-supplied name, kept verbatim for display only
    pub original_filename: String,
    pub upload_time: DateTime<Utc>,
    /// Size of the stored blob in bytes
    pub file_size: u64,
    /// First 16 hex characters of the SHA-256 of the blob
    pub file_hash: String,
    /// Absolute download URL
    pub url: String,
}

/// The full metadata document: every known clip in upload order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct MetadataDocument {
    pub clips: Vec<ClipRecord>,
}

impl MetadataDocument {
    /// First record with the given id, by linear scan.
    pub fn find(&self, clip_id: &str) -> Option<&ClipRecord> {
        self.clips.iter().find(|c| c.clip_id == clip_id)
    }

    pub fn contains(&self, clip_id: &str) -> bool {
        self.find(clip_id).is_some()
    }

    pub fn push(&mut self, record: ClipRecord) {
        self.clips.push(record);
    }

    /// Remove every record carrying `clip_id`, returning the first one removed.
    pub fn remove(&mut self, clip_id: &str) -> Option<ClipRecord> {
        let position = self.clips.iter().position(|c| c.clip_id == clip_id)?;
        let removed = self.clips.remove(position);
        self.clips.retain(|c| c.clip_id != clip_id);
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Builds the absolute links handed out for a clip.
#[derive(Debug, Clone)]
pub struct ClipUrls {
    base_url: String,
}

impl ClipUrls {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Direct download link, `{base}/clips/{id}`.
    pub fn download_url(&self, clip_id: &str) -> String {
        format!("{}/clips/{}", self.base_url, clip_id)
    }

    /// Viewer link, `{base}/view/{id}`.
    pub fn view_url(&self, clip_id: &str) -> String {
        format!("{}/view/{}", self.base_url, clip_id)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub clip_id: String,
    /// Viewer link
    pub url: String,
    pub download_url: String,
    pub message: String,
}

impl UploadResponse {
    pub fn new(clip_id: &str, urls: &ClipUrls) -> Self {
        Self {
            success: true,
            clip_id: clip_id.to_string(),
            url: urls.view_url(clip_id),
            download_url: urls.download_url(clip_id),
            message: "Clip uploaded successfully".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted(clip_id: &str) -> Self {
        Self {
            success: true,
            message: format!("Clip {} deleted", clip_id),
        }
    }
}
