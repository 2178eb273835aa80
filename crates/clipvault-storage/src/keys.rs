//! Clip identifier and blob filename generation.

use clipvault_core::constants::CLIP_ID_LEN;
use uuid::Uuid;

/// Generate a fresh clip identifier: the leading hex characters of a random UUID v4.
///
/// Uniqueness is not checked here; callers create blobs with create-new semantics
/// and the metadata store rejects duplicate ids on insert.
pub fn generate_clip_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(CLIP_ID_LEN);
    id
}

/// Stored blob name for a clip: `{clip_id}{extension}`.
pub fn blob_filename(clip_id: &str, extension: &str) -> String {
    format!("{}{}", clip_id, extension)
}

pub use clipvault_core::validation::is_valid_extension;
