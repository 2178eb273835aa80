//! Multipart helpers for the upload handler

use axum::extract::multipart::Field;
use futures::TryStreamExt;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;

/// Name of the multipart field carrying the clip.
pub const FILE_FIELD: &str = "file";

/// Adapt a multipart field into a reader so its bytes can be streamed to the blob store.
pub fn field_reader<'a>(field: Field<'a>) -> impl AsyncRead + Send + Unpin + 'a {
    StreamReader::new(field.map_err(std::io::Error::other))
}

/// Whether a field is the file part. A field named `file` without a filename is a plain
/// form value, not an upload.
pub fn is_file_part(field: &Field<'_>) -> bool {
    field.name() == Some(FILE_FIELD) && field.file_name().is_some()
}
