use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use clipvault_core::validation::{content_type_for_extension, file_extension};
use clipvault_core::AppError;
use clipvault_storage::StorageError;
use futures::StreamExt;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/clips/{clip_id}",
    tag = "clips",
    params(
        ("clip_id" = String, Path, description = "Clip ID")
    ),
    responses(
        (status = 200, description = "Clip bytes", content_type = "video/mp4"),
        (status = 404, description = "Clip or its file not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(clip_id = %clip_id, operation = "download_clip"))]
pub async fn download_clip(
    State(state): State<Arc<AppState>>,
    Path(clip_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state
        .clips
        .repository
        .find(&clip_id)
        .await
        .ok_or_else(|| AppError::NotFound("Clip not found".to_string()))?;

    let blob = match state.clips.blobs.open(&record.filename).await {
        Ok(blob) => blob,
        Err(StorageError::NotFound(_)) => {
            tracing::warn!(
                clip_id = %clip_id,
                filename = %record.filename,
                "Clip record exists but its file is missing"
            );
            return Err(AppError::NotFound("File not found on server".to_string()).into());
        }
        Err(e) => return Err(e.into()),
    };

    let extension = file_extension(&record.filename).unwrap_or_default();
    let content_type = content_type_for_extension(&extension);

    // Wrap storage stream for axum Body
    let body_stream = blob.stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let content_disposition = format!("inline; filename=\"{}\"", record.filename);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, blob.size)
        .header(header::CONTENT_DISPOSITION, content_disposition.as_str())
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
