use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use clipvault_core::{AppError, DeleteResponse};
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/delete/{clip_id}",
    tag = "clips",
    params(
        ("clip_id" = String, Path, description = "Clip ID")
    ),
    responses(
        (status = 200, description = "Clip deleted", body = DeleteResponse),
        (status = 404, description = "Clip not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(clip_id = %clip_id, operation = "delete_clip"))]
pub async fn delete_clip(
    State(state): State<Arc<AppState>>,
    Path(clip_id): Path<String>,
) -> Result<Json<DeleteResponse>, HttpAppError> {
    let record = state
        .clips
        .repository
        .find(&clip_id)
        .await
        .ok_or_else(|| AppError::NotFound("Clip not found".to_string()))?;

    // Blob first: a record without a blob is recoverable, a blob without a record is not.
    state.clips.blobs.delete(&record.filename).await?;
    state.clips.repository.remove(&clip_id).await?;

    tracing::info!(clip_id = %clip_id, filename = %record.filename, "Clip deleted");

    Ok(Json(DeleteResponse::deleted(&clip_id)))
}
