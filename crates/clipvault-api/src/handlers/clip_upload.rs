use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::ClipUploadService;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use clipvault_core::UploadResponse;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/upload",
    tag = "clips",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Clip uploaded successfully", body = UploadResponse),
        (status = 400, description = "Missing file part, empty filename or disallowed extension", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_clip"))]
pub async fn upload_clip(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let multipart = multipart?;

    let record = ClipUploadService::new(&state).upload(multipart).await?;

    Ok(Json(UploadResponse::new(&record.clip_id, &state.urls)))
}
