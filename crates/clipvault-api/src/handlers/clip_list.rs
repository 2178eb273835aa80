use crate::state::AppState;
use axum::{extract::State, Json};
use clipvault_core::MetadataDocument;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/clips",
    tag = "clips",
    responses(
        (status = 200, description = "Every clip record in upload order", body = MetadataDocument)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_clips"))]
pub async fn list_clips(State(state): State<Arc<AppState>>) -> Json<MetadataDocument> {
    let document = state.clips.repository.list().await;
    tracing::debug!(clip_count = document.len(), "Listing clips");
    Json(document)
}
