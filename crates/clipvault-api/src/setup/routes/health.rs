//! Health check handlers and response types.

use crate::state::ClipStore;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Run an async check with timeout; returns "healthy", "unhealthy" or "timeout".
/// Failure details are logged, never returned.
async fn run_check<F, E>(name: &str, f: F) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(TIMEOUT, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => {
            tracing::error!(check = name, error = %e, "Health check failed");
            "unhealthy".to_string()
        }
        Err(_) => {
            tracing::error!(check = name, "Health check timed out");
            "timeout".to_string()
        }
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub metadata: String,
    pub storage: String,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Metadata document parses and the upload folder is writable.
pub async fn health_check(State(clips): State<ClipStore>) -> impl IntoResponse {
    let ClipStore { repository, blobs } = clips;

    let metadata = run_check("metadata", repository.health_check()).await;
    let storage = run_check("storage", blobs.health_check()).await;

    let healthy = metadata == "healthy" && storage == "healthy";
    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        metadata,
        storage,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
