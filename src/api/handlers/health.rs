//! Health check handler

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::helpers::blocking;
use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health
///
/// Returns 200 with row counts if the store answers, 503 otherwise.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage = state.storage.clone();

    match blocking(move || storage.stats()).await {
        Ok(stats) => Ok(Json(HealthResponse {
            status: "healthy".to_string(),
            stats: Some(stats),
            error: None,
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    stats: None,
                    error: Some(e.to_string()),
                }),
            ))
        }
    }
}
