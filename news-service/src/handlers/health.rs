use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

/// Liveness of the service as seen through its store.
///
/// Any failure to reach the store is reported the same way: 503 unhealthy.
#[tracing::instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.feed.ping().await {
        Ok(()) => {
            metrics::counter!("news_health_checks_total", "status" => "ok").increment(1);
            (StatusCode::OK, Json(json!({ "status": "ok" })))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            metrics::counter!("news_health_checks_total", "status" => "unhealthy").increment(1);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy" })),
            )
        }
    }
}
