use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::state::AppState;

/// `GET /health`, liveness only.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// `GET /health/assistant`, one live round-trip to the model.
pub async fn assistant_health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.assistant.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "model": state.assistant.model(),
            })),
        ),
        Err(e) => {
            tracing::warn!("⚠️ [HEALTH] assistant unreachable: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "error": e.to_string(),
                })),
            )
        }
    }
}
