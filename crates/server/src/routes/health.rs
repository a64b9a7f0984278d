use crate::routes::timestamp;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "status": "healthy",
        "service": "simvec-server",
        "timestamp": timestamp(),
    }))
}
