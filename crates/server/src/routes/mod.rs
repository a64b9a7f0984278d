//! API route handlers
//!
//! All HTTP endpoint implementations for the simvec server, organized by
//! resource:
//!
//! - `health`: liveness check
//! - `embeddings`: embed-and-store ingestion
//! - `search`: similarity search and direct text comparison
//! - `documents`: per-document listing and deletion
//! - `users`: per-tenant listing, pagination, and stats
//! - `collections`: collection listing and teardown

pub mod collections;
pub mod documents;
pub mod embeddings;
pub mod health;
pub mod search;
pub mod users;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// RFC 3339 timestamp stamped onto every success envelope.
pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Pull a required string field out of a request body, rejecting absent or
/// blank values with a 400 naming the field.
pub(crate) fn require<'a>(field: &'a Option<String>, name: &str) -> ServerResult<&'a str> {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ServerError::Validation(format!(
            "missing required field: {name}"
        ))),
    }
}

/// API version and base info
///
/// Root endpoint (GET /), never rate limited.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "simvec",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/embeddings",
            "/search",
            "/similarity",
            "/documents/{documentId}/embeddings",
            "/users/{userId}/embeddings",
            "/users/{userId}/stats",
            "/collections",
            "/health"
        ]
    })))
}

/// 404 Not Found handler for undefined routes
pub async fn not_found() -> ServerError {
    ServerError::NotFound("route not found".to_string())
}
