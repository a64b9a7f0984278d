use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use embedder::EmbedderError;
use metastore::MetaStoreError;
use serde_json::json;
use store::StoreError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
///
/// The HTTP layer is the only place typed errors from the lower crates
/// become status codes; handlers propagate with `?` and the `#[from]`
/// conversions below.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Embedding error: {0}")]
    Embedder(#[from] EmbedderError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Metadata error: {0}")]
    Meta(#[from] MetaStoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ServerError::Embedder(err) => match err {
                EmbedderError::Provider { .. } => StatusCode::BAD_GATEWAY,
                EmbedderError::ProviderTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
                EmbedderError::DimensionMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                EmbedderError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Store(err) => match err {
                StoreError::TenantMismatch { .. } => StatusCode::FORBIDDEN,
                StoreError::InvalidTenant(_) => StatusCode::BAD_REQUEST,
                StoreError::CollectionNotFound(_) => StatusCode::NOT_FOUND,
                StoreError::DimensionMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::Lock(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Meta(_) | ServerError::Config(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::Validation(_) => "VALIDATION_ERROR",
            ServerError::NotFound(_) => "NOT_FOUND",
            ServerError::RateLimited => "RATE_LIMIT_EXCEEDED",
            ServerError::Embedder(err) => match err {
                EmbedderError::Provider { .. } => "PROVIDER_ERROR",
                EmbedderError::ProviderTimeout(_) => "PROVIDER_TIMEOUT",
                EmbedderError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
                EmbedderError::InvalidConfig(_) => "CONFIG_ERROR",
            },
            ServerError::Store(err) => match err {
                StoreError::TenantMismatch { .. } => "TENANT_MISMATCH",
                StoreError::InvalidTenant(_) => "INVALID_TENANT",
                StoreError::CollectionNotFound(_) => "COLLECTION_NOT_FOUND",
                StoreError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
                StoreError::Lock(_) => "INTERNAL_ERROR",
            },
            ServerError::Meta(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, code = error_code, %message, "request failed");
        } else {
            tracing::warn!(status = %status, code = error_code, %message, "request rejected");
        }

        let body = Json(json!({
            "error": error_code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}
