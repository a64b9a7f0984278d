use thiserror::Error;

/// Errors surfaced by [`Embedder`](crate::Embedder) operations.
#[derive(Debug, Error)]
pub enum EmbedderError {
    /// Configuration is inconsistent (e.g., a remote model is selected but no API URL is set).
    #[error("invalid embedder config: {0}")]
    InvalidConfig(String),
    /// The upstream embedding provider rejected or failed a request. For batch
    /// calls `chunk` names the zero-based chunk that failed.
    #[error("provider request failed (chunk {chunk}): {message}")]
    Provider { chunk: usize, message: String },
    /// The upstream embedding provider did not answer within the configured timeout.
    #[error("provider timed out: {0}")]
    ProviderTimeout(String),
    /// A produced vector does not match the model's declared dimension.
    #[error("dimension mismatch for model {model}: expected {expected}, got {actual}")]
    DimensionMismatch {
        model: String,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_names_failing_chunk() {
        let err = EmbedderError::Provider {
            chunk: 3,
            message: "HTTP 500".into(),
        };
        assert!(err.to_string().contains("chunk 3"));
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn timeout_error_display() {
        let err = EmbedderError::ProviderTimeout("request elapsed 30s".into());
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn dimension_mismatch_display() {
        let err = EmbedderError::DimensionMismatch {
            model: "text-embedding-ada-002".into(),
            expected: 1536,
            actual: 384,
        };
        let msg = err.to_string();
        assert!(msg.contains("text-embedding-ada-002"));
        assert!(msg.contains("1536"));
        assert!(msg.contains("384"));
    }
}
