use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime configuration for the remote embedding backend.
///
/// Local models need none of this; a default config is enough to embed with
/// the local catalog entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedderConfig {
    /// Remote embedding endpoint (OpenAI-style `/v1/embeddings`). Required
    /// only when a remote model is actually used.
    pub api_url: Option<String>,
    /// Bearer token for the remote endpoint.
    pub api_key: Option<String>,
    /// Overall request timeout in seconds for remote calls.
    pub timeout_secs: u64,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl EmbedderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_remote_endpoint() {
        let cfg = EmbedderConfig::default();
        assert!(cfg.api_url.is_none());
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[test]
    fn timeout_converts_to_duration() {
        let cfg = EmbedderConfig {
            timeout_secs: 5,
            ..Default::default()
        };
        assert_eq!(cfg.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = EmbedderConfig {
            api_url: Some("https://api.example.com/v1/embeddings".into()),
            api_key: Some("sk-test".into()),
            timeout_secs: 10,
        };
        let serialized = serde_json::to_string(&cfg).unwrap();
        let deserialized: EmbedderConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(cfg, deserialized);
    }
}
