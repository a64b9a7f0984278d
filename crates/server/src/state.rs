use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::limit::{FixedWindowLimiter, RateLimiter};
use embedder::Embedder;
use metastore::MetaStore;
use std::sync::Arc;
use store::{CollectionRegistry, VectorStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Embedding provider adapter (shared across requests)
    pub embedder: Arc<Embedder>,

    /// Tenant collection registry over the vector index store
    pub registry: CollectionRegistry,

    /// Metadata projection of every stored embedding
    pub metastore: Arc<MetaStore>,

    /// Request-rate gate, keyed by caller identity and route
    pub limiter: Arc<dyn RateLimiter>,
}

impl AppState {
    /// Create new application state with the default fixed-window limiter
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        Self::with_limiter(config, Arc::new(FixedWindowLimiter::new()))
    }

    /// Create application state with an injected rate limiter
    pub fn with_limiter(
        config: ServerConfig,
        limiter: Arc<dyn RateLimiter>,
    ) -> ServerResult<Self> {
        let embedder = Arc::new(Embedder::new(config.embedder_config())?);
        let registry = CollectionRegistry::new(Arc::new(VectorStore::new()));
        Ok(Self {
            config: Arc::new(config),
            embedder,
            registry,
            metastore: Arc::new(MetaStore::new()),
            limiter,
        })
    }
}
