//! simvec embedding provider adapter
//!
//! Turns text into fixed-length vectors through a closed catalog of models.
//! Two backends exist:
//!
//! - **Remote** - OpenAI-style HTTP endpoint. Metered, so batch calls are
//!   chunked at [`REMOTE_CHUNK_SIZE`] inputs and carry a request timeout.
//! - **Local** - deterministic in-process feature hashing. No network, no
//!   batch limit. Useful for tests and offline deployments.
//!
//! Model selection is by exact name against the catalog; unknown names fall
//! back to the default model deterministically (never to a prefix match).
//! Every produced vector is length-checked against the model's declared
//! dimension before it is handed to callers, so a misbehaving provider fails
//! fast instead of poisoning the index downstream.
//!
//! ```no_run
//! use embedder::{Embedder, EmbedderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), embedder::EmbedderError> {
//!     let embedder = Embedder::new(EmbedderConfig::default())?;
//!     let vector = embedder.embed("some text", Some("all-MiniLM-L6-v2")).await?;
//!     assert_eq!(vector.len(), 384);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;

mod local;
mod remote;

pub use crate::catalog::{ModelBackend, ModelCatalog, ModelDescriptor, DEFAULT_MODEL};
pub use crate::config::EmbedderConfig;
pub use crate::error::EmbedderError;
pub use crate::remote::REMOTE_CHUNK_SIZE;

use crate::local::hashed_embedding;
use crate::remote::embed_remote_chunk;

/// Embedding provider adapter over the model catalog.
pub struct Embedder {
    cfg: EmbedderConfig,
    catalog: ModelCatalog,
    client: reqwest::Client,
}

impl Embedder {
    /// Build an embedder with the built-in model catalog.
    pub fn new(cfg: EmbedderConfig) -> Result<Self, EmbedderError> {
        let client = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| EmbedderError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            cfg,
            catalog: ModelCatalog::builtin(),
            client,
        })
    }

    /// The model catalog backing this embedder.
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Fixed output dimension for `model` (default model when `None`/unknown).
    pub fn dimension(&self, model: Option<&str>) -> usize {
        self.catalog.resolve(model).dimension
    }

    /// Embed one text. `model` selects a catalog entry by name.
    pub async fn embed(&self, text: &str, model: Option<&str>) -> Result<Vec<f32>, EmbedderError> {
        let mut vectors = self.embed_batch(&[text.to_string()], model).await?;
        vectors.pop().ok_or_else(|| EmbedderError::Provider {
            chunk: 0,
            message: "provider returned no embedding for a single input".into(),
        })
    }

    /// Embed many texts, preserving input order. The whole batch either
    /// succeeds or fails with an error naming the failing chunk; partial
    /// results are never returned.
    pub async fn embed_batch(
        &self,
        texts: &[String],
        model: Option<&str>,
    ) -> Result<Vec<Vec<f32>>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let descriptor = self.catalog.resolve(model).clone();
        let vectors = match descriptor.backend {
            ModelBackend::Local => texts
                .iter()
                .map(|text| hashed_embedding(text, descriptor.dimension))
                .collect(),
            ModelBackend::Remote => {
                let mut all = Vec::with_capacity(texts.len());
                for (chunk_index, chunk) in texts.chunks(REMOTE_CHUNK_SIZE).enumerate() {
                    let batch = embed_remote_chunk(
                        &self.client,
                        &self.cfg,
                        &descriptor.name,
                        chunk,
                        chunk_index,
                    )
                    .await?;
                    all.extend(batch);
                }
                all
            }
        };

        for vector in &vectors {
            if vector.len() != descriptor.dimension {
                return Err(EmbedderError::DimensionMismatch {
                    model: descriptor.name.clone(),
                    expected: descriptor.dimension,
                    actual: vector.len(),
                });
            }
        }
        Ok(vectors)
    }
}
