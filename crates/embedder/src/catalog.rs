use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Which kind of backend produces vectors for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelBackend {
    /// Metered HTTP provider; calls are chunked to respect batch limits.
    Remote,
    /// In-process deterministic model; no network, no batch limit.
    Local,
}

/// Static description of an embedding model. Defined at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Model name as accepted in API requests.
    pub name: String,
    /// Backend that serves this model.
    pub backend: ModelBackend,
    /// Fixed output dimension. Every produced vector is checked against this.
    pub dimension: usize,
}

impl ModelDescriptor {
    fn new(name: &str, backend: ModelBackend, dimension: usize) -> Self {
        Self {
            name: name.to_string(),
            backend,
            dimension,
        }
    }
}

/// Model used when a request names no model, or names one we don't know.
pub const DEFAULT_MODEL: &str = "text-embedding-ada-002";

static BUILTIN_MODELS: Lazy<Vec<ModelDescriptor>> = Lazy::new(|| {
    vec![
        ModelDescriptor::new("text-embedding-ada-002", ModelBackend::Remote, 1536),
        ModelDescriptor::new("text-embedding-3-small", ModelBackend::Remote, 1536),
        ModelDescriptor::new("text-embedding-3-large", ModelBackend::Remote, 3072),
        ModelDescriptor::new("all-MiniLM-L6-v2", ModelBackend::Local, 384),
        ModelDescriptor::new("all-mpnet-base-v2", ModelBackend::Local, 768),
    ]
});

/// Closed set of embedding models, resolved once at configuration time.
///
/// Resolution is by exact name. Unknown names fall back to [`DEFAULT_MODEL`]
/// deterministically rather than being routed by name prefix.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
}

impl ModelCatalog {
    /// The built-in catalog: three remote OpenAI-style models and two local ones.
    pub fn builtin() -> Self {
        Self {
            models: BUILTIN_MODELS.clone(),
        }
    }

    /// Resolve a model name to its descriptor. `None` or an unknown name
    /// resolves to the default descriptor.
    pub fn resolve(&self, name: Option<&str>) -> &ModelDescriptor {
        let wanted = name.unwrap_or(DEFAULT_MODEL);
        self.models
            .iter()
            .find(|m| m.name == wanted)
            .unwrap_or_else(|| self.default_descriptor())
    }

    /// Descriptor for [`DEFAULT_MODEL`].
    pub fn default_descriptor(&self) -> &ModelDescriptor {
        self.models
            .iter()
            .find(|m| m.name == DEFAULT_MODEL)
            .expect("default model is always present in the builtin catalog")
    }

    /// All known descriptors.
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_known_remote_model() {
        let catalog = ModelCatalog::builtin();
        let model = catalog.resolve(Some("text-embedding-3-large"));
        assert_eq!(model.name, "text-embedding-3-large");
        assert_eq!(model.backend, ModelBackend::Remote);
        assert_eq!(model.dimension, 3072);
    }

    #[test]
    fn resolve_known_local_model() {
        let catalog = ModelCatalog::builtin();
        let model = catalog.resolve(Some("all-MiniLM-L6-v2"));
        assert_eq!(model.backend, ModelBackend::Local);
        assert_eq!(model.dimension, 384);
    }

    #[test]
    fn resolve_none_uses_default() {
        let catalog = ModelCatalog::builtin();
        assert_eq!(catalog.resolve(None).name, DEFAULT_MODEL);
    }

    #[test]
    fn resolve_unknown_falls_back_to_default_deterministically() {
        let catalog = ModelCatalog::builtin();
        let a = catalog.resolve(Some("gpt-4o-embeddings"));
        let b = catalog.resolve(Some("some-future-model"));
        assert_eq!(a.name, DEFAULT_MODEL);
        assert_eq!(b.name, DEFAULT_MODEL);
    }

    #[test]
    fn catalog_lists_all_builtin_models() {
        let catalog = ModelCatalog::builtin();
        assert_eq!(catalog.models().len(), 5);
    }
}
