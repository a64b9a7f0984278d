use thiserror::Error;

/// Errors surfaced by the metadata projection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetaStoreError {
    /// The projection lock was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    Lock(String),
}

impl MetaStoreError {
    pub(crate) fn poisoned() -> Self {
        MetaStoreError::Lock("metadata projection lock poisoned".into())
    }
}
