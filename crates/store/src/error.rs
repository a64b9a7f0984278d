use thiserror::Error;

/// Errors surfaced by the vector index store and tenant registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A vector's length does not match the collection's dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// A collection was addressed by a tenant that does not own it.
    #[error("collection {collection} does not belong to tenant {tenant}")]
    TenantMismatch { collection: String, tenant: String },
    /// The tenant identifier failed validation.
    #[error("invalid tenant id: {0}")]
    InvalidTenant(String),
    /// No collection with this name exists.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),
    /// A lock guarding collection state was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    Lock(String),
}

impl StoreError {
    pub(crate) fn poisoned() -> Self {
        StoreError::Lock("collection lock poisoned".into())
    }
}
