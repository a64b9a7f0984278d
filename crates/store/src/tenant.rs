use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::collection::Collection;
use crate::error::StoreError;
use crate::VectorStore;

const MAX_TENANT_LEN: usize = 64;

/// A validated tenant identifier.
///
/// Construction is the only place validation happens; once a `TenantId`
/// exists it is known to be non-empty, at most 64 characters, and drawn
/// from `[A-Za-z0-9_-]`. Collection ownership is derived structurally from
/// this id rather than re-parsed out of collection names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(raw: impl Into<String>) -> Result<Self, StoreError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(StoreError::InvalidTenant("tenant id is empty".into()));
        }
        if raw.len() > MAX_TENANT_LEN {
            return Err(StoreError::InvalidTenant(format!(
                "tenant id exceeds {MAX_TENANT_LEN} characters"
            )));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(StoreError::InvalidTenant(format!(
                "tenant id contains characters outside [A-Za-z0-9_-]: {raw}"
            )));
        }
        Ok(TenantId(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical collection name for this tenant.
    pub fn collection_name(&self) -> String {
        format!("user_{}", self.0)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps tenants to their collections and enforces ownership on every access.
#[derive(Clone)]
pub struct CollectionRegistry {
    store: Arc<VectorStore>,
}

impl CollectionRegistry {
    pub fn new(store: Arc<VectorStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<VectorStore> {
        &self.store
    }

    /// Open the tenant's collection, creating it at `dimension` on first use.
    /// The dimension is fixed at creation; later callers get the existing
    /// collection regardless of the dimension they pass.
    pub fn resolve(&self, tenant: &TenantId, dimension: usize) -> Arc<Collection> {
        let name = tenant.collection_name();
        self.store
            .open_or_create(&name, tenant.as_str(), dimension)
    }

    /// The tenant's collection if it already exists.
    pub fn get(&self, tenant: &TenantId) -> Option<Arc<Collection>> {
        self.store.get(&tenant.collection_name())
    }

    /// Delete the tenant's collection and everything in it.
    ///
    /// The ownership check runs before any destructive step, so a mismatched
    /// tenant can never observe or delete another tenant's data.
    pub fn drop_collection(&self, tenant: &TenantId) -> Result<(), StoreError> {
        let name = tenant.collection_name();
        let collection = self
            .store
            .get(&name)
            .ok_or_else(|| StoreError::CollectionNotFound(name.clone()))?;
        if collection.tenant() != tenant.as_str() {
            return Err(StoreError::TenantMismatch {
                collection: name,
                tenant: tenant.as_str().to_string(),
            });
        }
        self.store.delete(&name)?;
        info!(tenant = %tenant, collection = %collection.name(), "dropped collection");
        Ok(())
    }
}
