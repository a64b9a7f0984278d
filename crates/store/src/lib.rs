//! simvec vector index store
//!
//! In-memory store of per-tenant collections. Each collection holds
//! fixed-dimension vectors in insertion order and answers exhaustive
//! cosine-similarity queries over them. Tenancy is structural: a validated
//! [`TenantId`] derives its collection name, and the registry checks
//! ownership before any destructive operation.
//!
//! Collections live in a [`dashmap::DashMap`] keyed by name; per-collection
//! contents sit behind an `RwLock` so queries from different collections
//! never contend with each other.

pub mod collection;
pub mod error;
pub mod similarity;
pub mod tenant;

pub use crate::collection::{Collection, CollectionStats, SearchResult, StoredVector};
pub use crate::error::StoreError;
pub use crate::similarity::cosine;
pub use crate::tenant::{CollectionRegistry, TenantId};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Listing entry for one collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub name: String,
    pub tenant: String,
    pub dimension: usize,
    pub total: usize,
}

/// All collections, keyed by collection name.
#[derive(Default)]
pub struct VectorStore {
    collections: DashMap<String, Arc<Collection>>,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the named collection, creating it with `dimension` if absent.
    /// Creation goes through the map's entry API so two concurrent callers
    /// cannot create rival collections under the same name.
    pub fn open_or_create(
        &self,
        name: &str,
        tenant: &str,
        dimension: usize,
    ) -> Arc<Collection> {
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| {
                info!(collection = name, tenant, dimension, "created collection");
                Arc::new(Collection::new(name, tenant, dimension))
            })
            .value()
            .clone()
    }

    pub fn get(&self, name: &str) -> Option<Arc<Collection>> {
        self.collections.get(name).map(|entry| entry.value().clone())
    }

    /// Remove the named collection and all its vectors.
    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.collections
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::CollectionNotFound(name.to_string()))
    }

    /// Summaries for every collection, sorted by name for stable output.
    pub fn list(&self) -> Vec<CollectionSummary> {
        let mut summaries: Vec<CollectionSummary> = self
            .collections
            .iter()
            .map(|entry| {
                let collection = entry.value();
                CollectionSummary {
                    name: collection.name().to_string(),
                    tenant: collection.tenant().to_string(),
                    dimension: collection.dimension(),
                    total: collection.len(),
                }
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
