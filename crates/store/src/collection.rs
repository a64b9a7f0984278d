use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::similarity::cosine_unchecked;

/// One stored embedding inside a collection: the vector plus the minimal
/// metadata needed to rank, return, and delete it. The authoritative record
/// lives in the metadata projection; this mirror shares its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredVector {
    pub id: Uuid,
    pub document_id: String,
    pub text: String,
    pub vector: Vec<f32>,
    pub metadata: Value,
}

/// Result entry for a similarity query. Derived per query, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: Uuid,
    pub document_text: String,
    pub metadata: Value,
    /// Cosine similarity in [-1, 1].
    pub similarity: f32,
    /// 1-based position in the result ordering.
    pub rank: usize,
}

/// Live statistics computed from collection contents, not cached counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total: usize,
    pub unique_documents: usize,
}

struct CollectionInner {
    /// Records in insertion order; the position is the tie-break for equal
    /// similarity scores.
    records: Vec<StoredVector>,
    by_id: HashMap<Uuid, usize>,
}

/// A named, single-tenant partition of the vector index.
///
/// `insert` and `delete_by_document` serialize on the write lock; `query`
/// reads a consistent snapshot under the read lock and may run concurrently
/// with other readers.
pub struct Collection {
    name: String,
    tenant: String,
    dimension: usize,
    inner: RwLock<CollectionInner>,
}

impl Collection {
    pub fn new(name: impl Into<String>, tenant: impl Into<String>, dimension: usize) -> Self {
        Self {
            name: name.into(),
            tenant: tenant.into(),
            dimension,
            inner: RwLock::new(CollectionInner {
                records: Vec::new(),
                by_id: HashMap::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Insert or overwrite a record. Idempotent per id: a second insert with
    /// the same id replaces the payload but keeps the original insertion
    /// position, so tie-breaking stays stable across re-inserts.
    pub fn insert(
        &self,
        id: Uuid,
        vector: Vec<f32>,
        text: String,
        document_id: String,
        metadata: Value,
    ) -> Result<(), StoreError> {
        if vector.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }

        let record = StoredVector {
            id,
            document_id,
            text,
            vector,
            metadata,
        };

        let mut inner = self.inner.write().map_err(|_| StoreError::poisoned())?;
        if let Some(&position) = inner.by_id.get(&id) {
            inner.records[position] = record;
        } else {
            let position = inner.records.len();
            inner.records.push(record);
            inner.by_id.insert(id, position);
        }
        Ok(())
    }

    /// Nearest-neighbor query: cosine against every stored vector, keeping
    /// strictly those with `similarity >= threshold`, ordered by descending
    /// similarity with ties broken by insertion order (earliest first), and
    /// truncated to at most `k` results. An empty result is not an error.
    pub fn query(
        &self,
        query_vector: &[f32],
        k: usize,
        threshold: f32,
    ) -> Result<Vec<SearchResult>, StoreError> {
        if query_vector.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                actual: query_vector.len(),
            });
        }
        if k == 0 {
            return Ok(Vec::new());
        }

        let inner = self.inner.read().map_err(|_| StoreError::poisoned())?;
        let mut scored: Vec<(usize, f32)> = inner
            .records
            .iter()
            .enumerate()
            .map(|(position, record)| (position, cosine_unchecked(query_vector, &record.vector)))
            .filter(|&(_, similarity)| similarity >= threshold)
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .enumerate()
            .map(|(rank, (position, similarity))| {
                let record = &inner.records[position];
                SearchResult {
                    id: record.id,
                    document_text: record.text.clone(),
                    metadata: record.metadata.clone(),
                    similarity,
                    rank: rank + 1,
                }
            })
            .collect())
    }

    /// Remove every record belonging to `document_id`. Returns the number of
    /// records removed; removing zero is not an error.
    pub fn delete_by_document(&self, document_id: &str) -> Result<usize, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::poisoned())?;
        let before = inner.records.len();
        inner.records.retain(|record| record.document_id != document_id);
        let removed = before - inner.records.len();
        if removed > 0 {
            inner.by_id = inner
                .records
                .iter()
                .enumerate()
                .map(|(position, record)| (record.id, position))
                .collect();
            debug!(collection = %self.name, document_id, removed, "deleted document embeddings");
        }
        Ok(removed)
    }

    /// Statistics computed from live contents to avoid counter drift.
    pub fn stats(&self) -> Result<CollectionStats, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::poisoned())?;
        let unique_documents = inner
            .records
            .iter()
            .map(|record| record.document_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        Ok(CollectionStats {
            total: inner.records.len(),
            unique_documents,
        })
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
