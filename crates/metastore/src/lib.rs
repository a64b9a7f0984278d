//! simvec metadata projection
//!
//! A queryable mirror of what was embedded: full records keyed by id,
//! including the vector, provenance (document and user), model name, and
//! timestamps. The projection answers the document and user listing
//! endpoints without touching the vector index, and its per-user stats are
//! the drift signal against the index's own counts when one of the two
//! writes fails.
//!
//! Writes here and writes to the index are not transactional. The callers
//! order them index-first and surface disagreement through stats rather
//! than pretending atomicity.

pub mod error;

pub use crate::error::MetaStoreError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Full stored form of one embedding, timestamps included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub id: Uuid,
    pub document_id: String,
    pub user_id: String,
    pub text: String,
    pub vector: Vec<f32>,
    pub model_name: String,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmbeddingRecord {
    pub fn new(
        document_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
        vector: Vec<f32>,
        model_name: impl Into<String>,
        metadata: Value,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            document_id: document_id.into(),
            user_id: user_id.into(),
            text: text.into(),
            vector,
            model_name: model_name.into(),
            metadata,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Per-user record counts, computed live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionStats {
    pub total: usize,
    pub unique_documents: usize,
}

/// In-memory metadata projection keyed by record id.
#[derive(Default)]
pub struct MetaStore {
    records: RwLock<HashMap<Uuid, EmbeddingRecord>>,
}

impl MetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record with this id. A replace keeps the
    /// original `created_at` and refreshes `updated_at`.
    pub fn upsert(&self, mut record: EmbeddingRecord) -> Result<(), MetaStoreError> {
        let mut records = self.records.write().map_err(|_| MetaStoreError::poisoned())?;
        if let Some(existing) = records.get(&record.id) {
            record.created_at = existing.created_at;
            record.updated_at = Utc::now();
        }
        debug!(id = %record.id, document_id = %record.document_id, "upserted embedding record");
        records.insert(record.id, record);
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Result<Option<EmbeddingRecord>, MetaStoreError> {
        let records = self.records.read().map_err(|_| MetaStoreError::poisoned())?;
        Ok(records.get(&id).cloned())
    }

    /// All records for one document owned by `user_id`, oldest first.
    pub fn list_by_document(
        &self,
        document_id: &str,
        user_id: &str,
    ) -> Result<Vec<EmbeddingRecord>, MetaStoreError> {
        let records = self.records.read().map_err(|_| MetaStoreError::poisoned())?;
        let mut matching: Vec<EmbeddingRecord> = records
            .values()
            .filter(|r| r.document_id == document_id && r.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(matching)
    }

    /// One page of a user's records, most recently updated first.
    ///
    /// `page` is 1-indexed; a page past the end yields an empty slice while
    /// still reporting the true total.
    pub fn list_by_user(
        &self,
        user_id: &str,
        page: usize,
        page_size: usize,
    ) -> Result<(Vec<EmbeddingRecord>, usize), MetaStoreError> {
        let records = self.records.read().map_err(|_| MetaStoreError::poisoned())?;
        let mut matching: Vec<EmbeddingRecord> = records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));

        let total = matching.len();
        if page_size == 0 {
            return Ok((Vec::new(), total));
        }
        let start = page.max(1).saturating_sub(1).saturating_mul(page_size);
        let slice = if start >= total {
            Vec::new()
        } else {
            matching[start..(start + page_size).min(total)].to_vec()
        };
        Ok((slice, total))
    }

    /// Remove every record for `document_id` owned by `user_id`. Returns the
    /// number removed; zero is not an error.
    pub fn delete_by_document(
        &self,
        document_id: &str,
        user_id: &str,
    ) -> Result<usize, MetaStoreError> {
        let mut records = self.records.write().map_err(|_| MetaStoreError::poisoned())?;
        let before = records.len();
        records.retain(|_, r| !(r.document_id == document_id && r.user_id == user_id));
        let removed = before - records.len();
        if removed > 0 {
            debug!(document_id, user_id, removed, "deleted embedding records");
        }
        Ok(removed)
    }

    /// Live counts for one user. Compared against the index's own stats to
    /// detect a half-applied write.
    pub fn stats_by_user(&self, user_id: &str) -> Result<ProjectionStats, MetaStoreError> {
        let records = self.records.read().map_err(|_| MetaStoreError::poisoned())?;
        let mut total = 0;
        let mut documents = HashSet::new();
        for record in records.values().filter(|r| r.user_id == user_id) {
            total += 1;
            documents.insert(record.document_id.as_str());
        }
        Ok(ProjectionStats {
            total,
            unique_documents: documents.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(document_id: &str, user_id: &str) -> EmbeddingRecord {
        EmbeddingRecord::new(
            document_id,
            user_id,
            format!("text of {document_id}"),
            vec![0.1, 0.2],
            "all-MiniLM-L6-v2",
            json!({}),
        )
    }

    #[test]
    fn upsert_replaces_and_refreshes_updated_at() {
        let store = MetaStore::new();
        let original = record("doc", "alice");
        let id = original.id;
        let created_at = original.created_at;
        store.upsert(original).unwrap();

        let mut replacement = record("doc", "alice");
        replacement.id = id;
        replacement.text = "revised".into();
        store.upsert(replacement).unwrap();

        assert_eq!(store.len(), 1);
        let stored = store.get(id).unwrap().unwrap();
        assert_eq!(stored.text, "revised");
        assert_eq!(stored.created_at, created_at);
        assert!(stored.updated_at >= created_at);
    }

    #[test]
    fn get_missing_is_none() {
        let store = MetaStore::new();
        assert!(store.get(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn list_by_document_filters_on_both_keys() {
        let store = MetaStore::new();
        store.upsert(record("doc", "alice")).unwrap();
        store.upsert(record("doc", "alice")).unwrap();
        store.upsert(record("doc", "bob")).unwrap();
        store.upsert(record("other", "alice")).unwrap();

        let listed = store.list_by_document("doc", "alice").unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|r| r.user_id == "alice"));
        assert!(listed.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[test]
    fn list_by_user_paginates_one_indexed() {
        let store = MetaStore::new();
        for i in 0..5 {
            store.upsert(record(&format!("doc-{i}"), "alice")).unwrap();
        }
        store.upsert(record("doc", "bob")).unwrap();

        let (page1, total) = store.list_by_user("alice", 1, 2).unwrap();
        assert_eq!(total, 5);
        assert_eq!(page1.len(), 2);

        let (page3, total) = store.list_by_user("alice", 3, 2).unwrap();
        assert_eq!(total, 5);
        assert_eq!(page3.len(), 1);
    }

    #[test]
    fn page_past_the_end_is_empty_with_true_total() {
        let store = MetaStore::new();
        store.upsert(record("doc", "alice")).unwrap();

        let (page, total) = store.list_by_user("alice", 9, 10).unwrap();
        assert!(page.is_empty());
        assert_eq!(total, 1);
    }

    #[test]
    fn list_by_user_orders_by_updated_at_descending() {
        let store = MetaStore::new();
        let first = record("doc-a", "alice");
        let first_id = first.id;
        store.upsert(first).unwrap();
        store.upsert(record("doc-b", "alice")).unwrap();

        // Touch the first record so it becomes the most recently updated.
        let mut touched = record("doc-a", "alice");
        touched.id = first_id;
        store.upsert(touched).unwrap();

        let (page, _) = store.list_by_user("alice", 1, 10).unwrap();
        assert_eq!(page[0].id, first_id);
    }

    #[test]
    fn delete_by_document_is_scoped_and_idempotent() {
        let store = MetaStore::new();
        store.upsert(record("doc", "alice")).unwrap();
        store.upsert(record("doc", "alice")).unwrap();
        store.upsert(record("doc", "bob")).unwrap();

        assert_eq!(store.delete_by_document("doc", "alice").unwrap(), 2);
        assert_eq!(store.delete_by_document("doc", "alice").unwrap(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn stats_count_per_user() {
        let store = MetaStore::new();
        store.upsert(record("doc-a", "alice")).unwrap();
        store.upsert(record("doc-a", "alice")).unwrap();
        store.upsert(record("doc-b", "alice")).unwrap();
        store.upsert(record("doc-z", "bob")).unwrap();

        let stats = store.stats_by_user("alice").unwrap();
        assert_eq!(
            stats,
            ProjectionStats {
                total: 3,
                unique_documents: 2
            }
        );
        assert_eq!(store.stats_by_user("nobody").unwrap().total, 0);
    }
}
