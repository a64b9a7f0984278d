use crate::error::ServerResult;
use crate::routes::{require, timestamp};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use store::TenantId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentQuery {
    pub user_id: Option<String>,
}

/// GET /documents/{documentId}/embeddings?userId=
///
/// Lists the metadata projection's records for one document, oldest first.
pub async fn list_document_embeddings(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
    Query(query): Query<DocumentQuery>,
) -> ServerResult<impl IntoResponse> {
    let user_id = require(&query.user_id, "userId")?;
    let tenant = TenantId::new(user_id)?;

    let embeddings = state
        .metastore
        .list_by_document(&document_id, tenant.as_str())?;

    Ok(Json(json!({
        "success": true,
        "embeddings": embeddings,
        "count": embeddings.len(),
        "timestamp": timestamp(),
    })))
}

/// DELETE /documents/{documentId}/embeddings?userId=
///
/// Removes the document's vectors from the index and its records from the
/// projection. Idempotent: deleting an absent document reports zero removed.
pub async fn delete_document_embeddings(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
    Query(query): Query<DocumentQuery>,
) -> ServerResult<impl IntoResponse> {
    let user_id = require(&query.user_id, "userId")?;
    let tenant = TenantId::new(user_id)?;

    let deleted = match state.registry.get(&tenant) {
        Some(collection) => collection.delete_by_document(&document_id)?,
        None => 0,
    };
    state
        .metastore
        .delete_by_document(&document_id, tenant.as_str())?;

    Ok(Json(json!({
        "success": true,
        "message": format!("deleted {deleted} embeddings for document {document_id}"),
        "deleted": deleted,
        "timestamp": timestamp(),
    })))
}
