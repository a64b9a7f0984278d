use crate::error::ServerResult;
use crate::routes::{require, timestamp};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use store::{StoreError, TenantId};

/// GET /collections
pub async fn list_collections(
    State(state): State<Arc<AppState>>,
) -> ServerResult<impl IntoResponse> {
    let collections = state.registry.store().list();

    Ok(Json(json!({
        "success": true,
        "collections": collections,
        "count": collections.len(),
        "timestamp": timestamp(),
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCollectionQuery {
    pub user_id: Option<String>,
}

/// DELETE /collections/{name}?userId=
///
/// Tears down the named collection. Ownership is checked structurally
/// (the name must derive from the caller's tenant id) before any index
/// operation, so a mismatched caller learns nothing about the collection.
pub async fn delete_collection(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<DeleteCollectionQuery>,
) -> ServerResult<impl IntoResponse> {
    let user_id = require(&query.user_id, "userId")?;
    let tenant = TenantId::new(user_id)?;

    if name != tenant.collection_name() {
        return Err(StoreError::TenantMismatch {
            collection: name,
            tenant: tenant.as_str().to_string(),
        }
        .into());
    }
    state.registry.drop_collection(&tenant)?;

    Ok(Json(json!({
        "success": true,
        "message": format!("collection {name} deleted"),
        "timestamp": timestamp(),
    })))
}
