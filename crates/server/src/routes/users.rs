use crate::error::{ServerError, ServerResult};
use crate::routes::timestamp;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use store::TenantId;

const DEFAULT_PAGE: usize = 1;
const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// GET /users/{userId}/embeddings?page=&limit=
///
/// One page of the tenant's records, most recently updated first. Pages are
/// 1-indexed; a page past the end is an empty list with the true total.
pub async fn list_user_embeddings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> ServerResult<impl IntoResponse> {
    let tenant = TenantId::new(user_id)?;

    let page = query.page.unwrap_or(DEFAULT_PAGE);
    if page == 0 {
        return Err(ServerError::Validation("page is 1-indexed".into()));
    }
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    if limit == 0 {
        return Err(ServerError::Validation("limit must be at least 1".into()));
    }

    let (embeddings, total) = state.metastore.list_by_user(tenant.as_str(), page, limit)?;
    let pages = total.div_ceil(limit);

    Ok(Json(json!({
        "success": true,
        "embeddings": embeddings,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "pages": pages,
        },
        "timestamp": timestamp(),
    })))
}

/// GET /users/{userId}/stats
///
/// Index counts and projection counts side by side. The two are written
/// without a shared transaction, so a disagreement here is the detection
/// signal for a half-applied write.
pub async fn user_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let tenant = TenantId::new(user_id)?;

    let index = match state.registry.get(&tenant) {
        Some(collection) => collection.stats()?,
        None => store::CollectionStats {
            total: 0,
            unique_documents: 0,
        },
    };
    let records = state.metastore.stats_by_user(tenant.as_str())?;
    let consistent =
        index.total == records.total && index.unique_documents == records.unique_documents;

    Ok(Json(json!({
        "success": true,
        "index": index,
        "records": records,
        "consistent": consistent,
        "timestamp": timestamp(),
    })))
}
