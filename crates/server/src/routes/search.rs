use crate::error::{ServerError, ServerResult};
use crate::routes::{require, timestamp};
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use store::TenantId;

const DEFAULT_LIMIT: usize = 10;
const DEFAULT_THRESHOLD: f32 = 0.7;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: Option<String>,
    pub user_id: Option<String>,
    pub limit: Option<usize>,
    pub threshold: Option<f32>,
    pub model: Option<String>,
}

/// POST /search
///
/// Embeds the query text and runs a thresholded nearest-neighbor query over
/// the caller's collection. Zero matches is a normal empty response.
pub async fn search_embeddings(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> ServerResult<impl IntoResponse> {
    let query = require(&request.query, "query")?;
    let user_id = require(&request.user_id, "userId")?;
    let tenant = TenantId::new(user_id)?;

    let limit = request.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 {
        return Err(ServerError::Validation("limit must be at least 1".into()));
    }
    let threshold = request.threshold.unwrap_or(DEFAULT_THRESHOLD);
    if !(-1.0..=1.0).contains(&threshold) {
        return Err(ServerError::Validation(
            "threshold must be within [-1, 1]".into(),
        ));
    }

    let model = request.model.as_deref();
    let query_vector = state.embedder.embed(query, model).await?;
    let collection = state
        .registry
        .resolve(&tenant, state.embedder.dimension(model));
    let results = collection.query(&query_vector, limit, threshold)?;

    Ok(Json(json!({
        "success": true,
        "results": results,
        "query": query,
        "limit": limit,
        "threshold": threshold,
        "timestamp": timestamp(),
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityRequest {
    pub text1: Option<String>,
    pub text2: Option<String>,
    pub model: Option<String>,
}

/// POST /similarity
///
/// Embeds both texts with the same model and returns their cosine
/// similarity directly, without touching any collection.
pub async fn compare_texts(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimilarityRequest>,
) -> ServerResult<impl IntoResponse> {
    let text1 = require(&request.text1, "text1")?;
    let text2 = require(&request.text2, "text2")?;

    let model = request.model.as_deref();
    let vectors = state
        .embedder
        .embed_batch(&[text1.to_string(), text2.to_string()], model)
        .await?;
    let similarity = store::cosine(&vectors[0], &vectors[1])?;

    Ok(Json(json!({
        "success": true,
        "similarity": similarity,
        "timestamp": timestamp(),
    })))
}
