use crate::error::ServerResult;
use crate::routes::{require, timestamp};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use metastore::EmbeddingRecord;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use store::TenantId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmbeddingRequest {
    pub text: Option<String>,
    pub document_id: Option<String>,
    pub user_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub model: Option<String>,
}

/// POST /embeddings
///
/// Embeds the text and stores the vector in the caller's collection, then
/// mirrors the full record into the metadata projection. The two writes are
/// ordered index-first and are not transactional; a failure between them
/// shows up as a stats disagreement on `/users/{userId}/stats`.
pub async fn create_embedding(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateEmbeddingRequest>,
) -> ServerResult<impl IntoResponse> {
    let text = require(&request.text, "text")?;
    let document_id = require(&request.document_id, "documentId")?;
    let user_id = require(&request.user_id, "userId")?;
    let tenant = TenantId::new(user_id)?;

    let model = request.model.as_deref();
    let descriptor = state.embedder.catalog().resolve(model).clone();
    let vector = state.embedder.embed(text, model).await?;

    let collection = state.registry.resolve(&tenant, descriptor.dimension);
    let metadata = request.metadata.unwrap_or_else(|| json!({}));

    let record = EmbeddingRecord::new(
        document_id,
        tenant.as_str(),
        text,
        vector.clone(),
        &descriptor.name,
        metadata.clone(),
    );
    let vector_id = record.id;

    collection.insert(vector_id, vector, text.to_string(), document_id.to_string(), metadata)?;
    state.metastore.upsert(record)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "vectorId": vector_id,
            "documentId": document_id,
            "model": descriptor.name,
            "timestamp": timestamp(),
        })),
    ))
}
