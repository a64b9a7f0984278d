use serde_json::{json, Value};
use tracing::debug;

use crate::config::EmbedderConfig;
use crate::error::EmbedderError;

/// Maximum number of inputs per remote request. Providers cap batch sizes, and
/// remote calls are metered, so larger batches are split into fixed chunks.
pub const REMOTE_CHUNK_SIZE: usize = 100;

/// Send one chunk of texts to the remote provider and return its vectors in
/// input order. `chunk` is the zero-based chunk index, carried into errors so
/// batch failures name the failing chunk.
pub(crate) async fn embed_remote_chunk(
    client: &reqwest::Client,
    cfg: &EmbedderConfig,
    model_name: &str,
    texts: &[String],
    chunk: usize,
) -> Result<Vec<Vec<f32>>, EmbedderError> {
    let url = cfg.api_url.as_deref().ok_or_else(|| {
        EmbedderError::InvalidConfig(format!(
            "model {model_name} uses a remote backend but no embed API URL is configured"
        ))
    })?;

    let payload = build_payload(model_name, texts);
    let mut request = client.post(url).json(&payload);
    if let Some(key) = cfg.api_key.as_deref() {
        request = request.bearer_auth(key);
    }

    debug!(model = model_name, chunk, inputs = texts.len(), "sending embed request");

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            EmbedderError::ProviderTimeout(format!("chunk {chunk}: {e}"))
        } else {
            EmbedderError::Provider {
                chunk,
                message: format!("HTTP request failed: {e}"),
            }
        }
    })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(EmbedderError::Provider {
            chunk,
            message: format!("HTTP error {status}: {body}"),
        });
    }

    let value = response
        .json::<Value>()
        .await
        .map_err(|e| EmbedderError::Provider {
            chunk,
            message: format!("invalid JSON response: {e}"),
        })?;

    let vectors = parse_embeddings(value, chunk)?;
    if vectors.len() != texts.len() {
        return Err(EmbedderError::Provider {
            chunk,
            message: format!(
                "provider returned {} embeddings for {} inputs",
                vectors.len(),
                texts.len()
            ),
        });
    }
    Ok(vectors)
}

/// OpenAI-style request body: `{"model": ..., "input": [...]}`.
pub(crate) fn build_payload(model_name: &str, texts: &[String]) -> Value {
    json!({ "model": model_name, "input": texts })
}

/// Parse an OpenAI-style response: `{"data": [{"embedding": [...]}, ...]}`,
/// sorted by index when the provider supplies one.
pub(crate) fn parse_embeddings(value: Value, chunk: usize) -> Result<Vec<Vec<f32>>, EmbedderError> {
    let bad = |message: String| EmbedderError::Provider { chunk, message };

    let Value::Object(mut map) = value else {
        return Err(bad("response must be a JSON object".into()));
    };
    let Some(Value::Array(items)) = map.remove("data") else {
        return Err(bad("response is missing the `data` array".into()));
    };

    let mut indexed = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        let Value::Object(mut obj) = item else {
            return Err(bad("unexpected entry inside `data` array".into()));
        };
        let index = obj
            .get("index")
            .and_then(Value::as_u64)
            .map(|i| i as usize)
            .unwrap_or(position);
        let embedding = obj
            .remove("embedding")
            .ok_or_else(|| bad("missing `embedding` field in data item".into()))?;
        indexed.push((index, parse_vector(embedding, chunk)?));
    }
    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, v)| v).collect())
}

fn parse_vector(value: Value, chunk: usize) -> Result<Vec<f32>, EmbedderError> {
    let bad = |message: String| EmbedderError::Provider { chunk, message };
    match value {
        Value::Array(values) => values
            .into_iter()
            .map(|entry| match entry {
                Value::Number(num) => num
                    .as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| bad("non-finite embedding value".into())),
                other => Err(bad(format!(
                    "embedding entries must be numbers, got {other:?}"
                ))),
            })
            .collect(),
        other => Err(bad(format!(
            "embedding vector must be an array, got {other:?}"
        ))),
    }
}
