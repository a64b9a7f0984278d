//! Server initialization and routing
//!
//! Axum server setup: router construction with per-route rate limiting,
//! the global middleware stack, and graceful shutdown handling.

use crate::config::ServerConfig;
use crate::middleware::{log_requests, rate_limit, request_id};
use crate::routes::{api_info, not_found};
use crate::routes::{collections, documents, embeddings, health, search, users};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// `/` and `/health` are never rate limited; every other route carries its
/// per-minute budget from [`crate::limit::route_budget`]. The limiter runs
/// as a route layer so the matched route template (not the raw URI) keys
/// the window table, and unmatched paths fall through to the 404 handler
/// without consuming any budget.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    let api_routes = Router::new()
        .route("/embeddings", post(embeddings::create_embedding))
        .route("/search", post(search::search_embeddings))
        .route("/similarity", post(search::compare_texts))
        .route(
            "/documents/{document_id}/embeddings",
            get(documents::list_document_embeddings).delete(documents::delete_document_embeddings),
        )
        .route("/users/{user_id}/embeddings", get(users::list_user_embeddings))
        .route("/users/{user_id}/stats", get(users::user_stats))
        .route("/collections", get(collections::list_collections))
        .route("/collections/{name}", delete(collections::delete_collection))
        .route_layer(from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .merge(api_routes)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.max_body_size()))
        .layer(TimeoutLayer::new(state.config.timeout()))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(from_fn(request_id))
        .layer(from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the simvec HTTP server
///
/// Initializes structured logging, builds the shared state and router,
/// binds the TCP listener, and serves until SIGTERM or Ctrl+C.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    let state = Arc::new(AppState::new(config.clone())?);
    let app = build_router(state);

    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!("Starting simvec server on {addr}");
    tracing::info!(
        "Timeout: {}s, Max body: {}MB, CORS: {}",
        config.timeout_secs,
        config.max_body_size_mb,
        config.enable_cors
    );
    tracing::info!(
        remote_embeddings = config.embedding_api_url.is_some(),
        "Embedding backends ready"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
