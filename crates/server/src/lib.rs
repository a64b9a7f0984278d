//! simvec server - HTTP REST API for the vector similarity store
//!
//! Exposes the embedding, search, and lifecycle operations of the vector
//! core over JSON endpoints:
//!
//! - **Ingestion**: embed text and store it in the caller's collection
//! - **Search**: thresholded nearest-neighbor queries and direct text
//!   comparison
//! - **Lifecycle**: per-document listing/deletion, per-tenant pagination
//!   and stats, collection teardown
//!
//! Every mutating or querying route is gated by a per-route, per-caller
//! rate budget. The HTTP layer is the sole place the typed errors of the
//! lower crates become status codes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `POST /embeddings` - Embed and store text
//! - `POST /search` - Similarity search
//! - `POST /similarity` - Compare two texts
//! - `GET /documents/{documentId}/embeddings` - List document embeddings
//! - `DELETE /documents/{documentId}/embeddings` - Delete document embeddings
//! - `GET /users/{userId}/embeddings` - Paginated per-tenant listing
//! - `GET /users/{userId}/stats` - Index vs projection counts
//! - `GET /collections` - List collections
//! - `DELETE /collections/{name}` - Tear down a collection

pub mod config;
pub mod error;
pub mod limit;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use limit::{FixedWindowLimiter, RateLimiter};
pub use server::{build_router, start_server};
pub use state::AppState;
