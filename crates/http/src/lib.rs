//! HTTP API server for docsum.

pub mod api_error;
mod handlers;
mod response_types;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use docsum_service::SummaryService;

pub use response_types::SummaryResponse;

/// Greeting served at the root path.
const GREETING: &str = "Hello, this API is to showcase Vertex AI based summarization!";

/// Shared application state for all HTTP handlers.
///
/// Constructed once at startup with its clients already resolved; never
/// mutated afterwards.
pub struct AppState {
    /// The cache-or-generate request flow.
    pub service: SummaryService,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health))
        .route("/summarize/{index}", get(handlers::summarize))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn hello() -> &'static str {
    GREETING
}

async fn health() -> &'static str {
    "ok"
}
