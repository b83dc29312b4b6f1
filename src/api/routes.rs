//! HTTP API route definitions.

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{events, health, prometheus_metrics, root, AppState};

/// Create the API router.
///
/// `/api/events` accepts every verb so the handler can answer non-GET
/// requests with its own JSON envelope. Unmatched paths get the greeting.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(root))
        // Health endpoint
        .route("/health", any(health))
        // Data endpoint
        .route("/api/events", any(events))
        .route("/metrics", get(prometheus_metrics))
        .fallback(root)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
