//! Route definitions

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// Create the router with the relay and health endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/weather", get(handlers::relay_current))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
