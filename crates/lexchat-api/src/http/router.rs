//! Axum router configuration.
//!
//! Middleware: request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::page::index))
        .route("/send_message", post(handlers::chat::send_message))
        .route("/clear_chat", post(handlers::chat::clear_chat))
        .route("/history", get(handlers::chat::history))
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
