//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers, response structures and
//! the error-to-status mapping.

pub mod error;
pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sessions", post(create_session_handler))
        .route(
            "/sessions/:id",
            get(get_session_handler).patch(update_session_handler),
        )
        .route("/sessions/:id/start", post(start_timer_handler))
        .route("/sessions/:id/stop", post(stop_timer_handler))
        .route("/sessions/:id/reset", post(reset_timer_handler))
        .route("/sessions/:id/state", get(get_state_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
