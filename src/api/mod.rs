//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

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
        .route("/state", get(state_handler))
        .route("/state/stream", get(state_stream_handler))
        .route("/timers", get(timers_handler).post(create_timer_handler))
        .route("/timers/:id/start", post(start_timer_handler))
        .route("/stop", post(stop_handler))
        .route("/reset", post(reset_handler))
        .route("/pause", post(pause_handler))
        .route("/resume", post(resume_handler))
        .route("/restart", post(restart_handler))
        .route(
            "/tick-interval",
            get(get_tick_interval_handler).put(set_tick_interval_handler),
        )
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
