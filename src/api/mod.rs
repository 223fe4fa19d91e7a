use crate::proxy::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub mod common;

pub const RELAY_PATH: &str = "/api/gemini-proxy";

pub fn build_routes(state: Arc<AppState>) -> Router {
    let cors = common::cors_layer(state.config.allowed_origin());

    Router::new()
        // Relay
        .route(RELAY_PATH, post(handlers::gemini::handle_generate))
        // Liveness
        .route("/", get(handlers::gemini::handle_root))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
        .layer(cors)
        .layer(axum::middleware::from_fn(common::request_logger))
}
