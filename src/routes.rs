use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/config", post(handlers::configs::upsert_config))
        .route("/configs", get(handlers::configs::list_configs))
        .route("/config/:id", get(handlers::configs::get_config))
        .route("/start-call", post(handlers::calls::start_call))
        .route("/call-logs", get(handlers::calls::call_logs))
        .route("/webhook", post(handlers::webhook::webhook))
        .route("/webhook/test", post(handlers::webhook::webhook_test))
        .route("/webhook/examples", get(handlers::webhook::webhook_examples))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
