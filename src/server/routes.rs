// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    calculate_handler, chat_handler, health_handler, metrics_handler, root_handler, sum_handler,
};
use super::middleware::{request_id_layers, track_metrics};
use crate::chat::ChatForwarder;
use crate::config::AppConfig;
use crate::error::Result;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Request bodies are two numbers or a question; 1 MiB is generous.
const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub forwarder: Arc<ChatForwarder>,
}

pub fn create_router(config: AppConfig, forwarder: ChatForwarder) -> Result<Router> {
    let state = AppState {
        config,
        forwarder: Arc::new(forwarder),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/calculate", post(calculate_handler))
        .route("/sum", post(sum_handler))
        .route("/chat", post(chat_handler))
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
