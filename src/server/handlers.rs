// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::calculator::{self, ArithmeticResult, NumberPair, SumRequest, SumResponse};
use crate::chat::{ChatAnswer, ChatQuery};
use crate::error::{AppError, Result};
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub chat_enabled: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Deserialize a raw body, turning serde's message into a 422.
fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        debug!("Rejected request body: {}", e);
        AppError::InvalidRequest(format!("JSON deserialization error: {}", e))
    })
}

pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Math Operations API",
        "version": env!("CARGO_PKG_VERSION"),
        "chat_enabled": state.forwarder.is_enabled(),
        "chat_provider": state.config.provider.name,
        "endpoints": {
            "/calculate": "POST - sum and product of x and y",
            "/sum": "POST - sum of a and b",
            "/chat": "POST - ask the language model a question",
            "/health": "GET - health check",
            "/metrics": "GET - Prometheus metrics",
        }
    }))
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        chat_enabled: state.forwarder.is_enabled(),
    })
}

/// Handler for `POST /calculate`
pub async fn calculate_handler(body: String) -> Result<Json<ArithmeticResult>> {
    let pair: NumberPair = parse_json(&body)?;
    Ok(Json(calculator::evaluate(pair)))
}

/// Handler for `POST /sum`
pub async fn sum_handler(body: String) -> Result<Json<SumResponse>> {
    let req: SumRequest = parse_json(&body)?;
    Ok(Json(calculator::sum(req)))
}

/// Handler for `POST /chat`. Provider failures come back as 200 with `error`
/// set; only a malformed body is rejected.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ChatAnswer>> {
    let query: ChatQuery = parse_json(&body)?;
    if query.question.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "question must not be empty".to_string(),
        ));
    }

    let answer = state.forwarder.forward(&query).await;
    info!(
        "Chat request completed: {}",
        if answer.is_error() { "error" } else { "answered" }
    );

    Ok(Json(answer))
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}
