// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use mathops::chat::ChatError;
use mathops::error::AppError;
use std::time::Duration;

#[test]
fn test_chat_error_messages() {
    assert_eq!(
        ChatError::Disabled.to_string(),
        "Chat feature is not available"
    );
    assert_eq!(
        ChatError::Upstream {
            provider: "LLM API".to_string(),
            status: 429,
            body: "rate limited".to_string(),
        }
        .to_string(),
        "LLM API error: 429 - rate limited"
    );
    assert!(ChatError::Timeout(Duration::from_secs(30))
        .to_string()
        .starts_with("Request timed out"));
    assert_eq!(
        ChatError::Network("connection reset".to_string()).to_string(),
        "Network error: connection reset"
    );
    assert_eq!(
        ChatError::Unexpected("bad header".to_string()).to_string(),
        "Error processing request: bad header"
    );
}

#[test]
fn test_chat_error_outcome_labels_are_distinct() {
    let labels = [
        ChatError::Disabled.outcome(),
        ChatError::Upstream {
            provider: String::new(),
            status: 500,
            body: String::new(),
        }
        .outcome(),
        ChatError::Timeout(Duration::from_secs(1)).outcome(),
        ChatError::Network(String::new()).outcome(),
        ChatError::Unexpected(String::new()).outcome(),
    ];
    let mut unique = labels.to_vec();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), labels.len());
}

#[test]
fn test_invalid_request_is_422() {
    let response = AppError::InvalidRequest("missing field `x`".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn test_config_error_is_500() {
    let response = AppError::Config("bad port".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_app_error_display() {
    let error = AppError::InvalidRequest("Missing question field".to_string());
    assert!(error.to_string().contains("Missing question field"));

    let error = AppError::Internal("runtime".to_string());
    assert_eq!(error.to_string(), "Internal error: runtime");
}
