//! Structured logging and credential redaction.
//!
//! This module configures the `tracing` ecosystem for the application and
//! provides a sanitizer so provider credentials echoed back in upstream
//! responses do not end up in log sinks.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{AppError, Result};
use regex::Regex;
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AppError::Config(format!("invalid log level '{}': {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    result.map_err(|e| AppError::Internal(format!("failed to install log subscriber: {}", e)))
}

static SECRET_PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

fn secret_patterns() -> &'static [(Regex, &'static str)] {
    SECRET_PATTERNS.get_or_init(|| {
        vec![
            (
                Regex::new(r"(?i)bearer\s+[A-Za-z0-9._~+/=-]+").expect("Invalid regex pattern"),
                "Bearer [REDACTED]",
            ),
            (
                Regex::new(r"\bhf_[A-Za-z0-9]{8,}").expect("Invalid regex pattern"),
                "[REDACTED_HF_TOKEN]",
            ),
            (
                Regex::new(r"\bsk-[A-Za-z0-9_-]{8,}").expect("Invalid regex pattern"),
                "[REDACTED_API_KEY]",
            ),
        ]
    })
}

/// Replaces bearer headers and well-known API key formats with placeholders.
pub fn sanitize(input: &str) -> String {
    secret_patterns()
        .iter()
        .fold(input.to_string(), |text, (pattern, replacement)| {
            pattern.replace_all(&text, *replacement).into_owned()
        })
}

/// Truncate `input` to at most `max` bytes on a char boundary, for log lines.
pub fn truncate(input: &str, max: usize) -> &str {
    if input.len() <= max {
        return input;
    }
    let mut end = max;
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    &input[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_bearer_header() {
        let output = sanitize("Authorization: Bearer abc.DEF-123");
        assert_eq!(output, "Authorization: Bearer [REDACTED]");
    }

    #[test]
    fn test_sanitize_hf_token() {
        let output = sanitize(r#"{"error":"Invalid token hf_AbCdEfGhIjKlMn"}"#);
        assert!(output.contains("[REDACTED_HF_TOKEN]"));
        assert!(!output.contains("hf_AbCdEfGhIjKlMn"));
    }

    #[test]
    fn test_sanitize_openai_style_key() {
        let output = sanitize("key sk-proj_abcdefgh12345 rejected");
        assert_eq!(output, "key [REDACTED_API_KEY] rejected");
    }

    #[test]
    fn test_sanitize_leaves_plain_text() {
        assert_eq!(sanitize("model is overloaded"), "model is overloaded");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 3), "hel");
        // 'é' is two bytes; cutting at 2 would split it
        assert_eq!(truncate("héllo", 2), "h");
    }
}
