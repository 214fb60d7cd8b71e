// Chat forwarder: one provider call per question, failures reported in-body
// Author: kelexine (https://github.com/kelexine)

use super::extract::{extract_answer, parse_body};
use super::models::{ChatAnswer, ChatQuery, ProviderRequest};
use super::transport::{HttpTransport, Transport, TransportError};
use crate::config::AppConfig;
use crate::error::Result;
use crate::metrics;
use crate::utils::logging::{sanitize, truncate};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// Everything that can go wrong between receiving a question and producing an
/// answer. The `Display` text is what the client sees in `error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Chat feature is not available")]
    Disabled,

    #[error("{provider} error: {status} - {body}")]
    Upstream {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Request timed out after {0:?}. Please try again.")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Error processing request: {0}")]
    Unexpected(String),
}

impl ChatError {
    /// Label used for the `provider_calls_total` metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            ChatError::Disabled => "disabled",
            ChatError::Upstream { .. } => "upstream_error",
            ChatError::Timeout(_) => "timeout",
            ChatError::Network(_) => "network_error",
            ChatError::Unexpected(_) => "unexpected",
        }
    }
}

/// Forwards questions to the configured provider.
///
/// The credential is fixed at construction; without one every call returns
/// [`ChatError::Disabled`] and the transport is never touched.
pub struct ChatForwarder<T = HttpTransport> {
    transport: T,
    provider: String,
    api_url: String,
    credential: Option<Zeroizing<String>>,
    timeout: Duration,
    sanitize_logs: bool,
}

impl ChatForwarder<HttpTransport> {
    /// Build a forwarder backed by a real HTTP client.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.provider.timeout_seconds);
        let transport = HttpTransport::new(timeout)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: Transport> ChatForwarder<T> {
    pub fn new(transport: T, config: &AppConfig) -> Self {
        Self {
            transport,
            provider: config.provider.name.clone(),
            api_url: config.provider.api_url.clone(),
            credential: config.provider.credential(),
            timeout: Duration::from_secs(config.provider.timeout_seconds),
            sanitize_logs: config.logging.sanitize_tokens,
        }
    }

    /// Override the call bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.credential.is_some()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Ask the provider. Always returns a well-formed [`ChatAnswer`].
    pub async fn forward(&self, query: &ChatQuery) -> ChatAnswer {
        let started = Instant::now();
        let result = self.try_forward(query).await;
        let elapsed = started.elapsed().as_secs_f64();

        match result {
            Ok(answer) => {
                metrics::record_provider_call("success", Some(elapsed));
                ChatAnswer::Answer(answer)
            }
            Err(e) => {
                let timed = (e != ChatError::Disabled).then_some(elapsed);
                metrics::record_provider_call(e.outcome(), timed);
                warn!(outcome = e.outcome(), "Chat request failed: {}", self.loggable(&e.to_string()));
                ChatAnswer::Error(e.to_string())
            }
        }
    }

    async fn try_forward(&self, query: &ChatQuery) -> std::result::Result<String, ChatError> {
        let credential = self.credential.as_ref().ok_or(ChatError::Disabled)?;

        let payload = ProviderRequest::from(query);
        info!(
            "Forwarding chat request: question_len={}, stream={}, max_length={}, temperature={}",
            query.question.len(),
            query.stream,
            query.max_length,
            query.temperature
        );

        let call = self.transport.post_json(&self.api_url, credential, &payload);
        let reply = match tokio::time::timeout(self.timeout, call).await {
            Err(_) | Ok(Err(TransportError::Timeout)) => {
                return Err(ChatError::Timeout(self.timeout))
            }
            Ok(Err(TransportError::Network(message))) => return Err(ChatError::Network(message)),
            Ok(Err(TransportError::Other(message))) => {
                return Err(ChatError::Unexpected(message))
            }
            Ok(Ok(reply)) => reply,
        };

        if !reply.is_success() {
            return Err(ChatError::Upstream {
                provider: self.provider.clone(),
                status: reply.status,
                body: reply.body,
            });
        }

        debug!(
            "Provider replied {} ({} bytes): {}",
            reply.status,
            reply.body.len(),
            self.loggable(truncate(&reply.body, 500))
        );

        let value = parse_body(&reply.body);
        let (answer, shape) = extract_answer(&value);
        metrics::record_answer_shape(shape.as_str());
        debug!(shape = shape.as_str(), "Extracted answer");

        Ok(answer)
    }

    fn loggable(&self, text: &str) -> String {
        if self.sanitize_logs {
            sanitize(text)
        } else {
            text.to_string()
        }
    }
}
