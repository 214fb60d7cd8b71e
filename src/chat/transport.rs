// Outbound transport to the model provider
// Author: kelexine (https://github.com/kelexine)

use super::models::ProviderRequest;
use crate::error::Result;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Raw provider reply: status code and undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    pub status: u16,
    pub body: String,
}

impl ProviderReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Network(String),

    /// Failures that are not about the network: building the request,
    /// decoding the body.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_builder() || e.is_decode() {
            TransportError::Other(e.to_string())
        } else {
            TransportError::Network(e.to_string())
        }
    }
}

/// A single JSON POST to the provider.
///
/// Implemented by [`HttpTransport`]; tests substitute their own.
pub trait Transport: Send + Sync {
    fn post_json(
        &self,
        url: &str,
        credential: &str,
        payload: &ProviderRequest,
    ) -> impl Future<Output = std::result::Result<ProviderReply, TransportError>> + Send;
}

/// `reqwest`-backed transport with a pooled client.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10).min(timeout))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()?;

        debug!("Created provider HTTP client with {:?} timeout", timeout);

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        credential: &str,
        payload: &ProviderRequest,
    ) -> std::result::Result<ProviderReply, TransportError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(credential)
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ProviderReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_success_range() {
        let reply = |status| ProviderReply {
            status,
            body: String::new(),
        };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(!reply(301).is_success());
        assert!(!reply(429).is_success());
        assert!(!reply(500).is_success());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let payload = ProviderRequest::from(&crate::chat::ChatQuery::new("hi"));
        let err = transport
            .post_json(&format!("http://{}/v1/chat", addr), "key", &payload)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Network(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_invalid_url_is_not_a_network_error() {
        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let payload = ProviderRequest::from(&crate::chat::ChatQuery::new("hi"));
        let err = transport
            .post_json("not a url", "key", &payload)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Other(_)), "got {:?}", err);
    }
}
