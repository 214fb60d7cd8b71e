//! Configuration data structures for the mathops service.
//!
//! This module defines the schema for the application settings: the HTTP
//! listener, the upstream language-model provider and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, workers).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream language-model provider used by `/chat`.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8000`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads for the tokio runtime.
    /// Default: Number of logical CPU cores.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Settings for the upstream model provider.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Display name used in upstream error messages.
    /// Default: `LLM API`
    #[serde(default = "default_provider_name")]
    pub name: String,

    /// Full URL of the chat endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer credential. Chat is disabled when unset or empty.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Upper bound for a single provider call, in seconds.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl ProviderConfig {
    /// Returns the credential if one is configured and non-blank.
    pub fn credential(&self) -> Option<Zeroizing<String>> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| Zeroizing::new(key.to_string()))
    }

    pub fn chat_enabled(&self) -> bool {
        self.credential().is_some()
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to mask credentials echoed back in upstream bodies.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub sanitize_tokens: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            api_url: default_api_url(),
            api_key: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            sanitize_tokens: true,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_provider_name() -> String {
    "LLM API".to_string()
}

fn default_api_url() -> String {
    "https://router.huggingface.co/v1/chat/completions".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
