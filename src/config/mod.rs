// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::cli::Args;
use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest, see [`AppConfig::apply_args`])
    /// 2. Environment variables (`MATHOPS__PROVIDER__API_KEY`, ...)
    /// 3. Config file (`path`, or `~/.mathops/config.toml`)
    /// 4. Defaults (lowest)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path.to_path_buf()).required(true),
            None => File::with_name(&Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("MATHOPS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Overlay command-line flags on top of the loaded configuration.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = &args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(key) = &args.api_key {
            self.provider.api_key = Some(key.clone());
        }
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mathops")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
