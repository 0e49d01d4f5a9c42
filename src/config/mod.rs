//! Configuration module for the GitSage dashboard client
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`GITSAGE_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use gitsage_dashboard::config::GitSageConfig;
//!
//! let config = GitSageConfig::default();
//! assert_eq!(config.status.interval_ms, 30_000);
//!
//! let toml = r#"
//! [client]
//! base_url = "http://localhost:8080"
//! "#;
//! let config: GitSageConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.client.base_url, "http://localhost:8080");
//! ```

pub mod client;
pub mod error;
pub mod logging;

pub use client::ClientConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};

// Component configs live next to the components that use them
pub use crate::notify::NotificationConfig;
pub use crate::status::StatusConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the dashboard client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GitSageConfig {
    /// JSON request client settings
    pub client: ClientConfig,
    /// Environment status polling
    pub status: StatusConfig,
    /// Transient notification rendering
    pub notifications: NotificationConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl GitSageConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports GITSAGE_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("GITSAGE_BASE_URL") {
            self.client.base_url = url;
        }

        if let Ok(level) = std::env::var("GITSAGE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("GITSAGE_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(interval) = std::env::var("GITSAGE_STATUS_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.status.interval_ms = ms;
            }
        }
        if let Ok(poll) = std::env::var("GITSAGE_STATUS_POLL") {
            self.status.enabled = poll.to_lowercase() == "true";
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        match reqwest::Url::parse(&self.client.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::Validation {
                    field: "client.base_url".to_string(),
                    message: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::Validation {
                    field: "client.base_url".to_string(),
                    message: e.to_string(),
                });
            }
        }

        if self.client.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "client.timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        if self.status.endpoint.is_empty() {
            return Err(ConfigError::Validation {
                field: "status.endpoint".to_string(),
                message: "endpoint cannot be empty".to_string(),
            });
        }
        if self.status.interval_ms == 0 {
            return Err(ConfigError::Validation {
                field: "status.interval_ms".to_string(),
                message: "interval must be non-zero".to_string(),
            });
        }

        if self.notifications.container.is_empty() {
            return Err(ConfigError::Validation {
                field: "notifications.container".to_string(),
                message: "container selector cannot be empty".to_string(),
            });
        }
        if self.notifications.display_ms == 0 {
            return Err(ConfigError::Validation {
                field: "notifications.display_ms".to_string(),
                message: "display duration must be non-zero".to_string(),
            });
        }

        Ok(())
    }
}
