//! HTTP client configuration

use serde::{Deserialize, Serialize};

/// Settings for the JSON request client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin that same-origin endpoints (e.g. `/api/environment`) resolve against
    pub base_url: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
    /// Value sent in the `User-Agent` header
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_seconds: 10,
            user_agent: format!("gitsage-dashboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.timeout_seconds, 10);
        assert!(config.user_agent.starts_with("gitsage-dashboard/"));
    }

    #[test]
    fn test_client_config_partial_toml() {
        let config: ClientConfig = toml::from_str(r#"base_url = "http://dash.local:8080""#).unwrap();
        assert_eq!(config.base_url, "http://dash.local:8080");
        assert_eq!(config.timeout_seconds, 10);
    }
}
