//! Shared test utilities for integration tests.

#![allow(dead_code)]

use gitsage_dashboard::client::RequestClient;
use gitsage_dashboard::config::{ClientConfig, GitSageConfig};
use serde_json::{json, Value};
use wiremock::MockServer;

/// Request client pointed at a mock server.
pub fn client_for(server: &MockServer) -> RequestClient {
    RequestClient::new(&ClientConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
        ..ClientConfig::default()
    })
    .unwrap()
}

/// Default configuration pointed at a mock server.
pub fn config_for(server: &MockServer) -> GitSageConfig {
    let mut config = GitSageConfig::default();
    config.client.base_url = server.uri();
    config
}

/// Body shaped like the GitSage `/api/environment` response.
pub fn environment_body() -> Value {
    json!({
        "success": true,
        "data": {
            "system": "Linux",
            "git_tools": {"git": true, "gh": true, "gh_authenticated": false}
        },
        "recommendations": [
            {"priority": "HIGH", "message": "Authenticate GitHub CLI", "action": "gh auth login"}
        ]
    })
}
