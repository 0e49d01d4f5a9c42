//! Configuration for environment status polling.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the environment status poller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Whether the poller may be armed at all
    pub enabled: bool,
    /// Endpoint polled every cycle
    pub endpoint: String,
    /// Milliseconds between poll cycles
    pub interval_ms: u64,
}

impl StatusConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "/api/environment".to_string(),
            interval_ms: 30_000,
        }
    }
}
