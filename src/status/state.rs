//! Status payloads and poller bookkeeping.

use super::error::PollError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Success envelope returned by the status endpoint.
///
/// Only `success` is interpreted; every other field is kept as-is in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub success: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StatusPayload {
    /// Check for a boolean `success` field and split it from the rest.
    pub fn from_value(value: Value) -> Result<Self, PollError> {
        let Value::Object(mut fields) = value else {
            return Err(PollError::MissingSuccess);
        };

        match fields.remove("success") {
            Some(Value::Bool(success)) => Ok(Self {
                success,
                extra: fields,
            }),
            _ => Err(PollError::MissingSuccess),
        }
    }

    /// The `data` field, when present.
    pub fn data(&self) -> Option<&Value> {
        self.extra.get("data")
    }

    /// Setup recommendations reported by the environment endpoint.
    ///
    /// Entries that don't look like a recommendation are skipped.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.extra
            .get("recommendations")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A setup recommendation (e.g. "install gh").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// HIGH, MEDIUM or LOW
    pub priority: String,
    pub message: String,
    #[serde(default)]
    pub action: String,
}

/// Counters kept across poll cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollerStats {
    /// Cycles run, successful or not
    pub cycles: u64,
    /// Cycles that ended in a `PollError`
    pub failures: u64,
    /// When the last cycle completed
    pub last_poll_time: Option<DateTime<Utc>>,
}

impl PollerStats {
    pub(crate) fn record(&mut self, result: &Result<StatusPayload, PollError>) {
        self.cycles += 1;
        if result.is_err() {
            self.failures += 1;
        }
        self.last_poll_time = Some(Utc::now());
    }
}
