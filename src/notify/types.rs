//! Notification records and rendered nodes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Visual classification of a notification.
///
/// The well-known levels get their own variants; anything else a caller
/// passes is kept verbatim as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
    Custom(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Custom(s) => s,
        }
    }

    /// Style class for a node of this severity, e.g. `alert alert-error`.
    pub fn class_name(&self) -> String {
        format!("alert alert-{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "info" => Severity::Info,
            "success" => Severity::Success,
            "warning" => Severity::Warning,
            "error" => Severity::Error,
            other => Severity::Custom(other.to_string()),
        })
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(severity) => severity,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Severity {
    fn from(s: &str) -> Self {
        Severity::from(s.to_string())
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: impl Into<Severity>) -> Self {
        Self {
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// Identifier of an inserted node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A notification as inserted into a render target.
///
/// `text` is the message verbatim; targets render it as plain text and never
/// interpret markup in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationNode {
    pub id: NodeId,
    pub class_name: String,
    pub severity: Severity,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl NotificationNode {
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            id: NodeId::new(),
            class_name: notification.severity.class_name(),
            severity: notification.severity.clone(),
            text: notification.message.clone(),
            created_at: Utc::now(),
        }
    }
}
