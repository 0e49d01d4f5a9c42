//! Error types for JSON API calls.

use thiserror::Error;

/// Errors that can occur while calling a dashboard endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Network unreachable, DNS failure, timeout, or the body could not be read
    #[error("transport error: {0}")]
    Transport(String),

    /// Status code outside 200-299
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    /// Body is not valid JSON
    #[error("invalid JSON response: {0}")]
    Parse(String),

    /// Endpoint could not be resolved against the base URL
    #[error("invalid endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// Caller-supplied header name or value is not valid HTTP
    #[error("invalid header '{0}'")]
    InvalidHeader(String),
}

impl ApiError {
    /// HTTP status code, for `HttpStatus` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }

    /// Classify a reqwest error. Every reqwest failure is a transport failure;
    /// timeouts keep their configured duration in the message.
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_seconds: u64) -> Self {
        if e.is_timeout() {
            ApiError::Transport(format!("request timeout after {}s", timeout_seconds))
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}
