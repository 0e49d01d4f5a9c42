//! Error types for status polling.

use crate::client::ApiError;
use thiserror::Error;

/// Why a single poll cycle produced no payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// Transport, status or JSON failure from the request client
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Body decoded but is not an object with a boolean `success` field
    #[error("response has no boolean 'success' field")]
    MissingSuccess,
}
