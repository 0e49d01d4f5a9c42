//! Errors raised while loading or validating `gitsage.toml`

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read GitSage config: {0}")]
    Io(#[from] std::io::Error),

    #[error("GitSage config file {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// TOML syntax or type mismatch, with the parser's location info
    #[error("malformed GitSage config: {0}")]
    Parse(String),

    /// `field` is the dotted TOML path, e.g. `status.interval_ms`
    #[error("GitSage config field '{field}' is invalid: {message}")]
    Validation { field: String, message: String },
}
