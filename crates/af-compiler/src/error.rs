//! Error types for af-compiler.
//!
//! Unsupported filter lines are not errors; see `af_core::Unsupported`.

use thiserror::Error;

/// Error type for compiler operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the filter list or writing the output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A built-in expression failed to compile
    #[error("invalid expression: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
