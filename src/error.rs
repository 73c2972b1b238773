//! Error types for justdad.

use thiserror::Error;

/// Errors produced by the journal store, configuration and CLI layers.
///
/// The statistics engine itself never fails; everything that touches disk,
/// user input or serialization reports through this type.
#[derive(Debug, Error)]
pub enum JustDadError {
    /// Configuration could not be located, read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A `SQLite` operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Stored or user-supplied data could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The requested entry does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A command-line argument was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
