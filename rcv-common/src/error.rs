//! Common error types for the receiver

use thiserror::Error;

/// Common result type for receiver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across both receiver variants
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP listener errors
    #[error("HTTP server error: {0}")]
    Http(String),
}
