//! Common error types for Duet

use thiserror::Error;

/// Common result type for Duet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Duet crates
#[derive(Error, Debug)]
pub enum Error {
    /// Caller passed malformed data (length mismatch, out-of-range index)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not allowed in the current state (e.g. completed quiz)
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
