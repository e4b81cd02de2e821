//! Error types for ferry

use thiserror::Error;

/// Result type alias for ferry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for configuration and secrets handling
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
