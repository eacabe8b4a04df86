//! Error types for Netreact-RS

use thiserror::Error;

/// Result type alias for Netreact operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Netreact-RS
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Interface not found
    #[error("Interface '{0}' not found")]
    InterfaceNotFound(String),

    /// Packet capture error
    #[error("Packet capture error: {0}")]
    Capture(String),

    /// Packet parsing error
    #[error("Packet parsing error: {0}")]
    PacketParsing(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Malformed exclusion list entry
    #[error("Invalid exclusion list entry: {0}")]
    ExclusionList(String),

    /// Persisted state failed validation
    #[error("Invalid state file: {0}")]
    State(String),
}

impl Error {
    /// Create a capture error with a custom message
    pub fn capture<S: Into<String>>(msg: S) -> Self {
        Error::Capture(msg.into())
    }

    /// Create a configuration error with a custom message
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a state validation error with a custom message
    pub fn state<S: Into<String>>(msg: S) -> Self {
        Error::State(msg.into())
    }
}
