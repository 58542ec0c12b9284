//! Error types for calgrid.

use thiserror::Error;

/// Errors that can occur in calgrid operations.
#[derive(Error, Debug)]
pub enum CalGridError {
    #[error("Sign in required")]
    SignInRequired,

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Event '{0}' already has a change in flight")]
    EditInFlight(String),

    #[error("Event store error: {0}")]
    Store(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calgrid operations.
pub type CalGridResult<T> = Result<T, CalGridError>;
