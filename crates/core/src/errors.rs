//! Core error types for the portal web tier.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portal domain.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Session '{0}' not found")]
    SessionNotFound(String),

    #[error("Notification '{0}' not found")]
    NotificationNotFound(String),

    #[error("Menu entry '{0}' not found")]
    MenuEntryNotFound(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors raised when a caller hands us malformed domain input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Unknown parent '{parent}' for entry '{id}'")]
    UnknownParent { id: String, parent: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
