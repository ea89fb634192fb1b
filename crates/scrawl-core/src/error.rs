//! Error types for scrawl.

use thiserror::Error;

/// Result type alias using scrawl's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for scrawl operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Note not found (addressed by slug)
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// A form field failed validation
    #[error("Validation failed on {field}: {message}")]
    Validation { field: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Authentication failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a field-level validation error.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// The field-level error for a colliding slug: the slug itself followed
    /// by the fixed warning suffix.
    pub fn slug_taken(slug: &str) -> Self {
        Error::validation(
            "slug",
            format!("{}{}", slug, crate::slug::SLUG_TAKEN_WARNING),
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
