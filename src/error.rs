//! Error types for the countdown engine

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by engine operations
#[derive(Error, Debug)]
pub enum CountdownError {
    /// User input was rejected; recoverable by correcting the form
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The persistence backend failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Form validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("'{0}' is not a valid date")]
    InvalidDate(String),
}

impl ValidationError {
    /// Message shown to the user in the warning notification
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "Please fill the fields",
            ValidationError::InvalidDate(_) => "Please enter a valid date",
        }
    }
}

/// Key-value backend failures
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock storage: {0}")]
    Lock(String),
}

impl CountdownError {
    /// Whether the error is the user-correctable kind
    pub fn is_validation(&self) -> bool {
        matches!(self, CountdownError::Validation(_))
    }
}
