//! Error types shared by CareMatch services

use thiserror::Error;

/// Errors raised by shared plumbing (configuration, validation, storage setup)
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {message}")]
    ConfigurationError {
        message: String,
        key: Option<String>,
    },

    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        field: Option<String>,
    },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Logging initialization failed: {0}")]
    LoggingError(String),
}

impl CoreError {
    pub fn config(message: impl Into<String>, key: &str) -> Self {
        CoreError::ConfigurationError {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }

    pub fn validation_field(message: impl Into<String>, field: &str) -> Self {
        CoreError::ValidationError {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }

    /// Field name attached to a validation error, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CoreError::ValidationError { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        CoreError::DatabaseError(err.to_string())
    }
}
