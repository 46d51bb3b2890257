//! Error handling for the Beverage Container Tracking Platform

use thiserror::Error;

/// Application error types
///
/// Business-rule violations (a blocked move, a full truck) are not errors;
/// they come back as verdicts and notifications. These variants cover
/// malformed input and references to entities that do not exist.
#[derive(Error, Debug)]
pub enum AppError {
    // Input errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    // Consistency errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias for board operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::validation("product_name", "Product name must not be empty");
        assert_eq!(
            err.to_string(),
            "Validation error: Product name must not be empty"
        );

        let err = AppError::NotFound("Container KEG-1".to_string());
        assert_eq!(err.to_string(), "Resource not found: Container KEG-1");
    }
}
