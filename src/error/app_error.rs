use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::error::DatabaseErrorConverter;

/// Application-wide error type covering every failure the service reports.
///
/// Validation and not-found conditions are constructed explicitly by the
/// handlers; the remaining variants are produced by `From` conversions at the
/// seams (database, pool, request body, configuration).
#[derive(Error, Debug)]
pub enum AppError {
    /// Referenced record does not exist in the store
    #[error("not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Unique constraint violation
    #[error("duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Single-field validation failure
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Declarative field-constraint failures collected from a request body
    #[error("request body failed validation")]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Malformed or missing request payload
    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// Bearer token missing, malformed, or failed validation
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Database operation failure
    #[error("database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Checking a connection out of the pool failed
    #[error("connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Configuration problem detected at startup
    #[error("configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Anything unanticipated
    #[error("internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

/// One failed field constraint, reported back to the caller.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Type alias for Result with AppError to simplify signatures
pub type AppResult<T> = Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert(error, "database operation")
    }
}

impl From<diesel_async::pooled_connection::bb8::RunError> for AppError {
    fn from(error: diesel_async::pooled_connection::bb8::RunError) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::new(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut collected = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                collected.push(ValidationFieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                });
            }
        }
        AppError::ValidationErrors { errors: collected }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        AppError::Configuration {
            key: "configuration".to_string(),
            source: anyhow::Error::new(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "name must not be empty"))]
        name: String,
        #[validate(range(min = 0, message = "quantity cannot be negative"))]
        quantity: i32,
    }

    #[test]
    fn validation_errors_are_flattened_per_field() {
        let payload = Payload {
            name: String::new(),
            quantity: -3,
        };

        let error = AppError::from(payload.validate().unwrap_err());
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"name"));
                assert!(fields.contains(&"quantity"));
            }
            other => panic!("expected ValidationErrors, got {other:?}"),
        }
    }

    #[test]
    fn validation_error_keeps_declared_message() {
        let payload = Payload {
            name: String::new(),
            quantity: 1,
        };

        let error = AppError::from(payload.validate().unwrap_err());
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors[0].message, "name must not be empty");
            }
            other => panic!("expected ValidationErrors, got {other:?}"),
        }
    }

    #[test]
    fn anyhow_errors_become_internal() {
        let error = AppError::from(anyhow::anyhow!("boom"));
        assert!(matches!(error, AppError::Internal { .. }));
    }
}
