//! Single conversion point from `AppError` to HTTP responses.
//!
//! Client-caused failures (validation, not-found, bad requests, auth) echo a
//! descriptive message back. Infrastructure failures are logged here with
//! full detail and answered with a generic 500 body so nothing internal
//! leaks to the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            AppError::Database { .. }
                | AppError::ConnectionPool { .. }
                | AppError::Configuration { .. }
                | AppError::Internal { .. }
        ) {
            tracing::error!(error = ?self, "request failed with an internal error");
        }

        let status = error_to_status_code(&self);
        let body = match &self {
            AppError::ValidationErrors { errors } => {
                ErrorResponse::new(error_to_code(&self), "request body failed validation")
                    .with_details(json!(errors))
            }
            AppError::NotFound { .. }
            | AppError::Duplicate { .. }
            | AppError::Validation { .. }
            | AppError::BadRequest { .. }
            | AppError::Unauthorized { .. } => {
                ErrorResponse::new(error_to_code(&self), &self.to_string())
            }
            AppError::Database { .. }
            | AppError::ConnectionPool { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => {
                ErrorResponse::new(error_to_code(&self), "internal server error")
            }
        };

        (status, Json(body)).into_response()
    }
}

/// HTTP status for each error variant.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Stable machine-readable code for each error variant.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::Validation { .. } => "VALIDATION_ERROR",
        AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Unauthorized { .. } => "UNAUTHORIZED",
        AppError::Database { .. } => "INTERNAL_ERROR",
        AppError::ConnectionPool { .. } => "INTERNAL_ERROR",
        AppError::Configuration { .. } => "INTERNAL_ERROR",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn not_found() -> AppError {
        AppError::NotFound {
            entity: "stock".to_string(),
            field: "id".to_string(),
            value: "5".to_string(),
        }
    }

    #[test]
    fn status_code_mapping() {
        assert_eq!(error_to_status_code(&not_found()), StatusCode::NOT_FOUND);
        assert_eq!(
            error_to_status_code(&AppError::Duplicate {
                entity: "stocks".to_string(),
                field: "name".to_string(),
                value: "Widget".to_string(),
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_to_status_code(&AppError::BadRequest {
                message: "bad".to_string()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_to_status_code(&AppError::ValidationErrors { errors: vec![] }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_to_status_code(&AppError::Unauthorized {
                message: "no token".to_string()
            }),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_to_status_code(&AppError::Database {
                operation: "list stocks".to_string(),
                source: anyhow::anyhow!("connection refused"),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_to_status_code(&AppError::ConnectionPool {
                source: anyhow::anyhow!("pool exhausted"),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn code_mapping_collapses_infrastructure_variants() {
        assert_eq!(error_to_code(&not_found()), "NOT_FOUND");
        assert_eq!(
            error_to_code(&AppError::Internal {
                source: anyhow::anyhow!("boom"),
            }),
            "INTERNAL_ERROR"
        );
        assert_eq!(
            error_to_code(&AppError::ConnectionPool {
                source: anyhow::anyhow!("boom"),
            }),
            "INTERNAL_ERROR"
        );
    }

    #[tokio::test]
    async fn internal_detail_is_not_leaked_to_the_caller() {
        let error = AppError::Database {
            operation: "list stocks".to_string(),
            source: anyhow::anyhow!("password authentication failed for user postgres"),
        };

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("internal server error"));
        assert!(!text.contains("password"));
        assert!(!text.contains("list stocks"));
    }

    #[tokio::test]
    async fn not_found_body_names_the_missing_record() {
        let response = not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("NOT_FOUND"));
        assert!(text.contains("id=5"));
    }

    #[tokio::test]
    async fn validation_errors_list_each_field() {
        use crate::error::ValidationFieldError;

        let error = AppError::ValidationErrors {
            errors: vec![
                ValidationFieldError {
                    field: "name".to_string(),
                    message: "name must not be empty".to_string(),
                },
                ValidationFieldError {
                    field: "quantity".to_string(),
                    message: "quantity cannot be negative".to_string(),
                },
            ],
        };

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("name must not be empty"));
        assert!(text.contains("quantity cannot be negative"));
    }
}
