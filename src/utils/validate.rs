use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON body extractor with declarative validation.
///
/// Deserialization failures (missing body, malformed JSON, wrong content
/// type) become a 400 response, and the payload's `Validate` constraints run
/// before the handler ever sees the value, so invalid entities are never
/// staged against a repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    use crate::error::AppError;

    #[derive(Debug, Deserialize, Validate)]
    struct TestPayload {
        #[validate(length(min = 1, max = 20, message = "name must not be empty"))]
        name: String,
        #[validate(range(min = 0, message = "quantity cannot be negative"))]
        quantity: i32,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_payload_is_extracted() {
        let request = json_request(r#"{"name":"Widget","quantity":10}"#);

        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;
        let ValidatedJson(payload) = result.expect("extraction should succeed");
        assert_eq!(payload.name, "Widget");
        assert_eq!(payload.quantity, 10);
    }

    #[tokio::test]
    async fn empty_body_is_a_bad_request() {
        let request = json_request("");

        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;
        match result {
            Err(AppError::BadRequest { message }) => assert!(!message.is_empty()),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let request = json_request("{not json");

        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn missing_content_type_is_a_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(r#"{"name":"Widget","quantity":10}"#))
            .unwrap();

        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn constraint_violations_are_collected_per_field() {
        let request = json_request(r#"{"name":"","quantity":-5}"#);

        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;
        match result {
            Err(AppError::ValidationErrors { errors }) => {
                assert_eq!(errors.len(), 2);
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"name"));
                assert!(fields.contains(&"quantity"));
            }
            other => panic!("expected ValidationErrors, got {other:?}"),
        }
    }
}
