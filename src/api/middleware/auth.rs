//! JWT authentication middleware.
//!
//! Gates every stock route: a request either carries a bearer token that
//! validates against the configured secret, issuer, and audience, or it is
//! answered with 401 before any handler runs.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_token};

/// Identity derived from a validated token, stored in request extensions.
///
/// Read-only for the rest of request processing; handlers extract it with
/// `Extension<AuthUser>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: String,
    pub issuer: String,
    pub audience: String,
    pub expires_at: i64,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            issuer: claims.iss,
            audience: claims.aud,
            expires_at: claims.exp,
        }
    }
}

/// Validate the request's bearer token and attach the resulting identity.
///
/// Rejects with 401 when the Authorization header is missing, does not use
/// the Bearer scheme, or carries a token that fails signature, issuer,
/// audience, or expiry checks. Rejected requests never reach a handler.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "missing authorization header".to_string(),
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized {
            message: "authorization header must use the Bearer scheme".to_string(),
        })?;

    let claims = validate_token(token, &state.jwt_config)?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::{Extension, Router, middleware, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::JwtConfig;
    use crate::state::AppState;
    use crate::utils::jwt::generate_token;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret_key_at_least_32_characters_long".to_string(),
            issuer: "inventory-auth".to_string(),
            audience: "inventory-api".to_string(),
            token_expiration: 1,
        }
    }

    fn app(handler_hit: Arc<AtomicBool>) -> Router {
        let state = AppState::for_tests(jwt_config());
        Router::new()
            .route(
                "/protected",
                get(move |Extension(user): Extension<AuthUser>| {
                    let handler_hit = handler_hit.clone();
                    async move {
                        handler_hit.store(true, Ordering::SeqCst);
                        user.subject
                    }
                }),
            )
            .layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            ))
            .with_state(state)
    }

    fn request(auth_header: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/protected");
        if let Some(value) = auth_header {
            builder = builder.header("authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_rejected_before_the_handler() {
        let hit = Arc::new(AtomicBool::new(false));
        let response = app(hit.clone()).oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!hit.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn malformed_token_is_rejected_before_the_handler() {
        let hit = Arc::new(AtomicBool::new(false));
        let response = app(hit.clone())
            .oneshot(request(Some("Bearer malformed.token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!hit.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_rejected() {
        let hit = Arc::new(AtomicBool::new(false));
        let response = app(hit.clone())
            .oneshot(request(Some("Basic dXNlcjpwYXNz")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!hit.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let hit = Arc::new(AtomicBool::new(false));
        let token = generate_token("stock-clerk", &jwt_config(), -1).unwrap();
        let response = app(hit.clone())
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!hit.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn valid_token_reaches_the_handler_with_its_identity() {
        let hit = Arc::new(AtomicBool::new(false));
        let token = generate_token("stock-clerk", &jwt_config(), 1).unwrap();
        let response = app(hit.clone())
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(hit.load(Ordering::SeqCst));

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"stock-clerk");
    }

    #[test]
    fn auth_user_mirrors_the_claim_set() {
        let claims = Claims::new("stock-clerk", &jwt_config(), 1);
        let user = AuthUser::from(claims.clone());
        assert_eq!(user.subject, "stock-clerk");
        assert_eq!(user.issuer, claims.iss);
        assert_eq!(user.audience, claims.aud);
        assert_eq!(user.expires_at, claims.exp);
    }
}
