//! Request/response logging middleware.
//!
//! Emits one line when a request arrives and one when its response leaves,
//! tagged with the request id and the elapsed time.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{Level, info, span};

use super::RequestId;

pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let span = span!(
        Level::INFO,
        "request",
        method = %method,
        path = %path,
        request_id = %request_id
    );
    let _guard = span.enter();

    info!(method = %method, path = %path, request_id = %request_id, "request received");

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed = started.elapsed();

    info!(
        status = %response.status().as_u16(),
        elapsed_ms = %elapsed.as_millis(),
        request_id = %request_id,
        "response sent"
    );

    response
}
