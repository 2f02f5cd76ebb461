//! Router configuration for the API.
//!
//! Middleware is applied in reverse order of declaration: the request id is
//! assigned first, logging wraps everything after it, and the auth gate sits
//! directly on the stock routes so health probes stay public.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::api::middleware::{auth_middleware, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Routes
/// - `/api/stocks` - Stock CRUD operations (bearer token required)
/// - `/health`, `/health/ready`, `/health/live` - public probes
pub fn create_router(state: AppState) -> Router {
    let stock_routes = handlers::stocks::stock_routes().layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let api_routes = Router::new().nest("/stocks", stock_routes);

    Router::new()
        .merge(handlers::health::health_routes())
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
