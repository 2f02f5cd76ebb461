//! Health check endpoint handlers.
//!
//! Liveness is a static 200; readiness and the full health report check the
//! database through the connection pool directly.

use std::collections::HashMap;

use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Health report for the service and its dependencies.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: String,
    pub checks: HashMap<String, ComponentHealth>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health information for one dependency.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub response_time_ms: Option<u64>,
}

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Full health report
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .route("/health/live", get(liveness_check))
}

async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let database = check_database(&state).await;
    let status = database.status;

    let mut checks = HashMap::new();
    checks.insert("database".to_string(), database);

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks,
    };

    match response.status {
        HealthStatus::Healthy => Ok(Json(response)),
        HealthStatus::Unhealthy => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match check_database(&state).await.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

/// Probe the database with a trivial query on a pooled connection.
async fn check_database(state: &AppState) -> ComponentHealth {
    use diesel_async::RunQueryDsl;

    let started = std::time::Instant::now();
    let result = match state.db_pool.get().await {
        Ok(mut conn) => diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| format!("query failed: {e}")),
        Err(e) => Err(format!("connection failed: {e}")),
    };

    let elapsed_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(()) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some("connected".to_string()),
            response_time_ms: Some(elapsed_ms),
        },
        Err(message) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            message: Some(message),
            response_time_ms: Some(elapsed_ms),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    #[tokio::test]
    async fn liveness_is_always_ok() {
        assert_eq!(liveness_check().await, StatusCode::OK);
    }
}
