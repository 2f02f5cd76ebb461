//! Application state shared across request handlers.

use crate::config::JwtConfig;
use crate::db::AsyncDbPool;

/// State handed to every handler through Axum's State extractor.
///
/// Holds the shared connection pool and the token-validation parameters.
/// Per-request persistence sessions (`UnitOfWork`) are constructed from the
/// pool inside the handlers; nothing request-scoped lives here. Cloning is
/// cheap since the pool is reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: AsyncDbPool,
    /// JWT validation parameters for the authentication gate
    pub jwt_config: JwtConfig,
}

impl AppState {
    pub fn new(db_pool: AsyncDbPool, jwt_config: JwtConfig) -> Self {
        Self {
            db_pool,
            jwt_config,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State over a lazily-built pool that never connects; usable by tests
    /// that are rejected before any handler touches the database.
    pub(crate) fn for_tests(jwt_config: JwtConfig) -> Self {
        use diesel_async::AsyncPgConnection;
        use diesel_async::pooled_connection::AsyncDieselConnectionManager;
        use diesel_async::pooled_connection::bb8::Pool;

        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(
            "postgres://localhost:5432/unreachable",
        );
        let db_pool = Pool::builder().build_unchecked(manager);
        Self {
            db_pool,
            jwt_config,
        }
    }
}
