//! Async database connection pool.
//!
//! bb8 pool of diesel_async PostgreSQL connections, sized from the
//! `[database]` settings section. Embedded migrations live here so both the
//! CLI `migrate` command and startup auto-migration share one source.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_migrations::{EmbeddedMigrations, embed_migrations};

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Async connection pool type alias.
///
/// bb8::Pool is internally reference-counted, so cloning is cheap and
/// structures holding an `AsyncDbPool` can derive Clone directly.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// All SQL migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Create the connection pool described by the database settings.
///
/// The pool is built lazily; connections are established on first checkout.
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, AppError> {
    config.validate()?;

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.url);
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::new(e),
        })?;

    Ok(pool)
}
