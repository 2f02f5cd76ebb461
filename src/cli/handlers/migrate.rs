//! Migrate command handler.
//!
//! Applies, previews, or rolls back the embedded diesel migrations over a
//! blocking PostgreSQL connection.

use diesel::Connection;
use diesel::migration::Migration;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;

use crate::config::Settings;
use crate::db::MIGRATIONS;
use crate::error::{AppError, AppResult};

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;

        if dry_run {
            return self.show_pending_migrations().await;
        }
        match rollback {
            Some(steps) => self.rollback_migrations(steps).await,
            None => self.run_migrations().await,
        }
    }

    async fn show_pending_migrations(&self) -> AppResult<()> {
        let pending = with_connection(self.config.database.url.clone(), |conn| {
            let pending = conn
                .pending_migrations(MIGRATIONS)
                .map_err(|e| migration_error("check pending migrations", e))?;
            Ok(pending.iter().map(|m| m.name().to_string()).collect::<Vec<_>>())
        })
        .await?;

        if pending.is_empty() {
            println!("no pending migrations - database is up to date");
        } else {
            println!("{} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {name}");
            }
            println!("run without --dry-run to apply them");
        }
        Ok(())
    }

    async fn run_migrations(&self) -> AppResult<()> {
        let applied = with_connection(self.config.database.url.clone(), |conn| {
            let applied = conn
                .run_pending_migrations(MIGRATIONS)
                .map_err(|e| migration_error("run pending migrations", e))?;
            Ok(applied.iter().map(|m| m.to_string()).collect::<Vec<_>>())
        })
        .await?;

        if applied.is_empty() {
            println!("no migrations to apply - database is already up to date");
        } else {
            println!("applied {} migration(s):", applied.len());
            for name in &applied {
                println!("  - {name}");
            }
        }
        Ok(())
    }

    async fn rollback_migrations(&self, steps: u32) -> AppResult<()> {
        let reverted = with_connection(self.config.database.url.clone(), move |conn| {
            let applied = conn
                .applied_migrations()
                .map_err(|e| migration_error("list applied migrations", e))?;
            if (applied.len() as u32) < steps {
                return Err(AppError::Validation {
                    field: "rollback_steps".to_string(),
                    reason: format!(
                        "cannot rollback {steps} migrations - only {} applied",
                        applied.len()
                    ),
                });
            }

            let mut reverted = Vec::new();
            for _ in 0..steps {
                let version = conn
                    .revert_last_migration(MIGRATIONS)
                    .map_err(|e| migration_error("revert migration", e))?;
                reverted.push(version.to_string());
            }
            Ok(reverted)
        })
        .await?;

        println!("rolled back {} migration(s):", reverted.len());
        for name in &reverted {
            println!("  - {name}");
        }
        Ok(())
    }
}

/// Run a closure against a blocking PostgreSQL connection on the blocking
/// thread pool. Diesel's migration harness is synchronous.
async fn with_connection<T, F>(database_url: String, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url).map_err(|e| AppError::Database {
            operation: "establish migration connection".to_string(),
            source: anyhow::anyhow!("connection error: {e}"),
        })?;
        f(&mut conn)
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::new(e),
    })?
}

fn migration_error(
    operation: &str,
    error: Box<dyn std::error::Error + Send + Sync>,
) -> AppError {
    AppError::Database {
        operation: operation.to_string(),
        source: anyhow::anyhow!("migration error: {error}"),
    }
}
