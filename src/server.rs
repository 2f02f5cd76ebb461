//! HTTP server lifecycle.
//!
//! Startup sequence: log the effective configuration, validate the sections
//! the server depends on, build the connection pool, optionally apply
//! pending migrations, then serve until a shutdown signal arrives.

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Environment, Settings};
use crate::db::{MIGRATIONS, establish_async_connection_pool};
use crate::state::AppState;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until a shutdown signal.
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %Environment::from_env().as_str(),
            "application starting"
        );
        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            "server configuration loaded"
        );
        tracing::info!(
            max_connections = %self.settings.database.max_connections,
            min_connections = %self.settings.database.min_connections,
            auto_migrate = %self.settings.database.auto_migrate,
            "database configuration loaded"
        );
        tracing::info!(
            issuer = %self.settings.jwt.issuer,
            audience = %self.settings.jwt.audience,
            secret_configured = %(!self.settings.jwt.secret.is_empty()),
            "JWT configuration loaded"
        );

        self.settings.jwt.validate()?;
        self.settings.database.validate()?;

        let pool = establish_async_connection_pool(&self.settings.database).await?;
        tracing::info!("database connection pool initialized");

        if self.settings.database.auto_migrate {
            run_startup_migrations(self.settings.database.url.clone()).await?;
        }

        let state = AppState::new(pool, self.settings.jwt.clone());
        let router = create_router(state);

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "failed to bind");
            anyhow::anyhow!("failed to bind to {address}: {e}")
        })?;
        tracing::info!(address = %address, "server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server shutdown complete");
        Ok(())
    }
}

/// Apply pending embedded migrations over a blocking connection.
async fn run_startup_migrations(database_url: String) -> anyhow::Result<()> {
    use diesel::Connection;
    use diesel::pg::PgConnection;
    use diesel_migrations::MigrationHarness;

    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url)
            .map_err(|e| anyhow::anyhow!("migration connection error: {e}"))?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("migration error: {e}"))?;
        Ok::<_, anyhow::Error>(applied.len())
    })
    .await??;

    tracing::info!(applied, "startup migrations complete");
    Ok(())
}

/// Resolves when Ctrl+C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        }
    }
}
