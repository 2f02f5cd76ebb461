//! CLI argument parsing with clap.
//!
//! Defines the command-line surface: the `serve`, `migrate`, and `token`
//! subcommands plus the global configuration and logging flags.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inventory stock HTTP API
#[derive(Parser, Debug)]
#[command(name = "inventory-api")]
#[command(about = "HTTP API for inventory stock records")]
#[command(long_about = "
Inventory-api serves stock records over HTTP, guarded by bearer-token
authentication and backed by PostgreSQL.

EXAMPLES:
    # Start the server with the layered configuration from ./config
    inventory-api serve

    # Start the server on a custom host and port
    inventory-api serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    inventory-api --config /etc/inventory-api/production.toml serve

    # Validate configuration without starting the server
    inventory-api serve --dry-run

    # Apply pending database migrations
    inventory-api migrate

    # Mint a bearer token for local testing
    inventory-api token --subject dev-user
")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Read this single TOML file instead of the layered config directory.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` layer is loaded.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    Serve {
        /// Host address to bind to
        ///
        /// 127.0.0.1 for localhost only, 0.0.0.0 to accept connections from
        /// any interface.
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on (1-65535)
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over the configuration file and the global
        /// --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit without starting the server
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    Migrate {
        /// Show pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to rollback (1-100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
    /// Mint a bearer token signed with the configured JWT parameters
    ///
    /// Intended for local testing; production tokens come from the external
    /// identity provider.
    Token {
        /// Subject claim for the minted token
        #[arg(long, value_name = "SUBJECT")]
        subject: String,

        /// Token validity in hours (defaults to jwt.token_expiration)
        #[arg(long, value_name = "HOURS", value_parser = super::validation::validate_expiry_hours)]
        expires_in: Option<i64>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "test")]
    Test,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Argument checks beyond what clap expresses declaratively.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Commands::Serve {
            host: Some(host),
            port: Some(port),
            ..
        }) = &self.command
        {
            if host == "0.0.0.0" && *port < 1024 {
                return Err(format!(
                    "binding to 0.0.0.0 on privileged port {port} requires root privileges"
                ));
            }
        }
        Ok(())
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Production => crate::config::Environment::Production,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["inventory-api"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn serve_command_parses_host_and_port() {
        let cli = Cli::try_parse_from([
            "inventory-api",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Serve { host, port, .. }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("expected Serve, got {other:?}"),
        }
    }

    #[test]
    fn migrate_dry_run_conflicts_with_rollback() {
        let result = Cli::try_parse_from([
            "inventory-api",
            "migrate",
            "--dry-run",
            "--rollback",
            "2",
        ]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn token_command_parses_subject() {
        let cli = Cli::try_parse_from(["inventory-api", "token", "--subject", "dev-user"]).unwrap();
        match cli.command {
            Some(Commands::Token {
                subject,
                expires_in,
            }) => {
                assert_eq!(subject, "dev-user");
                assert!(expires_in.is_none());
            }
            other => panic!("expected Token, got {other:?}"),
        }
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["inventory-api", "--verbose", "--quiet"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn privileged_port_on_any_interface_fails_validation() {
        let cli = Cli::try_parse_from([
            "inventory-api",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "80",
        ])
        .unwrap();
        assert!(cli.validate().is_err());
    }
}
