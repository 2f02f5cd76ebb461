//! Command dispatch.
//!
//! Runs the parsed CLI command against the merged settings. The serve path
//! only validates here; the actual server startup happens in `main` so that
//! this function stays side-effect-light and testable.

use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::utils::jwt::generate_token;

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};

/// Execute a CLI command with the given settings.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    cli.validate().map_err(|msg| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason: msg,
    })?;

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) if *dry_run => {
            ServeCommandHandler::new(settings).execute(true).await
        }
        Some(Commands::Serve { .. }) | None => {
            // Server startup is handled by the caller.
            Ok(())
        }
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await
        }
        Some(Commands::Token {
            subject,
            expires_in,
        }) => {
            settings.jwt.validate()?;
            let hours = expires_in.unwrap_or(settings.jwt.token_expiration);
            let token = generate_token(subject, &settings.jwt, hours)?;
            println!("{token}");
            Ok(())
        }
    }
}

/// Whether this invocation should start the HTTP server after dispatch.
pub fn wants_server(cli: &Cli) -> bool {
    matches!(
        &cli.command,
        None | Some(Commands::Serve { dry_run: false, .. })
    )
}
