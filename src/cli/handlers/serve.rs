//! Serve command handler.
//!
//! Handles the dry-run path: validate the full configuration and report,
//! without binding a socket or touching the database.

use crate::config::Settings;
use crate::error::AppResult;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// With `dry_run`, validate and exit; otherwise the caller starts the
    /// server itself.
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.validate_only()
        } else {
            Ok(())
        }
    }

    fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        self.config.database.validate()?;
        self.config.jwt.validate()?;

        println!("configuration is valid");
        println!("server would bind to {}", self.config.server.address());
        println!("database URL is configured");
        println!("JWT validation parameters are configured");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/inventory".to_string();
        config.jwt.secret = "test_secret_key_at_least_32_characters_long".to_string();
        config.jwt.issuer = "inventory-auth".to_string();
        config.jwt.audience = "inventory-api".to_string();
        config
    }

    #[tokio::test]
    async fn dry_run_accepts_a_valid_configuration() {
        let handler = ServeCommandHandler::new(valid_config());
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn dry_run_rejects_a_missing_database_url() {
        let mut config = valid_config();
        config.database.url = String::new();
        let handler = ServeCommandHandler::new(config);
        assert!(handler.execute(true).await.is_err());
    }

    #[tokio::test]
    async fn dry_run_rejects_missing_jwt_parameters() {
        let mut config = valid_config();
        config.jwt.issuer = String::new();
        let handler = ServeCommandHandler::new(config);
        assert!(handler.execute(true).await.is_err());
    }

    #[tokio::test]
    async fn non_dry_run_defers_to_the_caller() {
        let handler = ServeCommandHandler::new(Settings::default());
        assert!(handler.execute(false).await.is_ok());
    }
}
