//! Merging of CLI arguments into loaded settings.
//!
//! Precedence, lowest to highest: configuration files, environment
//! variables, global --verbose/--quiet, explicit serve arguments
//! (--host/--port/--log-level).

use crate::config::{ConfigError, ConfigLoader, Settings};

use super::parser::{Cli, Commands};

/// Loads settings and applies CLI overrides on top.
#[derive(Debug)]
pub struct ConfigurationMerger {
    settings: Settings,
}

impl ConfigurationMerger {
    /// Load base settings according to the CLI's --config/--env flags.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = match &cli.config {
            Some(path) => ConfigLoader::with_config_file(path),
            None => ConfigLoader::new()?,
        };
        if let Some(env) = cli.env {
            loader = loader.environment_override(env.into());
        }

        Ok(Self {
            settings: loader.load()?,
        })
    }

    #[cfg(test)]
    fn from_settings(settings: Settings) -> Self {
        Self { settings }
    }

    /// Apply CLI overrides and validate the merged result.
    pub fn merge_cli_args(mut self, cli: &Cli) -> Result<Settings, ConfigError> {
        if cli.verbose {
            self.settings.logger.level = "debug".to_string();
        }
        if cli.quiet {
            self.settings.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                self.settings.server.host = host.clone();
            }
            if let Some(port) = port {
                self.settings.server.port = *port;
            }
            if let Some(level) = log_level {
                self.settings.logger.level = level.as_str().to_string();
            }
        }

        self.settings.validate()?;
        Ok(self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn serve_arguments_override_settings() {
        let cli = parse(&[
            "inventory-api",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
        ]);
        let merged = ConfigurationMerger::from_settings(Settings::default())
            .merge_cli_args(&cli)
            .unwrap();

        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn verbose_raises_the_log_level() {
        let cli = parse(&["inventory-api", "--verbose"]);
        let merged = ConfigurationMerger::from_settings(Settings::default())
            .merge_cli_args(&cli)
            .unwrap();
        assert_eq!(merged.logger.level, "debug");
    }

    #[test]
    fn quiet_lowers_the_log_level() {
        let cli = parse(&["inventory-api", "--quiet"]);
        let merged = ConfigurationMerger::from_settings(Settings::default())
            .merge_cli_args(&cli)
            .unwrap();
        assert_eq!(merged.logger.level, "error");
    }

    #[test]
    fn explicit_log_level_beats_verbose() {
        let cli = parse(&["inventory-api", "--verbose", "serve", "--log-level", "warn"]);
        let merged = ConfigurationMerger::from_settings(Settings::default())
            .merge_cli_args(&cli)
            .unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn untouched_settings_survive_the_merge() {
        let cli = parse(&["inventory-api", "serve", "--port", "8080"]);
        let merged = ConfigurationMerger::from_settings(Settings::default())
            .merge_cli_args(&cli)
            .unwrap();
        assert_eq!(merged.server.host, "127.0.0.1");
        assert_eq!(merged.logger.level, "info");
    }
}
