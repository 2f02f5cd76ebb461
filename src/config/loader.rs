//! Layered configuration loading.
//!
//! Sources, lowest to highest priority:
//! 1. `default.toml` - base configuration (required)
//! 2. `{environment}.toml` - environment-specific overrides (optional)
//! 3. `local.toml` - local development overrides, not committed (optional)
//! 4. `INVENTORY__*` environment variables

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable selecting the configuration directory
const CONFIG_DIR_ENV: &str = "INVENTORY_CONFIG_DIR";

/// Environment variable selecting a single configuration file
const CONFIG_FILE_ENV: &str = "INVENTORY_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix for configuration overrides, e.g. `INVENTORY__SERVER__PORT=8080`
const ENV_PREFIX: &str = "INVENTORY";

/// Separator for nested keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader handling layered file + environment sources.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Build a loader from the process environment.
    ///
    /// `INVENTORY_CONFIG_DIR` and `INVENTORY_CONFIG_FILE` are mutually
    /// exclusive; the former selects layered loading, the latter a single
    /// file.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && std::env::var(CONFIG_DIR_ENV).is_ok() {
            return Err(ConfigError::mutual_exclusivity(
                "INVENTORY_CONFIG_DIR and INVENTORY_CONFIG_FILE cannot both be set",
            ));
        }

        Ok(Self {
            config_dir,
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Build a loader that reads exactly one configuration file
    /// (the `--config` CLI flag).
    pub fn with_config_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Build a loader over an explicit directory and environment.
    pub fn with_config_dir(dir: impl Into<PathBuf>, environment: AppEnvironment) -> Self {
        Self {
            config_dir: dir.into(),
            config_file: None,
            environment,
        }
    }

    /// Replace the detected environment (the `--env` CLI flag).
    pub fn environment_override(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load and validate settings from all sources.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("failed to deserialize configuration: {e}"))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let mut builder = Config::builder();

        match &self.config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.display().to_string()));
                }
                builder = builder.add_source(File::from(path.as_path()));
            }
            None => {
                builder = builder
                    .add_source(File::from(self.layer_path("default")).required(true))
                    .add_source(
                        File::from(self.layer_path(self.environment.as_str())).required(false),
                    )
                    .add_source(File::from(self.layer_path("local")).required(false));
            }
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()?;

        Ok(config)
    }

    fn layer_path(&self, name: &str) -> PathBuf {
        Path::new(&self.config_dir).join(format!("{name}.toml"))
    }
}
