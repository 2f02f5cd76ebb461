//! Configuration management.
//!
//! Layered configuration loading with support for:
//! - TOML configuration files (`default.toml`, `{environment}.toml`, `local.toml`)
//! - `INVENTORY__*` environment variable overrides
//! - Multiple environments (development, test, staging, production)

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{DatabaseConfig, JwtConfig, LoggerSettings, ServerConfig, Settings};
