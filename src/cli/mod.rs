//! Command-line interface.
//!
//! Argument parsing with clap, configuration merging (files + environment +
//! CLI flags), and dispatch to the serve/migrate/token handlers.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::{execute_command, wants_server};
pub use parser::{Cli, Commands, Environment, LogLevel};

use crate::config::Settings;

/// Load configuration from files and environment, then apply CLI overrides.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::from_cli(cli)?;
    let settings = merger.merge_cli_args(cli)?;
    Ok(settings)
}
