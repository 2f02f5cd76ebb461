//! Structured logging setup.
//!
//! Installs a tracing-subscriber console writer configured from the
//! `[logger]` settings section. `RUST_LOG`, when set, overrides the
//! configured level filter.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::config::LoggerSettings;

/// Console log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "invalid log format '{other}', expected one of: full, compact, json"
            )),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Returns an error when called twice or when the level filter cannot be
/// parsed.
pub fn init(settings: &LoggerSettings) -> anyhow::Result<()> {
    let format: LogFormat = settings
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| anyhow::anyhow!("invalid log level '{}': {e}", settings.level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(settings.colored);

    let result = match format {
        LogFormat::Full => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats() {
        assert_eq!("full".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert_eq!("Compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
    }

    #[test]
    fn rejects_unknown_format() {
        let error = "syslog".parse::<LogFormat>().unwrap_err();
        assert!(error.contains("syslog"));
    }
}
