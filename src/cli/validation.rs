//! Value parsers for CLI arguments.

use std::path::PathBuf;

/// Port must be non-zero; clap already bounds it to u16.
pub fn validate_port(value: &str) -> Result<u16, String> {
    let port: u16 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a valid port number"))?;
    if port == 0 {
        return Err("port must be between 1 and 65535".to_string());
    }
    Ok(port)
}

/// Accepts localhost, IPv4 addresses, and plain hostnames.
pub fn validate_host_address(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err("host address cannot be empty".to_string());
    }
    if value == "localhost" || value.parse::<std::net::IpAddr>().is_ok() {
        return Ok(value.to_string());
    }
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return Ok(value.to_string());
    }
    Err(format!("'{value}' is not a valid host address"))
}

/// Configuration file must exist and be a TOML file.
pub fn validate_config_file_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if !path.exists() {
        return Err(format!("configuration file '{value}' does not exist"));
    }
    if !path.is_file() {
        return Err(format!("'{value}' is not a file"));
    }
    Ok(path)
}

/// Rollback steps are bounded to keep accidents small.
pub fn validate_rollback_steps(value: &str) -> Result<u32, String> {
    let steps: u32 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a valid number of steps"))?;
    if !(1..=100).contains(&steps) {
        return Err("rollback steps must be between 1 and 100".to_string());
    }
    Ok(steps)
}

/// Token validity must be a positive number of hours.
pub fn validate_expiry_hours(value: &str) -> Result<i64, String> {
    let hours: i64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a valid number of hours"))?;
    if hours <= 0 {
        return Err("token validity must be at least one hour".to_string());
    }
    Ok(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_bounds() {
        assert_eq!(validate_port("8080"), Ok(8080));
        assert!(validate_port("0").is_err());
        assert!(validate_port("65536").is_err());
        assert!(validate_port("http").is_err());
    }

    #[test]
    fn host_addresses() {
        assert!(validate_host_address("localhost").is_ok());
        assert!(validate_host_address("127.0.0.1").is_ok());
        assert!(validate_host_address("0.0.0.0").is_ok());
        assert!(validate_host_address("db.internal").is_ok());
        assert!(validate_host_address("").is_err());
        assert!(validate_host_address("not a host").is_err());
    }

    #[test]
    fn config_file_must_exist() {
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());

        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(validate_config_file_path(file.path().to_str().unwrap()).is_ok());
    }

    #[test]
    fn rollback_bounds() {
        assert_eq!(validate_rollback_steps("1"), Ok(1));
        assert_eq!(validate_rollback_steps("100"), Ok(100));
        assert!(validate_rollback_steps("0").is_err());
        assert!(validate_rollback_steps("101").is_err());
    }

    #[test]
    fn expiry_must_be_positive() {
        assert_eq!(validate_expiry_hours("24"), Ok(24));
        assert!(validate_expiry_hours("0").is_err());
        assert!(validate_expiry_hours("-1").is_err());
    }
}
