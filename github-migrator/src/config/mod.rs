//! Configuration loading.
//!
//! Tokens, endpoints and the repositories come from the command line or the
//! environment. An optional TOML file adds a user mapping table and import
//! polling settings.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{FileConfig, ImportSettings};

use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// API endpoint used when none is configured.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.github.com";

/// Loads and validates a config file.
///
/// ```toml
/// [users]
/// alice = "alice-at-target"
///
/// [import]
/// poll-interval-secs = 3
/// max-poll-attempts = 5
/// before-import-delay-millis = 1000
/// ```
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, malformed, or fails
/// validation.
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    info!(path = %path.display(), "Loading config file");

    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: FileConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
        path: path.display().to_string(),
        source: e,
    })?;
    config.validate(path)?;

    debug!(users = config.users.len(), "Loaded config file");
    Ok(config)
}

/// Validates an API endpoint and strips any trailing slash.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEndpoint`] for anything but an absolute
/// http(s) URL.
pub fn parse_endpoint(endpoint: &str) -> Result<String, ConfigError> {
    let url = Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(endpoint.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn can_load_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[users]
alice = "alice2"

[import]
max-poll-attempts = 3
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.users.get("alice").map(String::as_str), Some("alice2"));
        assert_eq!(config.import.max_poll_attempts, 3);
        assert_eq!(config.import.poll_interval_secs, 3);
    }

    #[test]
    fn load_config_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = load_config(&temp.path().join("nonexistent.toml"));

        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn load_config_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[users\nalice = ").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn validates_endpoints() {
        assert_eq!(
            parse_endpoint("https://ghe.example.com/api/v3/").unwrap(),
            "https://ghe.example.com/api/v3"
        );
        assert_eq!(parse_endpoint(DEFAULT_API_ENDPOINT).unwrap(), DEFAULT_API_ENDPOINT);
        assert!(matches!(
            parse_endpoint("ftp://example.com"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            parse_endpoint("api.github.com"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }
}
