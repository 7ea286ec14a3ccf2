//! Runner configuration.

use crate::config::DEFAULT_API_ENDPOINT;
use crate::filters::UserMapping;
use std::path::{Path, PathBuf};

/// Connection settings for one side of the migration.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Repository in "owner/name" format.
    repository: String,
    /// API token.
    token: String,
    /// API base URL.
    api_url: String,
}

impl Endpoint {
    /// Creates endpoint settings against the public API.
    pub fn new(repository: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            token: token.into(),
            api_url: DEFAULT_API_ENDPOINT.to_string(),
        }
    }

    /// Sets a custom API base URL (e.g. GitHub Enterprise).
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Returns the repository full name.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns the API token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Configuration for running a migration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Repository migrated from.
    source: Endpoint,
    /// Repository migrated to.
    target: Endpoint,
    /// User mapping given on the command line or environment.
    user_mapping: UserMapping,
    /// Optional TOML config file.
    config_path: Option<PathBuf>,
    /// Whether to build payloads without importing.
    dry_run: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(source: Endpoint, target: Endpoint, user_mapping: UserMapping, dry_run: bool) -> Self {
        Self {
            source,
            target,
            user_mapping,
            config_path: None,
            dry_run,
        }
    }

    /// Sets a config file path.
    #[must_use]
    pub fn with_config_path(mut self, config_path: PathBuf) -> Self {
        self.config_path = Some(config_path);
        self
    }

    /// Returns the source endpoint.
    pub fn source(&self) -> &Endpoint {
        &self.source
    }

    /// Returns the target endpoint.
    pub fn target(&self) -> &Endpoint {
        &self.target
    }

    /// Returns the command line user mapping.
    pub fn user_mapping(&self) -> &UserMapping {
        &self.user_mapping
    }

    /// Returns the config file path, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}
