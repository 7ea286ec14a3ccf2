//! Config file deserialization.

use crate::config::ConfigError;
use crate::filters::UserMapping;
use crate::migrator::MigratorOptions;
use crate::poller::{Backoff, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Parsed contents of a migration config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    /// Source login to target login.
    #[serde(default)]
    pub users: BTreeMap<String, String>,

    /// Import submission and polling settings.
    #[serde(default)]
    pub import: ImportSettings,
}

/// The `[import]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ImportSettings {
    /// Wait before the first status check, in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Status checks before giving up on an import.
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,

    /// Pause before each import submission, in milliseconds.
    #[serde(default = "default_before_import_delay_millis")]
    pub before_import_delay_millis: u64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            max_poll_attempts: default_max_poll_attempts(),
            before_import_delay_millis: default_before_import_delay_millis(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

fn default_max_poll_attempts() -> u32 {
    DEFAULT_MAX_POLL_ATTEMPTS
}

fn default_before_import_delay_millis() -> u64 {
    crate::migrator::DEFAULT_BEFORE_IMPORT_DELAY.as_millis() as u64
}

impl FileConfig {
    /// Checks values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the offending key.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if self.import.max_poll_attempts == 0 {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: "import.max-poll-attempts must be at least 1".to_string(),
            });
        }

        if let Some((from, _)) = self
            .users
            .iter()
            .find(|(from, to)| from.is_empty() || to.is_empty())
        {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: format!("users entry '{from}' must map a non-empty login"),
            });
        }

        Ok(())
    }

    /// Builds run options, letting `overrides` win over the file's users.
    #[must_use]
    pub fn into_options(self, overrides: UserMapping, dry_run: bool) -> MigratorOptions {
        let mut user_mapping = UserMapping::new(self.users);
        user_mapping.extend(overrides);

        MigratorOptions::new(user_mapping)
            .with_backoff(Backoff::new(
                Duration::from_secs(self.import.poll_interval_secs),
                self.import.max_poll_attempts,
            ))
            .with_before_import_delay(Duration::from_millis(
                self.import.before_import_delay_millis,
            ))
            .with_dry_run(dry_run)
    }
}
