//! Migration options.

use crate::filters::UserMapping;
use crate::poller::Backoff;
use std::time::Duration;

/// Default pause before each import submission.
pub const DEFAULT_BEFORE_IMPORT_DELAY: Duration = Duration::from_secs(1);

/// Options controlling a migration run.
#[derive(Debug, Clone)]
pub struct MigratorOptions {
    /// Source to target login mapping.
    user_mapping: UserMapping,
    /// Import status polling schedule.
    backoff: Backoff,
    /// Pause before each import submission.
    before_import_delay: Duration,
    /// Whether to build payloads without submitting them.
    dry_run: bool,
}

impl Default for MigratorOptions {
    fn default() -> Self {
        Self::new(UserMapping::default())
    }
}

impl MigratorOptions {
    /// Creates options with default polling and the given user mapping.
    #[must_use]
    pub fn new(user_mapping: UserMapping) -> Self {
        Self {
            user_mapping,
            backoff: Backoff::default(),
            before_import_delay: DEFAULT_BEFORE_IMPORT_DELAY,
            dry_run: false,
        }
    }

    /// Sets the polling schedule.
    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sets the pause before each import submission.
    #[must_use]
    pub fn with_before_import_delay(mut self, delay: Duration) -> Self {
        self.before_import_delay = delay;
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the user mapping.
    pub fn user_mapping(&self) -> &UserMapping {
        &self.user_mapping
    }

    /// Returns the polling schedule.
    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Returns the pause before each import submission.
    pub fn before_import_delay(&self) -> Duration {
        self.before_import_delay
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}
