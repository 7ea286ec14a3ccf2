//! Runner error types.

/// Errors that can occur while running a migration.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Errors raised during the migration itself.
    #[error(transparent)]
    Migrate(#[from] crate::migrator::MigrateError),
}
