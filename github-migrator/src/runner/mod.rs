//! Wires configuration, API clients and the migrator together.

mod config;
mod error;

pub use config::{Endpoint, RunnerConfig};
pub use error::RunnerError;

use crate::config::{load_config, parse_endpoint, FileConfig};
use crate::github::{build_client, current_user, GitHubRepo};
use crate::migrator::{MigratorOptions, Migrator};
use crate::summary::RunSummary;
use tracing::info;

/// Runs a migration between two GitHub repositories.
pub struct Runner {
    source: GitHubRepo,
    target: GitHubRepo,
    options: MigratorOptions,
}

impl Runner {
    /// Builds API clients and options from the configuration.
    ///
    /// Both tokens are verified by fetching the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file or an endpoint is invalid, or if a
    /// client cannot authenticate.
    pub async fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let file_config = match config.config_path() {
            Some(path) => load_config(path)?,
            None => FileConfig::default(),
        };
        let options = file_config.into_options(config.user_mapping().clone(), config.dry_run());

        let source = connect(config.source()).await?;
        let target = connect(config.target()).await?;

        Ok(Self {
            source,
            target,
            options,
        })
    }

    /// Executes the migration.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the migration.
    pub async fn run(self) -> Result<RunSummary, RunnerError> {
        let mut migrator = Migrator::new(self.source, self.target, self.options);
        Ok(migrator.migrate().await?)
    }
}

async fn connect(endpoint: &Endpoint) -> Result<GitHubRepo, RunnerError> {
    let api_url = parse_endpoint(endpoint.api_url())?;
    let octocrab = build_client(endpoint.token(), &api_url)?;
    let login = current_user(&octocrab).await?;
    info!(endpoint = %api_url, login = %login, "Login succeeded");
    Ok(GitHubRepo::new(octocrab, endpoint.repository()))
}
