//! Migration error types.

use thiserror::Error;

/// Errors that abort a migration run.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// Transport failure reported by a collaborator.
    #[error("API error: {message}")]
    Api { message: String },

    /// The target reported the import job as failed.
    #[error("import {id} failed status")]
    ImportFailed { id: u64 },

    /// The import job never reached a terminal status.
    #[error("import {id} reached maximum retry count ({attempts})")]
    RetryExhausted { id: u64, attempts: u32 },

    /// Target issues were looked up out of ascending order.
    #[error("issue #{requested} looked up after #{last}")]
    NonMonotonicLookup { requested: u64, last: u64 },

    /// An error raised while migrating a specific issue.
    #[error("importing {url} failed: {source}")]
    Issue {
        url: String,
        #[source]
        source: Box<MigrateError>,
    },
}

impl MigrateError {
    /// Creates a transport error from a message.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Wraps this error with the URL of the issue being migrated.
    #[must_use]
    pub fn for_issue(self, url: &str) -> Self {
        Self::Issue {
            url: url.to_string(),
            source: Box::new(self),
        }
    }

    /// Returns the underlying error, looking through issue context.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Issue { source, .. } => source.root(),
            other => other,
        }
    }
}
