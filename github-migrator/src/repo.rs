//! Collaborator interfaces for the source and target repositories.
//!
//! The orchestrator only talks to these traits; [`crate::github::GitHubRepo`]
//! implements them over the REST API and tests substitute in-memory fakes.
//! Calls are made one at a time from a single task, so the futures are not
//! required to be `Send`.

#![allow(async_fn_in_trait)]

use crate::migrator::MigrateError;
use crate::model::{
    Comment, Commit, Event, ImportPayload, ImportResult, Issue, Member, PullRequest, RepoInfo,
    Review, ReviewComment,
};

/// A lazy, finite, non-restartable sequence of issues in ascending order.
pub trait IssueStream {
    /// Returns the next issue, or `None` at the end of the stream.
    async fn next(&mut self) -> Result<Option<Issue>, MigrateError>;
}

/// Read access to the repository being migrated from.
pub trait SourceRepo {
    /// Issue stream type.
    type Issues: IssueStream;

    async fn get_repo(&self) -> Result<RepoInfo, MigrateError>;

    /// Lists issues and pull requests ascending by number.
    fn list_issues(&self) -> Self::Issues;

    async fn list_comments(&self, issue_number: u64) -> Result<Vec<Comment>, MigrateError>;

    async fn list_events(&self, issue_number: u64) -> Result<Vec<Event>, MigrateError>;

    async fn get_pull_request(&self, pull_number: u64) -> Result<PullRequest, MigrateError>;

    async fn list_pull_request_commits(
        &self,
        pull_number: u64,
    ) -> Result<Vec<Commit>, MigrateError>;

    /// Returns the unified diff between `base` and `head` in `repo_full_name`.
    async fn get_compare(
        &self,
        repo_full_name: &str,
        base: &str,
        head: &str,
    ) -> Result<String, MigrateError>;

    async fn list_reviews(&self, pull_number: u64) -> Result<Vec<Review>, MigrateError>;

    async fn list_review_comments(
        &self,
        pull_number: u64,
    ) -> Result<Vec<ReviewComment>, MigrateError>;
}

/// Access to the repository being migrated to.
pub trait TargetRepo {
    /// Issue stream type.
    type Issues: IssueStream;

    async fn get_repo(&self) -> Result<RepoInfo, MigrateError>;

    /// Lists existing issues ascending by number.
    fn list_issues(&self) -> Self::Issues;

    /// Lists accounts that can be mentioned and assigned.
    async fn list_members(&self) -> Result<Vec<Member>, MigrateError>;

    /// Submits an import payload. Accepted synchronously, processed later.
    async fn import(&self, payload: &ImportPayload) -> Result<ImportResult, MigrateError>;

    /// Checks the status of an import job.
    async fn get_import(&self, id: u64) -> Result<ImportResult, MigrateError>;
}
