//! Repository-scoped API calls.

use super::pager::{IssuePager, ListParams};
use crate::migrator::MigrateError;
use crate::model::{
    Comment, Commit, Event, ImportPayload, ImportResult, Member, PullRequest, RepoInfo, Review,
    ReviewComment,
};
use crate::poller::TokioSleep;
use crate::rate_limit::ensure_core_rate_limit;
use crate::repo::{SourceRepo, TargetRepo};
use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

/// A file entry of a compare response.
#[derive(Debug, Deserialize)]
struct CompareFile {
    filename: String,
    #[serde(default)]
    previous_filename: Option<String>,
    /// Absent for binary files and very large diffs.
    #[serde(default)]
    patch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Compare {
    #[serde(default)]
    files: Vec<CompareFile>,
}

impl Compare {
    /// Renders the files as a unified diff.
    fn to_diff(&self) -> String {
        let mut diff = String::new();
        for file in &self.files {
            let old = file.previous_filename.as_deref().unwrap_or(&file.filename);
            diff.push_str(&format!(
                "diff --git a/{old} b/{new}\n--- a/{old}\n+++ b/{new}\n",
                new = file.filename
            ));
            if let Some(patch) = &file.patch {
                diff.push_str(patch);
                if !patch.ends_with('\n') {
                    diff.push('\n');
                }
            }
        }
        diff
    }
}

/// A repository reached through the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubRepo {
    octocrab: Octocrab,
    full_name: String,
}

impl GitHubRepo {
    /// Creates a handle for `full_name` ("owner/name").
    pub fn new(octocrab: Octocrab, full_name: impl Into<String>) -> Self {
        Self {
            octocrab,
            full_name: full_name.into(),
        }
    }

    /// Full repository name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    fn route(&self, suffix: &str) -> String {
        format!("/repos/{}{suffix}", self.full_name)
    }

    async fn fetch_repo(&self) -> Result<RepoInfo, MigrateError> {
        debug!(repo = %self.full_name, "Fetching repository");
        Ok(self.octocrab.get(self.route(""), None::<&()>).await?)
    }

    /// Collects every page of a list endpoint, following the `Link` header.
    async fn list_all<T: DeserializeOwned>(&self, route: String) -> Result<Vec<T>, MigrateError> {
        debug!(route = %route, "Fetching first page");
        let mut page: Page<T> = self
            .octocrab
            .get(&route, Some(&ListParams::plain()))
            .await?;
        let mut items = std::mem::take(&mut page.items);

        while let Some(mut next) = self.octocrab.get_page::<T>(&page.next).await? {
            debug!(route = %route, fetched = items.len(), "Fetching next page");
            items.append(&mut next.items);
            page = next;
        }
        Ok(items)
    }
}

impl SourceRepo for GitHubRepo {
    type Issues = IssuePager;

    async fn get_repo(&self) -> Result<RepoInfo, MigrateError> {
        self.fetch_repo().await
    }

    fn list_issues(&self) -> IssuePager {
        IssuePager::new(self.octocrab.clone(), &self.full_name)
    }

    async fn list_comments(&self, issue_number: u64) -> Result<Vec<Comment>, MigrateError> {
        self.list_all(self.route(&format!("/issues/{issue_number}/comments")))
            .await
    }

    async fn list_events(&self, issue_number: u64) -> Result<Vec<Event>, MigrateError> {
        self.list_all(self.route(&format!("/issues/{issue_number}/events")))
            .await
    }

    async fn get_pull_request(&self, pull_number: u64) -> Result<PullRequest, MigrateError> {
        Ok(self
            .octocrab
            .get(self.route(&format!("/pulls/{pull_number}")), None::<&()>)
            .await?)
    }

    async fn list_pull_request_commits(
        &self,
        pull_number: u64,
    ) -> Result<Vec<Commit>, MigrateError> {
        self.list_all(self.route(&format!("/pulls/{pull_number}/commits")))
            .await
    }

    async fn get_compare(
        &self,
        repo_full_name: &str,
        base: &str,
        head: &str,
    ) -> Result<String, MigrateError> {
        let route = format!("/repos/{repo_full_name}/compare/{base}...{head}");
        let compare: Compare = self.octocrab.get(route, None::<&()>).await?;
        Ok(compare.to_diff())
    }

    async fn list_reviews(&self, pull_number: u64) -> Result<Vec<Review>, MigrateError> {
        self.list_all(self.route(&format!("/pulls/{pull_number}/reviews")))
            .await
    }

    async fn list_review_comments(
        &self,
        pull_number: u64,
    ) -> Result<Vec<ReviewComment>, MigrateError> {
        self.list_all(self.route(&format!("/pulls/{pull_number}/comments")))
            .await
    }
}

impl TargetRepo for GitHubRepo {
    type Issues = IssuePager;

    async fn get_repo(&self) -> Result<RepoInfo, MigrateError> {
        self.fetch_repo().await
    }

    fn list_issues(&self) -> IssuePager {
        IssuePager::new(self.octocrab.clone(), &self.full_name)
    }

    async fn list_members(&self) -> Result<Vec<Member>, MigrateError> {
        self.list_all(self.route("/collaborators")).await
    }

    async fn import(&self, payload: &ImportPayload) -> Result<ImportResult, MigrateError> {
        ensure_core_rate_limit(&self.octocrab, &TokioSleep).await;
        info!(repo = %self.full_name, title = %payload.issue.title, "Posting import");
        Ok(self
            .octocrab
            .post(self.route("/import/issues"), Some(payload))
            .await?)
    }

    async fn get_import(&self, id: u64) -> Result<ImportResult, MigrateError> {
        Ok(self
            .octocrab
            .get(self.route(&format!("/import/issues/{id}")), None::<&()>)
            .await?)
    }
}
