//! Pull request detail and commits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository a branch lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRepo {
    pub full_name: String,
}

/// Base or head of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(rename = "ref")]
    pub ref_field: String,
    pub sha: String,
    /// Absent when the head fork has been deleted.
    #[serde(default)]
    pub repo: Option<BranchRepo>,
}

/// A pull request as returned by the single pull request endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    pub base: Branch,
    pub head: Branch,
}

impl PullRequest {
    /// Returns true if the pull request has been merged.
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }
}

/// Commit message container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
}

/// A commit listed on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    #[serde(default)]
    pub html_url: String,
    pub commit: CommitDetail,
}

impl Commit {
    /// First seven characters of the sha.
    #[must_use]
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }

    /// First line of the commit message.
    #[must_use]
    pub fn title(&self) -> &str {
        self.commit.message.lines().next().unwrap_or_default()
    }
}
