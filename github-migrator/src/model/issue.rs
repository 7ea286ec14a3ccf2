//! Issues and the entities embedded in them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name.
    pub login: String,
}

impl User {
    /// Creates a user reference from a login.
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }
}

/// A label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label name.
    pub name: String,
}

/// Open or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// Marker present on issues that are pull requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// Web URL of the pull request.
    #[serde(default)]
    pub html_url: Option<String>,
}

/// An issue or pull request as listed by the issues endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number, unique within the repository.
    pub number: u64,

    /// Issue title.
    pub title: String,

    /// Body text, absent when the issue was opened without a description.
    #[serde(default)]
    pub body: Option<String>,

    /// Author.
    pub user: User,

    /// Current state.
    pub state: IssueState,

    /// Web URL of the issue.
    pub html_url: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,

    /// Labels in listing order.
    #[serde(default)]
    pub labels: Vec<Label>,

    /// Assignee, if any.
    #[serde(default)]
    pub assignee: Option<User>,

    /// Pull request marker.
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
}

impl Issue {
    /// Returns true if this issue is a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Returns the kind of item for attribution text.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        if self.is_pull_request() {
            "pull request"
        } else {
            "issue"
        }
    }

    /// Returns true unless the issue is open.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state != IssueState::Open
    }
}
