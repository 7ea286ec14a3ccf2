//! Comments, reviews and timeline events.

use super::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A plain issue comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub user: User,
    #[serde(default)]
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// An issue timeline event (closed, reopened, merged, labeled, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event name as reported by the API.
    pub event: String,
    /// Actor; absent for events triggered by deleted accounts.
    #[serde(default)]
    pub actor: Option<User>,
    /// Commit referenced by the event, if any.
    #[serde(default)]
    pub commit_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Review verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
}

/// A submitted pull request review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub body: Option<String>,
    pub state: ReviewState,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// An inline review comment on a pull request diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewComment {
    pub id: u64,

    /// Comment this one replies to, forming a reply chain.
    #[serde(default)]
    pub in_reply_to_id: Option<u64>,

    /// File the comment is attached to.
    pub path: String,

    /// Line in the current diff; absent on outdated comments.
    #[serde(default)]
    pub line: Option<u64>,

    /// Line in the diff the comment was originally made on.
    #[serde(default)]
    pub original_line: Option<u64>,

    /// Unified diff hunk the comment refers to.
    #[serde(default)]
    pub diff_hunk: String,

    pub user: User,

    #[serde(default)]
    pub body: String,

    pub created_at: DateTime<Utc>,
}

impl ReviewComment {
    /// Line number shown in the diff header.
    #[must_use]
    pub fn line_number(&self) -> u64 {
        self.line.or(self.original_line).unwrap_or(0)
    }
}
