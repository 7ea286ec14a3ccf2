//! Source and target entities.
//!
//! Source entities mirror the REST shapes closely enough to be deserialized
//! straight from API responses, and are never mutated after reading. The
//! import types are the outbound wire shape of the issue import endpoint.

mod comment;
mod import;
mod issue;
mod pull_request;
mod repo;

pub use comment::{Comment, Event, Review, ReviewComment, ReviewState};
pub use import::{ImportComment, ImportIssue, ImportPayload, ImportResult, ImportStatus};
pub use issue::{Issue, IssueState, Label, PullRequestRef, User};
pub use pull_request::{Branch, BranchRepo, Commit, CommitDetail, PullRequest};
pub use repo::{Member, RepoInfo};

/// Pull request data gathered only for issues carrying the pull request marker.
#[derive(Debug, Clone)]
pub struct PullRequestDetail {
    /// The pull request itself.
    pub pull_request: PullRequest,
    /// Commits in source order.
    pub commits: Vec<Commit>,
    /// Unified diff between the base and head commits.
    pub diff: String,
    /// Submitted reviews.
    pub reviews: Vec<Review>,
    /// Inline review comments, flat and in listing order.
    pub review_comments: Vec<ReviewComment>,
}

/// Everything fetched from the source for a single issue.
#[derive(Debug, Clone)]
pub struct IssueDetail {
    /// The source issue.
    pub issue: Issue,
    /// Plain comments ordered by creation time.
    pub comments: Vec<Comment>,
    /// Timeline events.
    pub events: Vec<Event>,
    /// Present only when the issue is a pull request.
    pub pull_request: Option<PullRequestDetail>,
}

impl IssueDetail {
    /// Bundles a plain issue with its comments and events.
    #[must_use]
    pub fn new(issue: Issue, comments: Vec<Comment>, events: Vec<Event>) -> Self {
        Self {
            issue,
            comments,
            events,
            pull_request: None,
        }
    }

    /// Attaches pull request data.
    #[must_use]
    pub fn with_pull_request(mut self, detail: PullRequestDetail) -> Self {
        self.pull_request = Some(detail);
        self
    }
}
