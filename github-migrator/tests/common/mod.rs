//! In-memory collaborators for exercising the migrator.

#![allow(dead_code)]

use github_migrator::model::{
    Comment, Commit, Event, ImportPayload, ImportResult, ImportStatus, Issue, IssueState, Member,
    PullRequest, PullRequestDetail, PullRequestRef, RepoInfo, Review, ReviewComment, User,
};
use github_migrator::{IssueStream, MigrateError, Sleep, SourceRepo, TargetRepo};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

pub fn time(s: &str) -> chrono::DateTime<chrono::Utc> {
    s.parse().unwrap()
}

pub fn repo(full_name: &str, host: &str) -> RepoInfo {
    RepoInfo {
        full_name: full_name.to_string(),
        html_url: format!("http://{host}/{full_name}"),
    }
}

pub fn source_repo() -> RepoInfo {
    repo("org/repo", "src")
}

pub fn target_repo() -> RepoInfo {
    repo("neworg/repo", "tgt")
}

pub fn issue(repo: &RepoInfo, number: u64, title: &str, author: &str) -> Issue {
    Issue {
        number,
        title: title.to_string(),
        body: Some(String::new()),
        user: User::new(author),
        state: IssueState::Open,
        html_url: format!("{}/issues/{number}", repo.html_url),
        created_at: time("2020-01-01T00:00:00Z"),
        updated_at: time("2020-01-01T00:00:00Z"),
        closed_at: None,
        labels: vec![],
        assignee: None,
        pull_request: None,
    }
}

pub fn comment(author: &str, body: &str) -> Comment {
    Comment {
        user: User::new(author),
        body: body.to_string(),
        created_at: time("2020-01-01T01:00:00Z"),
    }
}

pub fn review_comment(id: u64, in_reply_to_id: Option<u64>, author: &str) -> ReviewComment {
    ReviewComment {
        id,
        in_reply_to_id,
        path: "src/lib.rs".to_string(),
        line: Some(3),
        original_line: None,
        diff_hunk: "@@ -1,2 +1,3 @@".to_string(),
        user: User::new(author),
        body: format!("review note {id}"),
        created_at: time("2020-01-01T02:00:00Z"),
    }
}

pub fn pull_request(number: u64) -> PullRequestDetail {
    let branch = |name: &str, sha: &str| github_migrator::model::Branch {
        ref_field: name.to_string(),
        sha: sha.to_string(),
        repo: Some(github_migrator::model::BranchRepo {
            full_name: "org/repo".to_string(),
        }),
    };
    PullRequestDetail {
        pull_request: PullRequest {
            number,
            merged_at: None,
            base: branch("main", "basesha"),
            head: branch("feature", "headsha"),
        },
        commits: vec![],
        diff: "diff --git a/src/lib.rs b/src/lib.rs\n".to_string(),
        reviews: vec![],
        review_comments: vec![],
    }
}

/// Issues served in order.
pub struct VecStream {
    issues: VecDeque<Issue>,
}

impl IssueStream for VecStream {
    async fn next(&mut self) -> Result<Option<Issue>, MigrateError> {
        Ok(self.issues.pop_front())
    }
}

/// A source issue and everything the source serves for it.
pub struct SourceIssue {
    pub issue: Issue,
    pub comments: Vec<Comment>,
    pub events: Vec<Event>,
    pub pull_request: Option<PullRequestDetail>,
}

impl SourceIssue {
    pub fn new(issue: Issue) -> Self {
        Self {
            issue,
            comments: vec![],
            events: vec![],
            pull_request: None,
        }
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_pull_request(mut self, detail: PullRequestDetail) -> Self {
        self.issue.pull_request = Some(PullRequestRef::default());
        self.pull_request = Some(detail);
        self
    }
}

/// A source repository served from memory, recording every call.
pub struct FakeSource {
    pub repo: RepoInfo,
    pub issues: Vec<SourceIssue>,
    pub calls: RefCell<Vec<String>>,
    pub fail_comments_for: Option<u64>,
}

impl FakeSource {
    pub fn new(issues: Vec<SourceIssue>) -> Self {
        Self {
            repo: source_repo(),
            issues,
            calls: RefCell::new(Vec::new()),
            fail_comments_for: None,
        }
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn find(&self, number: u64) -> &SourceIssue {
        self.issues
            .iter()
            .find(|s| s.issue.number == number)
            .unwrap_or_else(|| panic!("unexpected issue number: {number}"))
    }

    fn pull(&self, number: u64) -> &PullRequestDetail {
        self.find(number)
            .pull_request
            .as_ref()
            .unwrap_or_else(|| panic!("unexpected pull request number: {number}"))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SourceRepo for FakeSource {
    type Issues = VecStream;

    async fn get_repo(&self) -> Result<RepoInfo, MigrateError> {
        Ok(self.repo.clone())
    }

    fn list_issues(&self) -> VecStream {
        VecStream {
            issues: self.issues.iter().map(|s| s.issue.clone()).collect(),
        }
    }

    async fn list_comments(&self, issue_number: u64) -> Result<Vec<Comment>, MigrateError> {
        self.record(format!("comments {issue_number}"));
        if self.fail_comments_for == Some(issue_number) {
            return Err(MigrateError::api("connection reset"));
        }
        Ok(self.find(issue_number).comments.clone())
    }

    async fn list_events(&self, issue_number: u64) -> Result<Vec<Event>, MigrateError> {
        self.record(format!("events {issue_number}"));
        Ok(self.find(issue_number).events.clone())
    }

    async fn get_pull_request(&self, pull_number: u64) -> Result<PullRequest, MigrateError> {
        self.record(format!("pull {pull_number}"));
        Ok(self.pull(pull_number).pull_request.clone())
    }

    async fn list_pull_request_commits(
        &self,
        pull_number: u64,
    ) -> Result<Vec<Commit>, MigrateError> {
        self.record(format!("commits {pull_number}"));
        Ok(self.pull(pull_number).commits.clone())
    }

    async fn get_compare(
        &self,
        repo_full_name: &str,
        base: &str,
        head: &str,
    ) -> Result<String, MigrateError> {
        self.record(format!("compare {repo_full_name} {base}...{head}"));
        let detail = self
            .issues
            .iter()
            .filter_map(|s| s.pull_request.as_ref())
            .find(|d| d.pull_request.base.sha == base && d.pull_request.head.sha == head)
            .unwrap_or_else(|| panic!("unexpected compare: {base}...{head}"));
        Ok(detail.diff.clone())
    }

    async fn list_reviews(&self, pull_number: u64) -> Result<Vec<Review>, MigrateError> {
        self.record(format!("reviews {pull_number}"));
        Ok(self.pull(pull_number).reviews.clone())
    }

    async fn list_review_comments(
        &self,
        pull_number: u64,
    ) -> Result<Vec<ReviewComment>, MigrateError> {
        self.record(format!("review comments {pull_number}"));
        Ok(self.pull(pull_number).review_comments.clone())
    }
}

/// A target repository that records imports and answers status checks
/// from an ordered list.
pub struct FakeTarget {
    pub repo: RepoInfo,
    pub existing: Vec<Issue>,
    pub members: Vec<Member>,
    pub statuses: Vec<ImportStatus>,
    status_cursor: Cell<usize>,
    pub imports: RefCell<Vec<ImportPayload>>,
    pub member_calls: Cell<usize>,
}

impl FakeTarget {
    pub fn new(members: &[&str]) -> Self {
        Self {
            repo: target_repo(),
            existing: vec![],
            members: members.iter().map(|m| Member::new(*m)).collect(),
            statuses: vec![],
            status_cursor: Cell::new(0),
            imports: RefCell::new(Vec::new()),
            member_calls: Cell::new(0),
        }
    }

    pub fn with_existing(mut self, existing: Vec<Issue>) -> Self {
        self.existing = existing;
        self
    }

    pub fn with_statuses(mut self, statuses: Vec<ImportStatus>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn imports(&self) -> Vec<ImportPayload> {
        self.imports.borrow().clone()
    }

    pub fn status_checks(&self) -> usize {
        self.status_cursor.get()
    }
}

impl TargetRepo for FakeTarget {
    type Issues = VecStream;

    async fn get_repo(&self) -> Result<RepoInfo, MigrateError> {
        Ok(self.repo.clone())
    }

    fn list_issues(&self) -> VecStream {
        VecStream {
            issues: self.existing.iter().cloned().collect(),
        }
    }

    async fn list_members(&self) -> Result<Vec<Member>, MigrateError> {
        self.member_calls.set(self.member_calls.get() + 1);
        Ok(self.members.clone())
    }

    async fn import(&self, payload: &ImportPayload) -> Result<ImportResult, MigrateError> {
        let mut imports = self.imports.borrow_mut();
        imports.push(payload.clone());
        Ok(ImportResult::new(
            imports.len() as u64,
            ImportStatus::Pending,
        ))
    }

    async fn get_import(&self, id: u64) -> Result<ImportResult, MigrateError> {
        let index = self.status_cursor.get();
        self.status_cursor.set(index + 1);
        let status = self
            .statuses
            .get(index)
            .cloned()
            .unwrap_or_else(|| panic!("unexpected status check #{index}"));
        Ok(ImportResult::new(id, status))
    }
}

/// Records requested sleeps instead of waiting.
#[derive(Default)]
pub struct RecordingSleep {
    pub sleeps: RefCell<Vec<Duration>>,
}

impl RecordingSleep {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Sleep for RecordingSleep {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}
