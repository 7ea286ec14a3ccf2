//! Import payload construction.
//!
//! Turns one source issue and everything fetched for it into the payload the
//! target import endpoint accepts. Every migrated item is prefixed with a
//! provenance header: the author's avatar next to an attribution sentence.

mod markup;

use crate::filters::CommentFilters;
use crate::model::{
    Comment, Event, ImportComment, ImportIssue, ImportPayload, Issue, IssueDetail, Member,
    PullRequestDetail, RepoInfo, Review, ReviewState, User,
};
use crate::threads::{reconstruct_threads, ReviewThread};
use chrono::{DateTime, Utc};
use markup::{avatar, link, table, FALLBACK_AVATAR_LOGIN};
use std::collections::HashSet;
use url::Url;

/// Login shown for events whose actor no longer exists.
const GHOST_LOGIN: &str = "ghost";

/// Web host used when the target URL cannot be parsed.
const DEFAULT_WEB_BASE: &str = "https://github.com";

/// Builds import payloads for a fixed source/target pair.
pub struct PayloadBuilder<'a> {
    source: &'a RepoInfo,
    filters: &'a CommentFilters,
    members: HashSet<&'a str>,
    web_base: String,
}

impl<'a> PayloadBuilder<'a> {
    /// Creates a builder.
    ///
    /// `members` decides which logins may be assigned and get their own
    /// avatar on the target.
    #[must_use]
    pub fn new(
        source: &'a RepoInfo,
        target: &'a RepoInfo,
        filters: &'a CommentFilters,
        members: &'a [Member],
    ) -> Self {
        Self {
            source,
            filters,
            members: members.iter().map(|m| m.login.as_str()).collect(),
            web_base: web_base(&target.html_url),
        }
    }

    /// Builds the payload for one issue.
    #[must_use]
    pub fn build(&self, detail: &IssueDetail) -> ImportPayload {
        let issue = &detail.issue;
        let assignee = issue
            .assignee
            .as_ref()
            .map(|user| self.filters.apply(&user.login))
            .filter(|login| self.is_member(login));

        ImportPayload {
            issue: ImportIssue {
                title: issue.title.clone(),
                body: self.build_issue_body(issue, detail.pull_request.as_ref()),
                created_at: issue.created_at,
                updated_at: issue.updated_at,
                closed: issue.is_closed(),
                closed_at: issue.closed_at,
                labels: issue.labels.iter().map(|l| l.name.clone()).collect(),
                assignee,
            },
            comments: self.build_comments(detail),
        }
    }

    fn build_issue_body(&self, issue: &Issue, pull_request: Option<&PullRequestDetail>) -> String {
        let mut attribution = format!(
            "@{} created the original {}<br>imported from {}",
            self.filters.apply(&issue.user.login),
            issue.kind(),
            link(
                &issue.html_url,
                &format!("{}#{}", self.source.full_name, issue.number)
            ),
        );
        if let Some(detail) = pull_request {
            let pr = &detail.pull_request;
            let verb = if pr.is_merged() {
                "merged"
            } else {
                "requested to merge"
            };
            attribution.push_str(&format!(
                "<br>{verb} <code>{}</code> into <code>{}</code>",
                pr.head.ref_field, pr.base.ref_field
            ));
        }

        let mut body = self.header(&issue.user, &attribution);
        body.push_str("\n\n");
        body.push_str(&self.filters.apply(issue.body.as_deref().unwrap_or_default()));

        if let Some(detail) = pull_request {
            body.push_str(&self.build_pull_request_section(detail));
        }
        body
    }

    fn build_pull_request_section(&self, detail: &PullRequestDetail) -> String {
        let mut section = String::new();

        if !detail.commits.is_empty() {
            let noun = if detail.commits.len() == 1 {
                "commit"
            } else {
                "commits"
            };
            section.push_str(&format!(
                "\n\n<details>\n<summary>{} {noun}</summary>\n\n",
                detail.commits.len()
            ));
            for commit in &detail.commits {
                section.push_str(&format!(
                    "- {} {}\n",
                    link(
                        &self.filters.apply(&commit.html_url),
                        &format!("<code>{}</code>", commit.short_sha())
                    ),
                    self.filters.apply(commit.title())
                ));
            }
            section.push_str("</details>");
        }

        let diff = detail.diff.trim_end();
        if !diff.is_empty() {
            section.push_str("\n\n```diff\n");
            section.push_str(diff);
            section.push_str("\n```");
        }

        section
    }

    fn build_comments(&self, detail: &IssueDetail) -> Vec<ImportComment> {
        let mut timeline: Vec<TimelineEntry<'_>> = detail
            .comments
            .iter()
            .map(TimelineEntry::Comment)
            .collect();

        let threads = match &detail.pull_request {
            Some(pr) => {
                timeline.extend(
                    pr.reviews
                        .iter()
                        .filter(|review| review_verb(review).is_some())
                        .filter(|review| review.submitted_at.is_some())
                        .map(TimelineEntry::Review),
                );
                reconstruct_threads(&pr.review_comments)
            }
            None => Vec::new(),
        };
        timeline.extend(
            detail
                .events
                .iter()
                .filter(|event| event_verb(event).is_some())
                .map(TimelineEntry::Event),
        );

        // Stable, so plain comments keep their listing order on ties.
        timeline.sort_by_key(|entry| entry.created_at());

        let mut comments: Vec<ImportComment> = timeline
            .iter()
            .filter_map(|entry| self.build_timeline_comment(entry, &detail.issue))
            .collect();
        comments.extend(threads.iter().map(|thread| self.build_thread_comment(thread)));
        comments
    }

    fn build_timeline_comment(
        &self,
        entry: &TimelineEntry<'_>,
        issue: &Issue,
    ) -> Option<ImportComment> {
        let created_at = entry.created_at();
        let body = match entry {
            TimelineEntry::Comment(comment) => self.authored_block(&comment.user, &comment.body),
            TimelineEntry::Review(review) => {
                let user = review.user.clone().unwrap_or_else(|| User::new(GHOST_LOGIN));
                let sentence = format!(
                    "@{} {}",
                    self.filters.apply(&user.login),
                    review_verb(review)?
                );
                let mut body = self.header(&user, &sentence);
                let text = review.body.as_deref().unwrap_or_default();
                if !text.is_empty() {
                    body.push_str("\n\n");
                    body.push_str(&self.filters.apply(text));
                }
                body
            }
            TimelineEntry::Event(event) => {
                let user = event.actor.clone().unwrap_or_else(|| User::new(GHOST_LOGIN));
                let mut sentence = format!(
                    "@{} {} this {}",
                    self.filters.apply(&user.login),
                    event_verb(event)?,
                    issue.kind()
                );
                if let Some(sha) = &event.commit_id {
                    sentence.push_str(&format!(" in <code>{}</code>", short_sha(sha)));
                }
                self.header(&user, &sentence)
            }
        };
        Some(ImportComment { body, created_at })
    }

    fn build_thread_comment(&self, thread: &ReviewThread<'_>) -> ImportComment {
        let mut body = format!(
            "```diff\n# {}:{}\n{}\n```\n\n",
            thread.path(),
            thread.line(),
            thread.diff_hunk()
        );
        for (index, comment) in thread.comments.iter().enumerate() {
            if index > 0 {
                body.push_str("\n\n");
            }
            body.push_str(&self.authored_block(&comment.user, &comment.body));
        }
        ImportComment {
            body,
            created_at: thread.created_at(),
        }
    }

    /// Provenance header for a comment followed by its filtered text.
    fn authored_block(&self, user: &User, text: &str) -> String {
        let sentence = format!("@{} commented", self.filters.apply(&user.login));
        let mut block = self.header(user, &sentence);
        block.push_str("\n\n");
        block.push_str(&self.filters.apply(text));
        block
    }

    fn header(&self, user: &User, sentence: &str) -> String {
        table(&[&self.avatar_tag(user), sentence])
    }

    fn avatar_tag(&self, user: &User) -> String {
        let login = self.filters.apply(&user.login);
        if self.is_member(&login) {
            avatar(&self.web_base, &login)
        } else {
            avatar(&self.web_base, FALLBACK_AVATAR_LOGIN)
        }
    }

    fn is_member(&self, login: &str) -> bool {
        self.members.contains(login)
    }
}

/// An item rendered as a regular comment, ordered by time.
enum TimelineEntry<'a> {
    Comment(&'a Comment),
    Review(&'a Review),
    Event(&'a Event),
}

impl TimelineEntry<'_> {
    fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Comment(comment) => comment.created_at,
            Self::Review(review) => review.submitted_at.unwrap_or_default(),
            Self::Event(event) => event.created_at,
        }
    }
}

fn review_verb(review: &Review) -> Option<&'static str> {
    match review.state {
        ReviewState::Approved => Some("approved these changes"),
        ReviewState::ChangesRequested => Some("requested changes"),
        ReviewState::Commented if review.body.as_deref().is_some_and(|b| !b.is_empty()) => {
            Some("reviewed")
        }
        _ => None,
    }
}

fn event_verb(event: &Event) -> Option<&'static str> {
    match event.event.as_str() {
        "closed" => Some("closed"),
        "reopened" => Some("reopened"),
        "merged" => Some("merged"),
        _ => None,
    }
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

/// Scheme and host of a repository web URL.
fn web_base(html_url: &str) -> String {
    Url::parse(html_url)
        .ok()
        .filter(|url| url.has_host())
        .map(|url| url.origin().ascii_serialization())
        .unwrap_or_else(|| DEFAULT_WEB_BASE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{CommentFilter, UserMapping};
    use crate::model::{
        Branch, Commit, CommitDetail, IssueState, Label, PullRequest, PullRequestRef,
        ReviewComment,
    };

    fn time(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn source() -> RepoInfo {
        RepoInfo {
            full_name: "org/repo".to_string(),
            html_url: "http://src/org/repo".to_string(),
        }
    }

    fn target() -> RepoInfo {
        RepoInfo {
            full_name: "neworg/repo".to_string(),
            html_url: "http://tgt/neworg/repo".to_string(),
        }
    }

    fn filters() -> CommentFilters {
        CommentFilters::new(vec![
            CommentFilter::repo_url(&source(), &target()),
            CommentFilter::UserMapping(UserMapping::parse("alice:alice2,bob:bob2,carol:carol2")),
        ])
    }

    fn members() -> Vec<Member> {
        vec![Member::new("alice2"), Member::new("bob2")]
    }

    fn issue(number: u64) -> Issue {
        Issue {
            number,
            title: "Bug X".to_string(),
            body: Some("see http://src/org/repo/issues/3".to_string()),
            user: User::new("alice"),
            state: IssueState::Open,
            html_url: format!("http://src/org/repo/issues/{number}"),
            created_at: time("2020-01-01T00:00:00Z"),
            updated_at: time("2020-01-02T00:00:00Z"),
            closed_at: None,
            labels: vec![Label {
                name: "bug".to_string(),
            }],
            assignee: None,
            pull_request: None,
        }
    }

    fn comment(login: &str, body: &str, at: &str) -> Comment {
        Comment {
            user: User::new(login),
            body: body.to_string(),
            created_at: time(at),
        }
    }

    fn review_comment(id: u64, in_reply_to_id: Option<u64>, login: &str, at: &str) -> ReviewComment {
        ReviewComment {
            id,
            in_reply_to_id,
            path: "src/main.rs".to_string(),
            line: Some(10),
            original_line: None,
            diff_hunk: "@@ -1,3 +1,4 @@\n+fn main() {}".to_string(),
            user: User::new(login),
            body: format!("note {id}"),
            created_at: time(at),
        }
    }

    fn pull_request_detail() -> PullRequestDetail {
        PullRequestDetail {
            pull_request: PullRequest {
                number: 5,
                merged_at: Some(time("2020-01-05T00:00:00Z")),
                base: Branch {
                    ref_field: "main".to_string(),
                    sha: "base".to_string(),
                    repo: None,
                },
                head: Branch {
                    ref_field: "feature".to_string(),
                    sha: "head".to_string(),
                    repo: None,
                },
            },
            commits: vec![Commit {
                sha: "abcdef0123".to_string(),
                html_url: "http://src/org/repo/commit/abcdef0123".to_string(),
                commit: CommitDetail {
                    message: "Fix org/repo#3\n\ndetails".to_string(),
                },
            }],
            diff: "diff --git a/x b/x\n+added\n".to_string(),
            reviews: vec![],
            review_comments: vec![],
        }
    }

    fn build(detail: &IssueDetail) -> ImportPayload {
        let source = source();
        let target = target();
        let filters = filters();
        let members = members();
        PayloadBuilder::new(&source, &target, &filters, &members).build(detail)
    }

    #[test]
    fn builds_issue_with_provenance_and_rewritten_links() {
        let detail = IssueDetail::new(
            issue(5),
            vec![comment("bob", "thanks @alice", "2020-01-01T01:00:00Z")],
            vec![],
        );

        let payload = build(&detail);

        let expected_body = concat!(
            "<table>\n  <tr>\n    <td>\n",
            "      <img src=\"http://tgt/alice2.png\" width=\"35\">\n",
            "    </td>\n    <td>\n",
            "      @alice2 created the original issue<br>imported from ",
            "<a href=\"http://src/org/repo/issues/5\">org/repo#5</a>\n",
            "    </td>\n  </tr>\n</table>\n",
            "\n\n",
            "see http://tgt/neworg/repo/issues/3",
        );
        assert_eq!(payload.issue.body, expected_body);
        assert_eq!(payload.issue.title, "Bug X");
        assert_eq!(payload.issue.labels, vec!["bug".to_string()]);
        assert!(!payload.issue.closed);

        assert_eq!(payload.comments.len(), 1);
        let comment = &payload.comments[0];
        assert!(comment.body.starts_with("<table>"));
        assert!(comment.body.contains(r#"<img src="http://tgt/bob2.png" width="35">"#));
        assert!(comment.body.contains("@bob2 commented"));
        assert!(comment.body.ends_with("\n\nthanks @alice2"));
        assert_eq!(comment.created_at, time("2020-01-01T01:00:00Z"));
    }

    #[test]
    fn non_member_gets_fallback_avatar() {
        let detail = IssueDetail::new(
            issue(1),
            vec![comment("carol", "hi", "2020-01-01T01:00:00Z")],
            vec![],
        );

        let payload = build(&detail);

        let body = &payload.comments[0].body;
        assert!(body.contains(r#"<img src="http://tgt/github.png" width="35">"#));
        assert!(body.contains("@carol2 commented"));
    }

    #[test]
    fn assignee_set_only_for_members() {
        let mut member_assigned = issue(1);
        member_assigned.assignee = Some(User::new("bob"));
        let payload = build(&IssueDetail::new(member_assigned, vec![], vec![]));
        assert_eq!(payload.issue.assignee.as_deref(), Some("bob2"));

        let mut outsider_assigned = issue(2);
        outsider_assigned.assignee = Some(User::new("carol"));
        let payload = build(&IssueDetail::new(outsider_assigned, vec![], vec![]));
        assert_eq!(payload.issue.assignee, None);
    }

    #[test]
    fn closed_flag_follows_state() {
        let mut closed = issue(1);
        closed.state = IssueState::Closed;
        closed.closed_at = Some(time("2020-01-03T00:00:00Z"));

        let payload = build(&IssueDetail::new(closed, vec![], vec![]));

        assert!(payload.issue.closed);
        assert_eq!(payload.issue.closed_at, Some(time("2020-01-03T00:00:00Z")));
    }

    #[test]
    fn missing_body_renders_header_only() {
        let mut bare = issue(1);
        bare.body = None;

        let payload = build(&IssueDetail::new(bare, vec![], vec![]));

        assert!(payload.issue.body.ends_with("</table>\n\n\n"));
    }

    #[test]
    fn review_threads_follow_plain_comments() {
        let mut pr_issue = issue(5);
        pr_issue.pull_request = Some(PullRequestRef::default());
        let mut pr = pull_request_detail();
        pr.review_comments = vec![
            review_comment(11, None, "bob", "2020-01-01T00:30:00Z"),
            review_comment(12, Some(11), "alice", "2020-01-01T00:40:00Z"),
            review_comment(13, Some(12), "bob", "2020-01-01T00:50:00Z"),
        ];
        let detail = IssueDetail::new(
            pr_issue,
            vec![comment("bob", "plain", "2020-01-01T02:00:00Z")],
            vec![],
        )
        .with_pull_request(pr);

        let payload = build(&detail);

        assert_eq!(payload.comments.len(), 2);
        assert!(payload.comments[0].body.ends_with("plain"));

        let thread = &payload.comments[1];
        assert_eq!(thread.created_at, time("2020-01-01T00:30:00Z"));
        assert!(thread
            .body
            .starts_with("```diff\n# src/main.rs:10\n@@ -1,3 +1,4 @@\n+fn main() {}\n```\n\n<table>"));
        assert_eq!(thread.body.matches("```diff").count(), 1);
        let first = thread.body.find("note 11").unwrap();
        let second = thread.body.find("note 12").unwrap();
        let third = thread.body.find("note 13").unwrap();
        assert!(first < second && second < third);
        assert_eq!(thread.body.matches("<table>").count(), 3);
    }

    #[test]
    fn pull_request_body_lists_commits_and_diff() {
        let mut pr_issue = issue(5);
        pr_issue.pull_request = Some(PullRequestRef::default());
        let detail = IssueDetail::new(pr_issue, vec![], vec![]).with_pull_request(pull_request_detail());

        let payload = build(&detail);
        let body = &payload.issue.body;

        assert!(body.contains("@alice2 created the original pull request"));
        assert!(body.contains("<br>merged <code>feature</code> into <code>main</code>"));
        assert!(body.contains("<summary>1 commit</summary>"));
        assert!(body.contains(
            r#"- <a href="http://tgt/neworg/repo/commit/abcdef0123"><code>abcdef0</code></a> Fix neworg/repo#3"#
        ));
        assert!(body.ends_with("```diff\ndiff --git a/x b/x\n+added\n```"));
    }

    #[test]
    fn reviews_and_events_join_the_timeline() {
        let mut pr_issue = issue(5);
        pr_issue.pull_request = Some(PullRequestRef::default());
        let mut pr = pull_request_detail();
        pr.reviews = vec![
            Review {
                id: 1,
                user: Some(User::new("bob")),
                body: Some(String::new()),
                state: ReviewState::Approved,
                submitted_at: Some(time("2020-01-01T03:00:00Z")),
            },
            Review {
                id: 2,
                user: Some(User::new("bob")),
                body: Some(String::new()),
                state: ReviewState::Commented,
                submitted_at: Some(time("2020-01-01T01:30:00Z")),
            },
        ];
        let events = vec![
            Event {
                event: "labeled".to_string(),
                actor: Some(User::new("alice")),
                commit_id: None,
                created_at: time("2020-01-01T00:10:00Z"),
            },
            Event {
                event: "merged".to_string(),
                actor: Some(User::new("alice")),
                commit_id: Some("fedcba9876".to_string()),
                created_at: time("2020-01-01T04:00:00Z"),
            },
        ];
        let detail = IssueDetail::new(
            pr_issue,
            vec![comment("bob", "plain", "2020-01-01T02:00:00Z")],
            events,
        )
        .with_pull_request(pr);

        let payload = build(&detail);

        assert_eq!(payload.comments.len(), 3);
        assert!(payload.comments[0].body.ends_with("plain"));
        assert!(payload.comments[1]
            .body
            .contains("@bob2 approved these changes"));
        assert!(payload.comments[2]
            .body
            .contains("@alice2 merged this pull request in <code>fedcba9</code>"));
    }

    #[test]
    fn building_is_deterministic() {
        let detail = IssueDetail::new(
            issue(5),
            vec![comment("bob", "again", "2020-01-01T01:00:00Z")],
            vec![],
        );

        assert_eq!(build(&detail), build(&detail));
    }

    #[test]
    fn web_base_falls_back_for_unparsable_urls() {
        assert_eq!(web_base("https://ghe.example.com/org/repo"), "https://ghe.example.com");
        assert_eq!(web_base("not a url"), DEFAULT_WEB_BASE);
    }
}
