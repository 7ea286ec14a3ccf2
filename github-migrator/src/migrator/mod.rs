//! Orchestrates a migration run.
//!
//! Source issues are migrated strictly one at a time in ascending order: each
//! import job is polled to completion before the next issue is read, because
//! concurrent imports race on the target and may duplicate issues.

mod error;
mod options;

pub use error::MigrateError;
pub use options::{MigratorOptions, DEFAULT_BEFORE_IMPORT_DELAY};

use crate::builder::PayloadBuilder;
use crate::dedup::IssuesBuffer;
use crate::filters::{CommentFilter, CommentFilters};
use crate::model::{Issue, IssueDetail, Member, PullRequestDetail, RepoInfo};
use crate::poller::{ImportPoller, Sleep, TokioSleep};
use crate::repo::{IssueStream, SourceRepo, TargetRepo};
use crate::summary::{IssueOutcome, RunSummary};
use tracing::{debug, info, info_span, Instrument};

/// Migrates every issue of a source repository into a target repository.
pub struct Migrator<S, T, Z = TokioSleep> {
    source: S,
    target: T,
    options: MigratorOptions,
    sleeper: Z,
    members: Option<Vec<Member>>,
}

impl<S: SourceRepo, T: TargetRepo> Migrator<S, T> {
    /// Creates a migrator that sleeps on the tokio timer.
    pub fn new(source: S, target: T, options: MigratorOptions) -> Self {
        Self {
            source,
            target,
            options,
            sleeper: TokioSleep,
            members: None,
        }
    }
}

impl<S: SourceRepo, T: TargetRepo, Z: Sleep> Migrator<S, T, Z> {
    /// Replaces the sleeper used for pauses and polling.
    pub fn with_sleeper<Y: Sleep>(self, sleeper: Y) -> Migrator<S, T, Y> {
        Migrator {
            source: self.source,
            target: self.target,
            options: self.options,
            sleeper,
            members: self.members,
        }
    }

    /// Returns the source repository.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the target repository.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns the sleeper.
    pub fn sleeper(&self) -> &Z {
        &self.sleeper
    }

    /// Runs the migration.
    ///
    /// # Errors
    ///
    /// Stops at the first error. Errors raised while migrating an issue are
    /// wrapped in [`MigrateError::Issue`] with the source issue URL. Everything
    /// imported before the error stays on the target; re-running skips it.
    pub async fn migrate(&mut self) -> Result<RunSummary, MigrateError> {
        let source_repo = self.source.get_repo().await?;
        let target_repo = self.target.get_repo().await?;
        info!(
            source = %source_repo.full_name,
            target = %target_repo.full_name,
            dry_run = self.options.dry_run(),
            "Migrating issues"
        );

        let filters = CommentFilters::new(vec![
            CommentFilter::repo_url(&source_repo, &target_repo),
            CommentFilter::UserMapping(self.options.user_mapping().clone()),
        ]);

        let mut source_issues = self.source.list_issues();
        let mut target_issues = IssuesBuffer::new(self.target.list_issues());
        let mut summary = RunSummary::new(self.options.dry_run());

        while let Some(issue) = source_issues.next().await? {
            let url = issue.html_url.clone();
            let span = info_span!("migrate_issue", issue = issue.number);
            let outcome = self
                .migrate_issue(&source_repo, &target_repo, &filters, issue, &mut target_issues)
                .instrument(span)
                .await
                .map_err(|e| e.for_issue(&url))?;
            summary.record(&outcome);
        }

        info!(
            seen = summary.issues_seen,
            imported = summary.issues_imported,
            skipped = summary.issues_skipped,
            "Migration finished"
        );
        Ok(summary)
    }

    async fn migrate_issue(
        &mut self,
        source_repo: &RepoInfo,
        target_repo: &RepoInfo,
        filters: &CommentFilters,
        issue: Issue,
        target_issues: &mut IssuesBuffer<T::Issues>,
    ) -> Result<IssueOutcome, MigrateError> {
        info!(url = %issue.html_url, "Migrating");

        if let Some(existing) = target_issues.get(issue.number).await? {
            info!(existing = %existing.html_url, "Already exists, skipping");
            return Ok(IssueOutcome::Skipped {
                number: issue.number,
                existing_url: existing.html_url,
            });
        }

        let number = issue.number;
        let detail = self.fetch_detail(source_repo, issue).await?;

        if self.members.is_none() {
            let members = self.target.list_members().await?;
            debug!(count = members.len(), "Loaded target members");
            self.members = Some(members);
        }
        let members = self.members.as_deref().unwrap_or_default();

        let payload = PayloadBuilder::new(source_repo, target_repo, filters, members).build(&detail);

        if self.options.dry_run() {
            info!(
                title = %payload.issue.title,
                comments = payload.comments.len(),
                "Dry run, not importing"
            );
            return Ok(IssueOutcome::DryRun {
                number,
                comments: payload.comments.len(),
            });
        }

        let delay = self.options.before_import_delay();
        if !delay.is_zero() {
            self.sleeper.sleep(delay).await;
        }

        let job = self.target.import(&payload).await?;
        info!(id = job.id, status = %job.status, "Import submitted");

        ImportPoller::new(self.options.backoff(), &self.sleeper)
            .wait(&self.target, &job)
            .await?;
        info!(id = job.id, "Imported");

        Ok(IssueOutcome::Imported {
            number,
            import_id: job.id,
        })
    }

    /// Fetches comments, events and, for pull requests, the review data.
    async fn fetch_detail(
        &self,
        source_repo: &RepoInfo,
        issue: Issue,
    ) -> Result<IssueDetail, MigrateError> {
        let number = issue.number;
        let comments = self.source.list_comments(number).await?;
        let events = self.source.list_events(number).await?;
        let detail = IssueDetail::new(issue, comments, events);

        if !detail.issue.is_pull_request() {
            return Ok(detail);
        }

        let pull_request = self.source.get_pull_request(number).await?;
        let commits = self.source.list_pull_request_commits(number).await?;
        let base_repo = pull_request
            .base
            .repo
            .as_ref()
            .map_or(source_repo.full_name.as_str(), |repo| repo.full_name.as_str());
        let diff = self
            .source
            .get_compare(base_repo, &pull_request.base.sha, &pull_request.head.sha)
            .await?;
        let reviews = self.source.list_reviews(number).await?;
        let review_comments = self.source.list_review_comments(number).await?;
        debug!(
            commits = commits.len(),
            reviews = reviews.len(),
            review_comments = review_comments.len(),
            "Fetched pull request detail"
        );

        Ok(detail.with_pull_request(PullRequestDetail {
            pull_request,
            commits,
            diff,
            reviews,
            review_comments,
        }))
    }
}
