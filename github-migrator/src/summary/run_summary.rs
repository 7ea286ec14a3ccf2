//! Run summary types.

use super::result::IssueOutcome;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of source issues read.
    pub issues_seen: usize,

    /// Number of issues imported into the target.
    pub issues_imported: usize,

    /// Number of issues skipped because they already exist on the target.
    pub issues_skipped: usize,

    /// Number of payloads built without submitting (dry run).
    pub issues_previewed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with an issue outcome.
    pub fn record(&mut self, outcome: &IssueOutcome) {
        self.issues_seen += 1;
        match outcome {
            IssueOutcome::Imported { .. } => self.issues_imported += 1,
            IssueOutcome::Skipped { .. } => self.issues_skipped += 1,
            IssueOutcome::DryRun { .. } => self.issues_previewed += 1,
        }
    }

    /// Returns true if every issue seen was already on the target.
    #[must_use]
    pub fn nothing_to_do(&self) -> bool {
        self.issues_skipped == self.issues_seen
    }
}
