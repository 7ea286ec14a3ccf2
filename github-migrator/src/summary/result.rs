//! Per-issue outcomes.

/// Result of migrating a single source issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// Payload submitted and the import job completed.
    Imported {
        /// Source issue number.
        number: u64,
        /// Import job identifier.
        import_id: u64,
    },

    /// An issue with the same number already exists on the target.
    Skipped {
        /// Source issue number.
        number: u64,
        /// Web URL of the existing target issue.
        existing_url: String,
    },

    /// Payload built but not submitted.
    DryRun {
        /// Source issue number.
        number: u64,
        /// Number of comments the payload would create.
        comments: usize,
    },
}
