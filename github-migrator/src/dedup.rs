//! Lookup of issues that already exist on the target.

use crate::migrator::MigrateError;
use crate::model::Issue;
use crate::repo::IssueStream;
use std::collections::VecDeque;
use tracing::debug;

/// Forward-only cache over the target's issue listing.
///
/// Lookups must come in non-decreasing order of issue number, matching the
/// order in which the source issues are walked. Issues read past the requested
/// number are kept for later lookups.
pub struct IssuesBuffer<I> {
    issues: I,
    buffer: VecDeque<Issue>,
    exhausted: bool,
    last_requested: Option<u64>,
}

impl<I: IssueStream> IssuesBuffer<I> {
    /// Wraps a target issue stream.
    pub fn new(issues: I) -> Self {
        Self {
            issues,
            buffer: VecDeque::new(),
            exhausted: false,
            last_requested: None,
        }
    }

    /// Returns the target issue numbered `number`, if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::NonMonotonicLookup`] if `number` is lower than a
    /// previous lookup, and propagates listing errors unchanged.
    pub async fn get(&mut self, number: u64) -> Result<Option<Issue>, MigrateError> {
        if let Some(last) = self.last_requested {
            if number < last {
                return Err(MigrateError::NonMonotonicLookup {
                    requested: number,
                    last,
                });
            }
        }
        self.last_requested = Some(number);

        while self.buffer.front().is_some_and(|issue| issue.number < number) {
            self.buffer.pop_front();
        }

        while self.buffer.is_empty() && !self.exhausted {
            match self.issues.next().await? {
                Some(issue) if issue.number < number => {}
                Some(issue) => self.buffer.push_back(issue),
                None => {
                    debug!("Target issue listing exhausted");
                    self.exhausted = true;
                }
            }
        }

        match self.buffer.front() {
            Some(issue) if issue.number == number => Ok(Some(issue.clone())),
            _ => Ok(None),
        }
    }
}
