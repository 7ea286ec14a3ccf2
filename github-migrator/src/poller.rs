//! Waiting for asynchronous import jobs.
//!
//! The import endpoint accepts a payload immediately and processes it later.
//! A second import of the same issue before the first finishes would create a
//! duplicate, so each job is polled to a terminal status before moving on.

#![allow(async_fn_in_trait)]

use crate::migrator::MigrateError;
use crate::model::{ImportResult, ImportStatus};
use crate::repo::TargetRepo;
use std::time::Duration;
use tracing::{debug, info};

/// Default wait before the first status check.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Default number of status checks before giving up.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 5;

/// Timed waits between status checks.
pub trait Sleep {
    async fn sleep(&self, duration: Duration);
}

impl<Z: Sleep> Sleep for &Z {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleep;

impl Sleep for TokioSleep {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Bounded exponential backoff schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    initial: Duration,
    max_attempts: u32,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_MAX_POLL_ATTEMPTS)
    }
}

impl Backoff {
    /// Creates a schedule starting at `initial` with at most `max_attempts` checks.
    #[must_use]
    pub fn new(initial: Duration, max_attempts: u32) -> Self {
        Self {
            initial,
            max_attempts,
        }
    }

    /// Maximum number of status checks.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait before the status check numbered `attempt` (starting at 1).
    ///
    /// The first two checks wait the initial interval; each later check waits
    /// twice as long as the one before.
    #[must_use]
    pub fn interval(&self, attempt: u32) -> Duration {
        if attempt <= 2 {
            return self.initial;
        }
        self.initial.saturating_mul(2u32.saturating_pow(attempt - 2))
    }
}

/// Progress of one import job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Accepted, not yet checked.
    Submitted,
    /// Checked `attempt` times without a terminal status.
    Pending { attempt: u32 },
    Imported,
    Failed,
    ExceededRetries { attempts: u32 },
}

impl PollState {
    /// State after the status check numbered `attempt` returned `status`.
    #[must_use]
    pub fn after_check(attempt: u32, status: &ImportStatus, max_attempts: u32) -> Self {
        match status {
            ImportStatus::Imported => Self::Imported,
            ImportStatus::Failed => Self::Failed,
            _ if attempt >= max_attempts => Self::ExceededRetries { attempts: attempt },
            _ => Self::Pending { attempt },
        }
    }
}

/// Polls import jobs to completion.
pub struct ImportPoller<Z> {
    backoff: Backoff,
    sleeper: Z,
}

impl<Z: Sleep> ImportPoller<Z> {
    /// Creates a poller using `backoff` and waiting through `sleeper`.
    pub fn new(backoff: Backoff, sleeper: Z) -> Self {
        Self { backoff, sleeper }
    }

    /// Waits until the job reaches a terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::ImportFailed`] if the target reports failure,
    /// [`MigrateError::RetryExhausted`] if no terminal status is reached within
    /// the retry budget, and propagates status check errors.
    pub async fn wait<T: TargetRepo>(
        &self,
        target: &T,
        job: &ImportResult,
    ) -> Result<(), MigrateError> {
        let mut state = PollState::Submitted;
        loop {
            let attempt = match state {
                PollState::Submitted => 1,
                PollState::Pending { attempt } => attempt + 1,
                PollState::Imported => return Ok(()),
                PollState::Failed => return Err(MigrateError::ImportFailed { id: job.id }),
                PollState::ExceededRetries { attempts } => {
                    return Err(MigrateError::RetryExhausted {
                        id: job.id,
                        attempts,
                    })
                }
            };

            let interval = self.backoff.interval(attempt);
            debug!(
                id = job.id,
                attempt,
                wait_ms = interval.as_millis() as u64,
                "Waiting for import"
            );
            self.sleeper.sleep(interval).await;

            let result = target.get_import(job.id).await?;
            info!(id = job.id, attempt, status = %result.status, "Import status check");
            state = PollState::after_check(attempt, &result.status, self.backoff.max_attempts);
        }
    }
}
