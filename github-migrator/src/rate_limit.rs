//! Core API rate limit guard for import submissions.
//!
//! Every import costs a core request plus one per status check, so long runs
//! can drain the hourly budget. Before each submission the remaining budget is
//! read and, when nearly spent, the run pauses until the window resets.
//! GitHub Enterprise instances with rate limiting disabled answer the check
//! with an error; that only produces a warning.

use crate::poller::Sleep;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use std::time::Duration;
use tracing::{info, warn};

/// Longest pause for a single window reset.
const MAX_PAUSE: Duration = Duration::from_secs(3600);

/// Pause once fewer requests than this remain.
const LOW_WATERMARK: u32 = 5;

/// Snapshot of the core rate limit window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub remaining: u32,
    pub limit: u32,
    /// When the window resets.
    pub reset_at: DateTime<Utc>,
}

impl RateLimitInfo {
    /// Pause needed at `now` before the next import.
    ///
    /// `None` while the budget is above the watermark or once the window has
    /// reset.
    #[must_use]
    pub fn pause_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        if self.remaining >= LOW_WATERMARK {
            return None;
        }
        let pause = (self.reset_at - now).to_std().ok()?;
        if pause.is_zero() {
            return None;
        }
        if pause > MAX_PAUSE {
            warn!(
                reset_at = %self.reset_at,
                "Rate limit reset is more than an hour away, pausing for an hour"
            );
        }
        Some(pause.min(MAX_PAUSE))
    }
}

/// Reads the core rate limit window.
///
/// # Errors
///
/// Returns an error if the rate limit endpoint cannot be read.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let core = octocrab.ratelimit().get().await?.resources.core;
    let reset_at = i64::try_from(core.reset)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);

    Ok(RateLimitInfo {
        remaining: u32::try_from(core.remaining).unwrap_or(u32::MAX),
        limit: u32::try_from(core.limit).unwrap_or(u32::MAX),
        reset_at,
    })
}

/// Pauses through `sleeper` when `info` calls for it. Returns whether it paused.
pub async fn wait_if_needed<Z: Sleep>(info: &RateLimitInfo, now: DateTime<Utc>, sleeper: &Z) -> bool {
    let Some(pause) = info.pause_at(now) else {
        return false;
    };

    info!(
        remaining = info.remaining,
        limit = info.limit,
        pause_secs = pause.as_secs(),
        "Rate limit low, pausing until reset"
    );
    sleeper.sleep(pause).await;
    true
}

/// Checks the core rate limit and pauses if it is nearly spent.
pub async fn ensure_core_rate_limit<Z: Sleep>(octocrab: &Octocrab, sleeper: &Z) {
    match check_core_rate_limit(octocrab).await {
        Ok(info) => {
            wait_if_needed(&info, Utc::now(), sleeper).await;
        }
        Err(e) => warn!(error = %e, "Rate limit check failed, continuing"),
    }
}
