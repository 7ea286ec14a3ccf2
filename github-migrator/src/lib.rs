#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod builder;
pub mod config;
pub mod dedup;
pub mod filters;
pub mod github;
pub mod migrator;
pub mod model;
pub mod poller;
pub mod rate_limit;
pub mod repo;
pub mod runner;
pub mod summary;
pub mod threads;

pub use builder::PayloadBuilder;
pub use config::{load_config, parse_endpoint, ConfigError, FileConfig};
pub use dedup::IssuesBuffer;
pub use filters::{CommentFilter, CommentFilters, UserMapping};
pub use github::{build_client, GitHubRepo, IssuePager};
pub use migrator::{MigrateError, Migrator, MigratorOptions};
pub use poller::{Backoff, ImportPoller, PollState, Sleep, TokioSleep};
pub use rate_limit::{check_core_rate_limit, ensure_core_rate_limit, wait_if_needed, RateLimitInfo};
pub use repo::{IssueStream, SourceRepo, TargetRepo};
pub use runner::{Endpoint, Runner, RunnerConfig, RunnerError};
pub use summary::{IssueOutcome, RunSummary};
pub use threads::{reconstruct_threads, ReviewThread};
