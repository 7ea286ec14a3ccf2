//! CLI for the GitHub migrator.
//!
//! Migrates issues, pull requests, comments and review threads from one
//! repository to another through the target's issue import API.

use clap::Parser;
use github_migrator::{Endpoint, RunSummary, Runner, RunnerConfig, RunnerError, UserMapping};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// GitHub Migrator - Migrate issues and pull requests between repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source repository ("owner/name").
    source: String,

    /// Target repository ("owner/name").
    target: String,

    /// API token for the source.
    #[arg(long, env = "GITHUB_MIGRATOR_SOURCE_API_TOKEN", hide_env_values = true)]
    source_token: String,

    /// API token for the target.
    #[arg(long, env = "GITHUB_MIGRATOR_TARGET_API_TOKEN", hide_env_values = true)]
    target_token: String,

    /// API endpoint for the source.
    #[arg(
        long,
        env = "GITHUB_MIGRATOR_SOURCE_API_ENDPOINT",
        default_value = "https://api.github.com"
    )]
    source_endpoint: String,

    /// API endpoint for the target.
    #[arg(
        long,
        env = "GITHUB_MIGRATOR_TARGET_API_ENDPOINT",
        default_value = "https://api.github.com"
    )]
    target_endpoint: String,

    /// User mapping ("src:dst,src2:dst2").
    #[arg(long, env = "GITHUB_MIGRATOR_USERS_MAPPING", default_value = "")]
    users_mapping: String,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Build payloads without importing anything.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Fails only when a provider is already installed.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse arguments
    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(0)
        }
        Err(e) => {
            error!(error = %e, "Migration failed");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let source = Endpoint::new(args.source, args.source_token).with_api_url(args.source_endpoint);
    let target = Endpoint::new(args.target, args.target_token).with_api_url(args.target_endpoint);

    let mut config = RunnerConfig::new(
        source,
        target,
        UserMapping::parse(&args.users_mapping),
        args.dry_run,
    );
    if let Some(path) = args.config {
        config = config.with_config_path(path);
    }

    let runner = Runner::new(config).await?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Issues seen: {}", summary.issues_seen);
    println!("  Issues skipped (already migrated): {}", summary.issues_skipped);

    if summary.dry_run {
        println!("  Issues previewed: {}", summary.issues_previewed);
    } else {
        println!("  Issues imported: {}", summary.issues_imported);
    }

    if summary.nothing_to_do() {
        println!("  Target is up to date");
    }
}
