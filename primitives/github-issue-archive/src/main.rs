//! GitHub Issue Archive
//!
//! Saves all issues and issue comments of a GitHub repository to a local file.
//!
//! # Usage
//!
//! ```bash
//! # CSV table of issues, written to octocat_Hello-World.csv
//! github-issue-archive --owner octocat --repo Hello-World --token "$GITHUB_TOKEN"
//!
//! # Full JSON archive including comments
//! github-issue-archive -o octocat -r Hello-World -t "$GITHUB_TOKEN" --format json --out archive.json
//!
//! # Fetch issues and comments concurrently, with page-level logging
//! GITHUB_ISSUE_ARCHIVE_TOKEN=... RUST_LOG=debug github-issue-archive -o octocat -r Hello-World --parallel
//! ```

use anyhow::Context;
use clap::Parser;
use github_issue_archive::{Args, GitHubSource, RunConfig, run};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logs to stderr, filtered by `RUST_LOG` (default `info`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

async fn try_main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = RunConfig::try_from(args)?;

    let source = GitHubSource::new(&config.api_url, config.token.clone(), config.timeout)
        .context("failed to create GitHub client")?;

    run(&source, &config)
        .await
        .with_context(|| format!("failed to archive {}", config.repo))?;

    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
