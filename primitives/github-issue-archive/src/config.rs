//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::error::ArchiveError;
use crate::github::DEFAULT_API_URL;
use crate::serialize::Format;
use crate::source::{MAX_PER_PAGE, RepoRef, StateFilter};

/// Archives every issue and issue comment of a GitHub repository.
#[derive(Parser, Debug, Clone)]
#[command(name = "github-issue-archive", version)]
#[command(about = "Archives all issues and issue comments of a GitHub repository to JSON or CSV")]
pub struct Args {
    /// Repository owner (user or organization).
    #[arg(short, long, env = "GITHUB_ISSUE_ARCHIVE_OWNER")]
    pub owner: String,

    /// Repository name.
    #[arg(short, long, env = "GITHUB_ISSUE_ARCHIVE_REPO")]
    pub repo: String,

    /// GitHub token sent as a bearer credential.
    #[arg(short, long, env = "GITHUB_ISSUE_ARCHIVE_TOKEN", hide_env_values = true)]
    pub token: String,

    /// File to write. Defaults to `{owner}_{repo}.{format}`.
    #[arg(long, env = "GITHUB_ISSUE_ARCHIVE_OUT")]
    pub out: Option<PathBuf>,

    /// Output format.
    #[arg(
        short,
        long,
        env = "GITHUB_ISSUE_ARCHIVE_FORMAT",
        value_enum,
        default_value_t = Format::Csv
    )]
    pub format: Format,

    /// Which issues to list.
    #[arg(long, env = "GITHUB_ISSUE_ARCHIVE_STATE", value_enum, default_value_t = StateFilter::All)]
    pub state: StateFilter,

    /// Records requested per page (1-100).
    #[arg(long, env = "GITHUB_ISSUE_ARCHIVE_PER_PAGE", default_value_t = MAX_PER_PAGE)]
    pub per_page: u32,

    /// API root, for GitHub Enterprise or testing.
    #[arg(long, env = "GITHUB_ISSUE_ARCHIVE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "GITHUB_ISSUE_ARCHIVE_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Fetch issues and comments concurrently.
    #[arg(long, env = "GITHUB_ISSUE_ARCHIVE_PARALLEL")]
    pub parallel: bool,
}

/// Validated inputs for one archive run.
#[derive(Clone)]
pub struct RunConfig {
    pub repo: RepoRef,
    pub token: String,
    pub format: Format,
    pub output: PathBuf,
    pub state: StateFilter,
    pub per_page: u32,
    pub api_url: String,
    pub timeout: Duration,
    pub parallel: bool,
}

impl TryFrom<Args> for RunConfig {
    type Error = ArchiveError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let owner = required("owner", &args.owner)?;
        let repo = required("repo", &args.repo)?;
        let token = required("token", &args.token)?;

        if !(1..=MAX_PER_PAGE).contains(&args.per_page) {
            return Err(ArchiveError::Configuration(format!(
                "per-page must be between 1 and {MAX_PER_PAGE}, got {}",
                args.per_page
            )));
        }

        if args.timeout == 0 {
            return Err(ArchiveError::Configuration(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        let output = match args.out {
            Some(path) => path,
            None => {
                let path = default_output_path(owner, repo, args.format);
                info!(path = %path.display(), "no output path given, using default");
                path
            }
        };

        Ok(Self {
            repo: RepoRef::new(owner, repo),
            token: token.to_string(),
            format: args.format,
            output,
            state: args.state,
            per_page: args.per_page,
            api_url: args.api_url,
            timeout: Duration::from_secs(args.timeout),
            parallel: args.parallel,
        })
    }
}

fn required<'v>(name: &str, value: &'v str) -> Result<&'v str, ArchiveError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ArchiveError::Configuration(format!("missing GitHub {name}")));
    }
    Ok(trimmed)
}

/// `{owner}_{repo}.{extension}` in the working directory.
pub fn default_output_path(owner: &str, repo: &str, format: Format) -> PathBuf {
    PathBuf::from(format!("{owner}_{repo}.{}", format.extension()))
}
