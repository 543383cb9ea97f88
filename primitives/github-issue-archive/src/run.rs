//! One archive run: walk both listings, then serialize.

use std::path::PathBuf;

use tokio::sync::Mutex;
use tracing::info;

use crate::archive::Archive;
use crate::config::RunConfig;
use crate::error::ArchiveError;
use crate::serialize;
use crate::source::IssueSource;
use crate::walker::PageWalker;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub issues: usize,
    pub comments: usize,
    pub output: PathBuf,
    pub bytes: usize,
}

/// Fetches every issue and comment into a fresh archive.
///
/// Issues are walked before comments unless `config.parallel` is set, in
/// which case both walks run concurrently and the first error wins.
pub async fn collect_archive<S: IssueSource>(
    source: &S,
    config: &RunConfig,
) -> Result<Archive, ArchiveError> {
    let archive = Mutex::new(Archive::new());
    let walker = PageWalker::new(source, &config.repo, config.per_page, config.state);

    if config.parallel {
        tokio::try_join!(
            walker.fetch_all_issues(&archive),
            walker.fetch_all_comments(&archive)
        )?;
    } else {
        walker.fetch_all_issues(&archive).await?;
        walker.fetch_all_comments(&archive).await?;
    }

    Ok(archive.into_inner())
}

/// Runs the whole archive job against `source`.
///
/// The output file is only touched after both walks succeed.
pub async fn run<S: IssueSource>(
    source: &S,
    config: &RunConfig,
) -> Result<RunSummary, ArchiveError> {
    let archive = collect_archive(source, config).await?;
    let bytes = serialize::write_archive(&archive, config.format, &config.output)?;

    let summary = RunSummary {
        issues: archive.total_issues(),
        comments: archive.total_comments(),
        output: config.output.clone(),
        bytes,
    };
    info!(
        repo = %config.repo,
        issues = summary.issues,
        comments = summary.comments,
        path = %summary.output.display(),
        "archive saved"
    );
    Ok(summary)
}
