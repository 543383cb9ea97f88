//! GitHub Issue Archive - Issue and Comment Exporter
//!
//! Walks the paginated issue and repository-wide comment listings of one
//! GitHub repository, accumulates every record into an [`Archive`], and writes
//! the result as pretty-printed JSON or as a CSV table of issues.
//!
//! The walk is fail-fast: the first failed page request aborts the run and no
//! output file is written.

pub mod archive;
pub mod config;
pub mod error;
pub mod github;
pub mod model;
pub mod run;
pub mod serialize;
pub mod source;
pub mod walker;

#[cfg(test)]
mod test_support;

pub use archive::Archive;
pub use config::{Args, RunConfig};
pub use error::{ArchiveError, Stream};
pub use github::GitHubSource;
pub use run::{RunSummary, collect_archive, run};
pub use serialize::Format;
pub use source::{IssueSource, Page, PageCursor, RepoRef, SourceError, StateFilter};
pub use walker::PageWalker;
