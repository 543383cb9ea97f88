//! Contract between the page walker and a paginated remote issue source.

use std::fmt;
use std::future::Future;

use clap::ValueEnum;
use thiserror::Error;

use crate::model::{Comment, Issue};

/// Largest page size the GitHub API honours.
pub const MAX_PER_PAGE: u32 = 100;

/// Owner and name of the repository being archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Position of the next page request. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u32,
    pub per_page: u32,
}

impl PageCursor {
    pub fn first(per_page: u32) -> Self {
        Self { page: 1, per_page }
    }

    #[must_use]
    pub fn advance(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }
}

/// One batch of records plus the source's continuation signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of the following page, `None` when this is the last one.
    pub next_page: Option<u32>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }
}

/// Which issues the listing should return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StateFilter {
    Open,
    Closed,
    #[default]
    All,
}

impl StateFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// Failure of a single page request.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("GitHub request failed: {0}")]
    Api(#[source] octocrab::Error),

    #[error("authentication rejected: {message}")]
    Unauthorized { message: String },

    #[error("API rate limit exhausted: {message}")]
    RateLimited { message: String },

    #[error("API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid API URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("next-page link carries no page number: {link}")]
    Pagination { link: String },
}

/// A paginated listing of a repository's issues and comments.
pub trait IssueSource {
    /// Fetches one page of issues matching `state`.
    fn list_issues(
        &self,
        repo: &RepoRef,
        cursor: PageCursor,
        state: StateFilter,
    ) -> impl Future<Output = Result<Page<Issue>, SourceError>>;

    /// Fetches one page of the repository-wide comment listing.
    fn list_comments(
        &self,
        repo: &RepoRef,
        cursor: PageCursor,
    ) -> impl Future<Output = Result<Page<Comment>, SourceError>>;
}
