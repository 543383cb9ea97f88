//! Drains paginated issue and comment listings into an [`Archive`].
//!
//! Each stream is walked with an explicit cursor: request a page, append it,
//! advance while the source reports a next page. The first failed request
//! ends the walk; nothing is retried.

use std::future::Future;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::archive::Archive;
use crate::error::{ArchiveError, Stream};
use crate::source::{IssueSource, Page, PageCursor, RepoRef, SourceError, StateFilter};

/// Walks one repository's listings on a single [`IssueSource`].
///
/// The archive is shared through a mutex so the issue and comment walks can
/// run concurrently; each append holds the lock for one batch.
pub struct PageWalker<'a, S> {
    source: &'a S,
    repo: &'a RepoRef,
    per_page: u32,
    state: StateFilter,
}

impl<'a, S: IssueSource> PageWalker<'a, S> {
    pub fn new(source: &'a S, repo: &'a RepoRef, per_page: u32, state: StateFilter) -> Self {
        Self {
            source,
            repo,
            per_page,
            state,
        }
    }

    /// Appends every issue of the repository to `archive`, in server order.
    ///
    /// Returns the number of issues fetched.
    pub async fn fetch_all_issues(&self, archive: &Mutex<Archive>) -> Result<usize, ArchiveError> {
        self.walk(
            Stream::Issues,
            archive,
            |cursor| self.source.list_issues(self.repo, cursor, self.state),
            Archive::append_issues,
        )
        .await
    }

    /// Appends every comment in the repository-wide listing to `archive`.
    ///
    /// Returns the number of comments fetched.
    pub async fn fetch_all_comments(
        &self,
        archive: &Mutex<Archive>,
    ) -> Result<usize, ArchiveError> {
        self.walk(
            Stream::Comments,
            archive,
            |cursor| self.source.list_comments(self.repo, cursor),
            Archive::append_comments,
        )
        .await
    }

    async fn walk<T, F, Fut>(
        &self,
        stream: Stream,
        archive: &Mutex<Archive>,
        mut fetch: F,
        append: fn(&mut Archive, Vec<T>),
    ) -> Result<usize, ArchiveError>
    where
        F: FnMut(PageCursor) -> Fut,
        Fut: Future<Output = Result<Page<T>, SourceError>>,
    {
        let mut cursor = PageCursor::first(self.per_page);
        let mut fetched = 0;

        loop {
            let page = fetch(cursor).await.map_err(|source| ArchiveError::Transport {
                stream,
                page: cursor.page,
                source,
            })?;

            let has_next = page.has_next();
            let batch = page.items.len();
            append(&mut *archive.lock().await, page.items);
            fetched += batch;
            debug!(
                repo = %self.repo,
                %stream,
                page = cursor.page,
                batch,
                has_next,
                "page appended"
            );

            if !has_next {
                break;
            }
            cursor = cursor.advance();
        }

        info!(repo = %self.repo, %stream, pages = cursor.page, fetched, "walk complete");
        Ok(fetched)
    }
}
