//! Fixtures and an in-memory [`IssueSource`] for unit tests.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, TimeZone, Utc};

use crate::error::Stream;
use crate::model::{Comment, Issue, IssueState, User};
use crate::source::{IssueSource, Page, PageCursor, RepoRef, SourceError, StateFilter};

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

pub(crate) fn issue(number: u64) -> Issue {
    Issue {
        id: 1_000 + number,
        number,
        state: IssueState::Open,
        title: format!("Issue {number}"),
        user: Some(User {
            login: "octocat".to_string(),
            id: 583231,
        }),
        comments: 1,
        url: format!("https://api.github.com/repos/acme/widgets/issues/{number}"),
        html_url: format!("https://github.com/acme/widgets/issues/{number}"),
        created_at: fixed_time(),
        updated_at: fixed_time(),
        closed_at: None,
        body: Some(format!("Body of issue {number}")),
    }
}

pub(crate) fn comment(id: u64, issue_number: u64) -> Comment {
    Comment {
        id,
        url: format!("https://api.github.com/repos/acme/widgets/issues/comments/{id}"),
        html_url: format!(
            "https://github.com/acme/widgets/issues/{issue_number}#issuecomment-{id}"
        ),
        issue_url: format!("https://api.github.com/repos/acme/widgets/issues/{issue_number}"),
        user: Some(User {
            login: "hubot".to_string(),
            id: 2,
        }),
        body: Some(format!("Comment {id}")),
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

/// `pages` pages of `per_page` issues numbered from 1, last page `last` long.
pub(crate) fn issue_pages(pages: usize, per_page: usize, last: usize) -> Vec<Vec<Issue>> {
    let mut next = 1;
    (0..pages)
        .map(|index| {
            let len = if index + 1 == pages { last } else { per_page };
            let page = (next..next + len as u64).map(issue).collect();
            next += len as u64;
            page
        })
        .collect()
}

/// Serves canned pages and records every request it receives.
#[derive(Default)]
pub(crate) struct FakeSource {
    pub issue_pages: Vec<Vec<Issue>>,
    pub comment_pages: Vec<Vec<Comment>>,
    /// Page of the given stream that fails instead of answering.
    pub fail_on: Option<(Stream, u32)>,
    pub requests: Mutex<Vec<(Stream, PageCursor)>>,
}

impl FakeSource {
    pub fn with_issues(issue_pages: Vec<Vec<Issue>>) -> Self {
        Self {
            issue_pages,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<(Stream, PageCursor)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn requested_pages(&self, stream: Stream) -> Vec<u32> {
        self.requests()
            .into_iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, cursor)| cursor.page)
            .collect()
    }

    fn serve<T: Clone>(
        &self,
        stream: Stream,
        pages: &[Vec<T>],
        cursor: PageCursor,
    ) -> Result<Page<T>, SourceError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((stream, cursor));

        if self.fail_on == Some((stream, cursor.page)) {
            return Err(SourceError::Status {
                status: 502,
                message: "Bad Gateway".to_string(),
            });
        }

        let index = cursor.page as usize - 1;
        let items = pages.get(index).cloned().unwrap_or_default();
        let next_page = (index + 1 < pages.len()).then_some(cursor.page + 1);
        Ok(Page { items, next_page })
    }
}

impl IssueSource for FakeSource {
    async fn list_issues(
        &self,
        _repo: &RepoRef,
        cursor: PageCursor,
        _state: StateFilter,
    ) -> Result<Page<Issue>, SourceError> {
        tokio::task::yield_now().await;
        self.serve(Stream::Issues, &self.issue_pages, cursor)
    }

    async fn list_comments(
        &self,
        _repo: &RepoRef,
        cursor: PageCursor,
    ) -> Result<Page<Comment>, SourceError> {
        tokio::task::yield_now().await;
        self.serve(Stream::Comments, &self.comment_pages, cursor)
    }
}
