//! GitHub REST client implementing [`IssueSource`].
//!
//! Lists `GET /repos/{owner}/{repo}/issues` and the repository-wide
//! `GET /repos/{owner}/{repo}/issues/comments` through [`Octocrab`]. The next
//! page number comes from the `page` parameter of the `rel="next"` link that
//! octocrab reads off each response.

use std::time::Duration;

use http::Uri;
use http::header::{ACCEPT, HeaderName};
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::model::{Comment, Issue};
use crate::source::{IssueSource, Page, PageCursor, RepoRef, SourceError, StateFilter};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const MEDIA_TYPE: &str = "application/vnd.github+json";

/// Authenticated client for one GitHub (or GitHub Enterprise) API root.
pub struct GitHubSource {
    client: Octocrab,
}

/// Query string of a listing request.
#[derive(Debug, Serialize)]
struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'static str>,
    page: u32,
    per_page: u32,
}

impl GitHubSource {
    /// Builds a client for `base_url`. Failed requests are never retried.
    pub fn new(
        base_url: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Octocrab::builder()
            .base_uri(base_url)
            .map_err(|e| SourceError::InvalidUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?
            .personal_token(token.into())
            .add_header(ACCEPT, MEDIA_TYPE.to_string())
            .add_header(
                HeaderName::from_static("x-github-api-version"),
                API_VERSION.to_string(),
            )
            .add_retry_config(RetryConfig::None)
            .set_connect_timeout(Some(timeout))
            .set_read_timeout(Some(timeout))
            .build()
            .map_err(SourceError::Api)?;

        Ok(Self { client })
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        route: String,
        params: ListParams,
    ) -> Result<Page<T>, SourceError> {
        debug!(%route, ?params, "requesting page");

        let page: octocrab::Page<T> = self
            .client
            .get(&route, Some(&params))
            .await
            .map_err(api_error)?;

        let next_page = next_page_number(page.next.as_ref())?;
        Ok(Page {
            items: page.items,
            next_page,
        })
    }
}

impl IssueSource for GitHubSource {
    async fn list_issues(
        &self,
        repo: &RepoRef,
        cursor: PageCursor,
        state: StateFilter,
    ) -> Result<Page<Issue>, SourceError> {
        let route = format!("/repos/{}/{}/issues", repo.owner, repo.name);
        let params = ListParams {
            state: Some(state.as_str()),
            page: cursor.page,
            per_page: cursor.per_page,
        };
        self.get_page(route, params).await
    }

    async fn list_comments(
        &self,
        repo: &RepoRef,
        cursor: PageCursor,
    ) -> Result<Page<Comment>, SourceError> {
        let route = format!("/repos/{}/{}/issues/comments", repo.owner, repo.name);
        let params = ListParams {
            state: None,
            page: cursor.page,
            per_page: cursor.per_page,
        };
        self.get_page(route, params).await
    }
}

/// Classifies a failed request. GitHub answers an exhausted rate limit with
/// 429, or with 403 and a message naming the limit.
fn api_error(err: octocrab::Error) -> SourceError {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            let message = source.message;
            match status {
                401 => SourceError::Unauthorized { message },
                429 => SourceError::RateLimited { message },
                403 if message.to_ascii_lowercase().contains("rate limit") => {
                    SourceError::RateLimited { message }
                }
                _ => SourceError::Status { status, message },
            }
        }
        other => SourceError::Api(other),
    }
}

/// Page number of the `rel="next"` link, `None` when there is no such link.
///
/// A next link without a numeric `page` parameter (a cursor link such as
/// `?after=...`) is an error: the walker cannot address it by number.
fn next_page_number(next: Option<&Uri>) -> Result<Option<u32>, SourceError> {
    let Some(link) = next else {
        return Ok(None);
    };

    link.query()
        .into_iter()
        .flat_map(|query| query.split('&'))
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|page| page.parse::<u32>().ok())
        .filter(|page| *page > 0)
        .map(Some)
        .ok_or_else(|| SourceError::Pagination {
            link: link.to_string(),
        })
}
