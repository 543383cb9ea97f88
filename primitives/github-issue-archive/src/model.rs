//! Issue and comment records as returned by the GitHub REST API.
//!
//! Only the attributes the archive keeps are modelled; unknown fields in the
//! API payload are ignored on deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account that authored an issue or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub id: u64,
}

/// Open/closed state of a single issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// One repository issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub state: IssueState,
    pub title: String,
    /// `null` in the API for some deleted accounts.
    pub user: Option<User>,
    /// Number of comments on the issue.
    pub comments: u64,
    /// API URL of the issue.
    pub url: String,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Absent while the issue is open.
    pub closed_at: Option<DateTime<Utc>>,
    pub body: Option<String>,
}

impl Issue {
    /// Login of the author, or an empty string when the API reports none.
    pub fn author_login(&self) -> &str {
        self.user.as_ref().map_or("", |user| user.login.as_str())
    }
}

/// One issue comment, as listed repository-wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub url: String,
    pub html_url: String,
    /// API URL of the issue the comment belongs to.
    pub issue_url: String,
    pub user: Option<User>,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Number of the parent issue, taken from the trailing segment of `issue_url`.
    pub fn issue_number(&self) -> Option<u64> {
        self.issue_url.rsplit('/').next()?.parse().ok()
    }
}
