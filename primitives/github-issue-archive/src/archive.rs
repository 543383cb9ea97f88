//! The in-memory archive that fetched pages are merged into.

use serde::{Deserialize, Serialize};

use crate::model::{Comment, Issue};

/// Every issue and comment fetched during one run, with running totals.
///
/// Totals are advanced by the size of each appended batch, so they always
/// match the length of the corresponding sequence. The JSON keys keep the
/// `TotalIssues`/`Issues`/`TotalComments`/`Comments` layout of existing
/// archive files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Archive {
    total_issues: usize,
    issues: Vec<Issue>,
    total_comments: usize,
    comments: Vec<Comment>,
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page of issues in fetch order.
    pub fn append_issues(&mut self, batch: Vec<Issue>) {
        self.total_issues += batch.len();
        self.issues.extend(batch);
    }

    /// Appends a page of comments in fetch order.
    pub fn append_comments(&mut self, batch: Vec<Comment>) {
        self.total_comments += batch.len();
        self.comments.extend(batch);
    }

    pub fn total_issues(&self) -> usize {
        self.total_issues
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn total_comments(&self) -> usize {
        self.total_comments
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// True when both totals match their sequence lengths.
    ///
    /// Always holds for archives built through the append operations; a
    /// deserialized file may violate it.
    pub fn is_consistent(&self) -> bool {
        self.total_issues == self.issues.len() && self.total_comments == self.comments.len()
    }
}
