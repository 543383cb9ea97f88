//! Shared fixtures for tests that drive the GitHub client over HTTP.

#![allow(dead_code)]

use std::path::Path;

use clap::Parser;
use github_issue_archive::{Args, RunConfig};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub const OWNER: &str = "acme";
pub const REPO: &str = "widgets";
pub const TOKEN: &str = "test-token";

pub const ISSUES_PATH: &str = "/repos/acme/widgets/issues";
pub const COMMENTS_PATH: &str = "/repos/acme/widgets/issues/comments";

pub fn issue_json(number: u64) -> Value {
    let closed = number % 2 == 0;
    let state = if closed { "closed" } else { "open" };
    let closed_at = if closed {
        json!("2024-01-16T09:30:00Z")
    } else {
        Value::Null
    };

    json!({
        "id": 5_000 + number,
        "node_id": "I_kwDOexample",
        "number": number,
        "state": state,
        "title": format!("Issue {number}"),
        "user": { "login": "octocat", "id": 583231, "type": "User" },
        "labels": [],
        "comments": number % 3,
        "url": format!("https://api.github.com/repos/acme/widgets/issues/{number}"),
        "html_url": format!("https://github.com/acme/widgets/issues/{number}"),
        "created_at": "2024-01-15T09:30:00Z",
        "updated_at": "2024-01-16T09:30:00Z",
        "closed_at": closed_at,
        "body": format!("Body of issue {number}")
    })
}

pub fn comment_json(id: u64, issue: u64) -> Value {
    json!({
        "id": id,
        "node_id": "IC_kwDOexample",
        "url": format!("https://api.github.com/repos/acme/widgets/issues/comments/{id}"),
        "html_url": format!("https://github.com/acme/widgets/issues/{issue}#issuecomment-{id}"),
        "issue_url": format!("https://api.github.com/repos/acme/widgets/issues/{issue}"),
        "user": { "login": "hubot", "id": 2, "type": "User" },
        "body": format!("Comment {id}"),
        "created_at": "2024-01-15T10:00:00Z",
        "updated_at": "2024-01-15T10:00:00Z",
        "author_association": "MEMBER"
    })
}

/// Issues numbered `first..first + len`.
pub fn issue_batch(first: u64, len: u64) -> Value {
    Value::Array((first..first + len).map(issue_json).collect())
}

/// `Link` header advertising `next` as the following page of `api_path`.
pub fn next_link(server: &MockServer, api_path: &str, next: u32, last: u32) -> String {
    format!(
        "<{uri}{api_path}?page={next}&per_page=2>; rel=\"next\", \
         <{uri}{api_path}?page={last}&per_page=2>; rel=\"last\"",
        uri = server.uri()
    )
}

/// Mounts `page` of `api_path`, optionally linking to a following page.
pub async fn mount_page(
    server: &MockServer,
    api_path: &str,
    page: u32,
    body: Value,
    next: Option<(u32, u32)>,
) {
    let mut response = ResponseTemplate::new(200).set_body_json(body);
    if let Some((next, last)) = next {
        let link = next_link(server, api_path, next, last);
        response = response.insert_header("link", link.as_str());
    }

    Mock::given(method("GET"))
        .and(path(api_path))
        .and(query_param("page", page.to_string()))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

/// Parses a run configuration pointed at `server`, writing into `dir`.
pub fn config(
    server: &MockServer,
    dir: &Path,
    extra: &[&str],
) -> Result<RunConfig, Box<dyn std::error::Error>> {
    let api_url = server.uri();
    let mut argv = vec![
        "github-issue-archive",
        "--owner",
        OWNER,
        "--repo",
        REPO,
        "--token",
        TOKEN,
        "--api-url",
        api_url.as_str(),
        "--per-page",
        "2",
        "--timeout",
        "5",
    ];
    argv.extend_from_slice(extra);

    let mut config = RunConfig::try_from(Args::try_parse_from(&argv)?)?;
    if !extra.contains(&"--out") {
        config.output = dir.join(&config.output);
    }
    Ok(config)
}
