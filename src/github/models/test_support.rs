//! Builders for pull request fixtures used in tests.

use super::PullRequestRecord;

/// Builds an open pull request with the given number, URL, and body.
#[must_use]
pub fn pull_request(number: u64, html_url: &str, body: &str) -> PullRequestRecord {
    PullRequestRecord {
        number,
        title: Some(format!("Pull request {number}")),
        state: Some("open".to_owned()),
        html_url: html_url.to_owned(),
        body: Some(body.to_owned()),
        head_label: None,
    }
}

/// JSON body GitHub returns for one entry of a pull request listing.
#[must_use]
pub fn pull_request_json(
    number: u64,
    html_url: &str,
    body: &str,
    head_label: &str,
) -> serde_json::Value {
    serde_json::json!({
        "number": number,
        "title": format!("Pull request {number}"),
        "state": "open",
        "html_url": html_url,
        "body": body,
        "head": { "label": head_label },
        "user": { "login": "octocat" }
    })
}
