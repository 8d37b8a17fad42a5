//! Pull request data returned by GitHub and kept in the resolver cache.
//!
//! `ApiPullRequest` is the deserialisation target for the REST listing; it
//! converts into the public [`PullRequestRecord`].

use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// A pull request as far as link rendering is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    /// Pull request number.
    pub number: u64,
    /// Title of the pull request.
    pub title: Option<String>,
    /// State (e.g. open, closed).
    pub state: Option<String>,
    /// HTML URL for displaying to a user.
    pub html_url: String,
    /// Description text; GitHub sends `null` for an empty description.
    pub body: Option<String>,
    /// `organization:branch` label of the head.
    pub head_label: Option<String>,
}

impl PullRequestRecord {
    /// URL shown as the first link.
    #[must_use]
    pub fn display_url(&self) -> &str {
        &self.html_url
    }

    /// Description text, empty when GitHub has none.
    #[must_use]
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) number: u64,
    pub(super) title: Option<String>,
    pub(super) state: Option<String>,
    pub(super) html_url: String,
    pub(super) body: Option<String>,
    pub(super) head: Option<ApiHead>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiHead {
    pub(super) label: Option<String>,
}

impl From<ApiPullRequest> for PullRequestRecord {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            number: value.number,
            title: value.title,
            state: value.state,
            html_url: value.html_url,
            body: value.body,
            head_label: value.head.and_then(|head| head.label),
        }
    }
}
