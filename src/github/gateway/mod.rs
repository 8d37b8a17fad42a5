//! Gateways for listing pull requests through Octocrab.
//!
//! The resolver only needs one capability from the repository host: "list the
//! pull requests whose head is this label". The trait keeps that seam
//! mockable; [`OctocrabGateway`] performs the real HTTP requests.

mod client;
mod error_mapping;
mod pulls;

pub use pulls::OctocrabGateway;

use async_trait::async_trait;

use crate::github::error::GitHubError;
use crate::github::locator::{HeadLabel, PersonalAccessToken, RepositoryLocator};
use crate::github::models::PullRequestRecord;

/// Gateway that can look up pull requests by head label.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// List the pull requests on `repository` whose head equals `head`.
    async fn pulls_for_head(
        &self,
        token: &PersonalAccessToken,
        repository: &RepositoryLocator,
        head: &HeadLabel,
    ) -> Result<Vec<PullRequestRecord>, GitHubError>;
}
