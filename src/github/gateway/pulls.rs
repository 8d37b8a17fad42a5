//! Octocrab implementation of the pull request gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use tokio::sync::Mutex;
use url::Url;

use crate::github::error::GitHubError;
use crate::github::locator::{HeadLabel, PersonalAccessToken, RepositoryLocator};
use crate::github::models::{ApiPullRequest, PullRequestRecord};

use super::PullRequestGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;

struct CachedClient {
    token: PersonalAccessToken,
    api_base: Url,
    client: Octocrab,
}

/// Octocrab-backed gateway.
///
/// The token comes from the link configuration, which can change at any
/// time, so the client is rebuilt whenever the token or API base differs
/// from the previous call.
#[derive(Default)]
pub struct OctocrabGateway {
    cached: Mutex<Option<CachedClient>>,
}

impl OctocrabGateway {
    /// Creates a gateway with no client built yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn client_for(
        &self,
        token: &PersonalAccessToken,
        api_base: &Url,
    ) -> Result<Octocrab, GitHubError> {
        let mut cached = self.cached.lock().await;

        if let Some(entry) = cached
            .as_ref()
            .filter(|entry| entry.token == *token && entry.api_base == *api_base)
        {
            return Ok(entry.client.clone());
        }

        let client = build_octocrab_client(token, api_base)?;
        *cached = Some(CachedClient {
            token: token.clone(),
            api_base: api_base.clone(),
            client: client.clone(),
        });
        Ok(client)
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn pulls_for_head(
        &self,
        token: &PersonalAccessToken,
        repository: &RepositoryLocator,
        head: &HeadLabel,
    ) -> Result<Vec<PullRequestRecord>, GitHubError> {
        let client = self.client_for(token, repository.api_base()).await?;
        let query_params = [("head", head.as_str())];

        let page: Page<ApiPullRequest> = client
            .get(repository.pulls_path(), Some(&query_params))
            .await
            .map_err(|error| map_octocrab_error("list pulls", &error))?;

        Ok(page
            .items
            .into_iter()
            .map(ApiPullRequest::into)
            .collect())
    }
}
