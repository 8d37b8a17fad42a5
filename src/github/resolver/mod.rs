//! Branch to pull request resolution.
//!
//! The resolver checks the cache first and only asks GitHub on a miss. A
//! found pull request is cached under its branch. Whether an empty listing is
//! cached depends on the [`NoMatchPolicy`].

mod cache;

pub use cache::{CACHE_KEY_PREFIX, CachedLookup, PullRequestCache};

use std::sync::Arc;

use url::Url;

use crate::github::error::GitHubError;
use crate::github::gateway::PullRequestGateway;
use crate::github::locator::{HeadLabel, PersonalAccessToken, RepositoryLocator};
use crate::github::models::PullRequestRecord;
use crate::persistence::PersistenceError;
use crate::settings::Configuration;
use crate::telemetry::{LookupOutcome, NoopTelemetrySink, TelemetryEvent, TelemetrySink};
use crate::transifex::{BranchIdentifier, RouteDescriptor};

/// What to do when GitHub lists no pull request for a branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoMatchPolicy {
    /// Leave the cache untouched so the next cycle asks GitHub again.
    #[default]
    Requery,
    /// Cache the empty result so later cycles skip the request.
    Remember,
}

/// Resolves branches to pull requests through the cache and GitHub.
pub struct PullRequestResolver {
    gateway: Arc<dyn PullRequestGateway>,
    cache: PullRequestCache,
    api_base: Url,
    no_match_policy: NoMatchPolicy,
    telemetry: Arc<dyn TelemetrySink>,
}

impl PullRequestResolver {
    /// Creates a resolver querying `gateway` for repositories on `api_base`.
    #[must_use]
    pub fn new(gateway: Arc<dyn PullRequestGateway>, cache: PullRequestCache, api_base: Url) -> Self {
        Self {
            gateway,
            cache,
            api_base,
            no_match_policy: NoMatchPolicy::default(),
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Sets how empty listings are cached.
    #[must_use]
    pub fn with_no_match_policy(mut self, policy: NoMatchPolicy) -> Self {
        self.no_match_policy = policy;
        self
    }

    /// Sets the sink receiving lookup telemetry.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Returns the pull request for `branch` in the repository `route` maps to.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::MissingToken`] on a cache miss without a token,
    /// [`GitHubError::Cache`] when the cache fails, and any gateway error
    /// unchanged. Nothing is retried.
    pub async fn resolve(
        &self,
        route: &RouteDescriptor,
        branch: &BranchIdentifier,
        config: &Configuration,
    ) -> Result<Option<PullRequestRecord>, GitHubError> {
        if let Some(cached) = self.cached_lookup(branch).await? {
            tracing::debug!(%branch, "pull request cache hit");
            self.record(branch, LookupOutcome::CacheHit);
            return Ok(cached.into_pull_request());
        }

        let token = PersonalAccessToken::new(config.credential_token().unwrap_or_default())?;
        let organization = route.resolved_organization();
        let repository =
            RepositoryLocator::new(&self.api_base, organization, route.resolved_repository())?;
        let head = HeadLabel::new(organization, branch.as_str());

        let pulls = self
            .gateway
            .pulls_for_head(&token, &repository, &head)
            .await?;

        let Some(pull_request) = pulls.into_iter().next() else {
            tracing::info!(head = head.as_str(), "no pull request for head");
            if self.no_match_policy == NoMatchPolicy::Remember {
                self.cache.put(branch, &CachedLookup::NoMatch).await?;
            }
            self.record(branch, LookupOutcome::NotFound);
            return Ok(None);
        };

        self.cache
            .put(
                branch,
                &CachedLookup::Found {
                    pull_request: pull_request.clone(),
                },
            )
            .await?;
        tracing::info!(
            head = head.as_str(),
            url = pull_request.display_url(),
            "resolved pull request"
        );
        self.record(branch, LookupOutcome::Fetched);
        Ok(Some(pull_request))
    }

    /// Reads the cache entry for `branch`. An entry that no longer decodes
    /// counts as a miss; the next successful lookup overwrites it.
    async fn cached_lookup(
        &self,
        branch: &BranchIdentifier,
    ) -> Result<Option<CachedLookup>, GitHubError> {
        match self.cache.get(branch).await {
            Ok(lookup) => Ok(lookup),
            Err(PersistenceError::InvalidDocument { key, message }) => {
                tracing::warn!(%key, %message, "ignoring undecodable cache entry");
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }

    fn record(&self, branch: &BranchIdentifier, outcome: LookupOutcome) {
        self.telemetry.record(TelemetryEvent::PullRequestLookup {
            branch: branch.as_str().to_owned(),
            outcome,
        });
    }
}
