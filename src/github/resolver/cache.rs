//! Persistent branch to pull request cache.
//!
//! Entries never expire. A cached pull request is trusted until the branch
//! changes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::github::models::PullRequestRecord;
use crate::persistence::{KeyValueStore, PersistenceError, read_json, write_json};
use crate::transifex::BranchIdentifier;

/// Prefix separating cache entries from other stored documents.
pub const CACHE_KEY_PREFIX: &str = "pull_request/";

/// Cached outcome of a head-label lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CachedLookup {
    /// The branch has a pull request.
    Found {
        /// The first pull request GitHub listed for the branch.
        pull_request: PullRequestRecord,
    },
    /// GitHub listed no pull request for the branch.
    NoMatch,
}

impl CachedLookup {
    /// Returns the cached pull request, if any.
    #[must_use]
    pub fn into_pull_request(self) -> Option<PullRequestRecord> {
        match self {
            Self::Found { pull_request } => Some(pull_request),
            Self::NoMatch => None,
        }
    }
}

/// Branch-keyed lookup cache over a [`KeyValueStore`].
#[derive(Clone)]
pub struct PullRequestCache {
    store: Arc<dyn KeyValueStore>,
}

impl PullRequestCache {
    /// Creates a cache that keeps its entries in `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Reads the entry for `branch`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the store fails or the entry does not
    /// decode.
    pub async fn get(
        &self,
        branch: &BranchIdentifier,
    ) -> Result<Option<CachedLookup>, PersistenceError> {
        read_json(self.store.as_ref(), &Self::key_for(branch)).await
    }

    /// Writes the entry for `branch`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the write fails.
    pub async fn put(
        &self,
        branch: &BranchIdentifier,
        lookup: &CachedLookup,
    ) -> Result<(), PersistenceError> {
        write_json(self.store.as_ref(), &Self::key_for(branch), lookup).await
    }

    fn key_for(branch: &BranchIdentifier) -> String {
        format!("{CACHE_KEY_PREFIX}{branch}")
    }
}
