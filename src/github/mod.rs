//! GitHub pull request lookup.
//!
//! This module wraps Octocrab to list pull requests by head label, caches the
//! result per branch, and maps Octocrab failures into [`GitHubError`] so the
//! router can log precise causes without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod resolver;

pub use error::GitHubError;
pub use gateway::{OctocrabGateway, PullRequestGateway};
pub use locator::{
    DEFAULT_API_BASE, HeadLabel, PersonalAccessToken, RepositoryLocator, RepositoryName,
    RepositoryOwner, parse_api_base,
};
pub use models::PullRequestRecord;
pub use resolver::{CachedLookup, NoMatchPolicy, PullRequestCache, PullRequestResolver};

#[cfg(test)]
pub use gateway::MockPullRequestGateway;
