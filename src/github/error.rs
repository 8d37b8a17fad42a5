//! Error types exposed by the GitHub layer.

use thiserror::Error;

use crate::persistence::PersistenceError;

/// Errors surfaced while resolving pull requests through GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GitHubError {
    /// No credential token is configured.
    #[error("GitHub token is required; configure githubToken in the settings")]
    MissingToken,

    /// A URL could not be parsed.
    #[error("GitHub URL is invalid: {0}")]
    InvalidUrl(String),

    /// An organization or repository name was empty.
    #[error("repository owner and name must not be empty")]
    MissingRepository,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub refused the request because the rate limit is exhausted.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Error message from GitHub.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The resolver cache could not be read or written.
    #[error("pull request cache failed: {0}")]
    Cache(#[from] PersistenceError),
}
