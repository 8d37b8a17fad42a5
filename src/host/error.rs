//! Errors that stop the native host.

use thiserror::Error;

use crate::github::GitHubError;
use crate::persistence::PersistenceError;

/// Failures raised while starting or running the stdio host.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// Host configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Loader error text.
        message: String,
    },

    /// The tracing subscriber could not be installed.
    #[error("failed to initialise logging: {message}")]
    Logging {
        /// Subscriber error text.
        message: String,
    },

    /// Reading frames or writing replies failed.
    #[error("stdio failure: {message}")]
    Io {
        /// I/O error text.
        message: String,
    },

    /// The configured GitHub API base is unusable.
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    /// The database could not be opened or migrated.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl From<std::io::Error> for HostError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
