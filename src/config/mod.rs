//! Host configuration loaded from CLI, environment, and files.
//!
//! These settings govern the native host process itself. The link
//! configuration edited in the settings popup lives in
//! [`crate::settings`] and is stored in the database, not here.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in host defaults
//! 2. **Configuration file** – `.txlinks.toml` in the current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `TXLINKS_DATABASE_URL`,
//!    `TXLINKS_GITHUB_API_BASE`, `TXLINKS_LOG_FILTER`
//! 4. **Command-line arguments** – `--database-url`, `--github-api-base`, …
//!
//! # Configuration File
//!
//! ```toml
//! database_url = "txlinks.sqlite"
//! github_api_base = "https://api.github.com"
//! cache_missing_pull_requests = false
//! log_filter = "txlinks=debug"
//! ```

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::github::{DEFAULT_API_BASE, GitHubError, NoMatchPolicy, parse_api_base};
use crate::persistence::PersistenceError;

/// Tracing filter applied when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Native host configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use txlinks::HostConfig;
///
/// let config = HostConfig::load().expect("failed to load configuration");
/// let api_base = config.api_base().expect("API base should be a URL");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "TXLINKS",
    discovery(
        dotfile_name = ".txlinks.toml",
        config_file_name = "txlinks.toml",
        app_name = "txlinks"
    )
)]
pub struct HostConfig {
    /// Local `SQLite` database path holding the configuration document and
    /// the pull request cache.
    ///
    /// When absent the host keeps both in memory and nothing survives a
    /// restart.
    ///
    /// Can be provided via:
    /// - CLI: `--database-url <PATH>`
    /// - Environment: `TXLINKS_DATABASE_URL`
    /// - Config file: `database_url = "..."`
    #[ortho_config()]
    pub database_url: Option<String>,

    /// Base URL of the GitHub REST API. Defaults to the public API; set it
    /// for GitHub Enterprise.
    ///
    /// Can be provided via:
    /// - CLI: `--github-api-base <URL>`
    /// - Environment: `TXLINKS_GITHUB_API_BASE`
    /// - Config file: `github_api_base = "..."`
    #[ortho_config()]
    pub github_api_base: String,

    /// Caches branches that have no pull request so later refreshes skip
    /// GitHub. A pull request opened afterwards stays hidden until the cache
    /// is cleared.
    ///
    /// Can be provided via:
    /// - CLI: `--cache-missing-pull-requests`
    /// - Config file: `cache_missing_pull_requests = true`
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment.
    #[ortho_config()]
    pub cache_missing_pull_requests: bool,

    /// Runs database migrations and exits.
    ///
    /// Can be provided via:
    /// - CLI: `--migrate-db`
    /// - Config file: `migrate_db = true`
    #[ortho_config()]
    pub migrate_db: bool,

    /// `tracing` filter directive for diagnostics written to stderr.
    ///
    /// Can be provided via:
    /// - CLI: `--log-filter <DIRECTIVE>`
    /// - Environment: `TXLINKS_LOG_FILTER`
    /// - Config file: `log_filter = "..."`
    #[ortho_config()]
    pub log_filter: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            github_api_base: DEFAULT_API_BASE.to_owned(),
            cache_missing_pull_requests: false,
            migrate_db: false,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl HostConfig {
    /// Parses the configured GitHub API base.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::InvalidUrl`] when the value is not an absolute
    /// URL.
    pub fn api_base(&self) -> Result<Url, GitHubError> {
        parse_api_base(&self.github_api_base)
    }

    /// How the resolver treats branches without a pull request.
    #[must_use]
    pub const fn no_match_policy(&self) -> NoMatchPolicy {
        if self.cache_missing_pull_requests {
            NoMatchPolicy::Remember
        } else {
            NoMatchPolicy::Requery
        }
    }

    /// Returns the database URL, or an error when none is configured.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is absent
    /// or blank.
    pub fn require_database_url(&self) -> Result<&str, PersistenceError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(PersistenceError::BlankDatabaseUrl)
    }
}
