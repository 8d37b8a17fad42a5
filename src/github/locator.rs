//! Identity wrappers for GitHub repositories, tokens, and head labels.

use url::Url;

use super::error::GitHubError;

/// Public GitHub API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, GitHubError> {
        if value.is_empty() {
            return Err(GitHubError::MissingRepository);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, GitHubError> {
        if value.is_empty() {
            return Err(GitHubError::MissingRepository);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, GitHubError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GitHubError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PersonalAccessToken(***)")
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Parses an API base URL such as `https://api.github.com`.
///
/// # Errors
///
/// Returns `GitHubError::InvalidUrl` when `input` is not an absolute URL.
pub fn parse_api_base(input: &str) -> Result<Url, GitHubError> {
    Url::parse(input.trim()).map_err(|error| GitHubError::InvalidUrl(error.to_string()))
}

/// A repository on a specific GitHub API host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator for `owner/repository` served by `api_base`.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::MissingRepository` when either name is empty.
    pub fn new(api_base: &Url, owner: &str, repository: &str) -> Result<Self, GitHubError> {
        Ok(Self {
            api_base: api_base.clone(),
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repository)?,
        })
    }

    /// API base URL for the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the API path for listing pull requests.
    pub(crate) fn pulls_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}

/// GitHub's `organization:branch` identity for a pull request head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadLabel(String);

impl HeadLabel {
    /// Builds the label for `branch` pushed to `organization`.
    #[must_use]
    pub fn new(organization: &str, branch: &str) -> Self {
        Self(format!("{organization}:{branch}"))
    }

    /// Borrow the label.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{
        DEFAULT_API_BASE, HeadLabel, PersonalAccessToken, RepositoryLocator, parse_api_base,
    };
    use crate::github::error::GitHubError;

    #[test]
    fn pulls_path_targets_the_repository() {
        let base = parse_api_base(DEFAULT_API_BASE).expect("default base should parse");
        let locator = RepositoryLocator::new(&base, "acme", "acme-app").expect("valid locator");

        assert_eq!(locator.pulls_path(), "/repos/acme/acme-app/pulls");
        assert_eq!(locator.owner().as_str(), "acme");
        assert_eq!(locator.repository().as_str(), "acme-app");
    }

    #[rstest]
    #[case::owner("", "repo")]
    #[case::repository("acme", "")]
    fn empty_names_are_rejected(#[case] owner: &str, #[case] repository: &str) {
        let base = parse_api_base(DEFAULT_API_BASE).expect("default base should parse");

        let error = RepositoryLocator::new(&base, owner, repository)
            .expect_err("empty names should fail");

        assert_eq!(error, GitHubError::MissingRepository);
    }

    #[test]
    fn head_labels_join_organization_and_branch() {
        assert_eq!(HeadLabel::new("acme", "feature/x").as_str(), "acme:feature/x");
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace(" \n")]
    fn blank_tokens_are_missing(#[case] token: &str) {
        assert_eq!(
            PersonalAccessToken::new(token).expect_err("blank token"),
            GitHubError::MissingToken
        );
    }

    #[test]
    fn token_debug_output_is_redacted() {
        let token = PersonalAccessToken::new("ghp_secret").expect("token should be valid");

        assert!(!format!("{token:?}").contains("ghp_secret"));
    }

    #[test]
    fn relative_api_bases_are_invalid() {
        assert!(matches!(
            parse_api_base("api.github.com"),
            Err(GitHubError::InvalidUrl(_))
        ));
    }
}
