//! Mapping editor locations to GitHub repositories.
//!
//! The editor serves each resource at
//! `transifex.com/<organization>/<project>/translate/#<locale>/<resource>`.
//! Anything else is outside the monitored section and routes to `None`.

use std::sync::LazyLock;

use regex::Regex;

use crate::settings::Configuration;

#[expect(clippy::expect_used, reason = "the pattern is a compile-time literal")]
static EDITOR_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"transifex\.com/",
        r"(?P<organization>[^/]+)/",
        r"(?P<project>[^/]+)/",
        r"translate/",
        r"#(?P<locale>[^/]+)/",
        r"(?P<resource>[^/]+)",
    ))
    .expect("editor location pattern should compile")
});

/// Identity of the resource open in an editor tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    source_organization: String,
    project_slug: String,
    locale: String,
    resource_slug: String,
    resolved_repository: String,
    resolved_organization: String,
}

impl RouteDescriptor {
    /// Transifex organization taken from the location.
    #[must_use]
    pub fn source_organization(&self) -> &str {
        &self.source_organization
    }

    /// Transifex project slug taken from the location.
    #[must_use]
    pub fn project_slug(&self) -> &str {
        &self.project_slug
    }

    /// Locale code from the location fragment.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Resource slug from the location fragment.
    #[must_use]
    pub fn resource_slug(&self) -> &str {
        &self.resource_slug
    }

    /// GitHub repository name after applying project aliases.
    #[must_use]
    pub fn resolved_repository(&self) -> &str {
        &self.resolved_repository
    }

    /// GitHub organization after applying organization aliases.
    #[must_use]
    pub fn resolved_organization(&self) -> &str {
        &self.resolved_organization
    }
}

/// Parses an editor location, resolving GitHub names through `config`.
///
/// Returns `None` when `location` is not an editor location.
#[must_use]
pub fn route(location: &str, config: &Configuration) -> Option<RouteDescriptor> {
    let captures = EDITOR_LOCATION.captures(location)?;
    let segment = |name: &str| captures.name(name).map(|found| found.as_str().to_owned());

    let source_organization = segment("organization")?;
    let project_slug = segment("project")?;

    Some(RouteDescriptor {
        resolved_repository: config.repository_for(&project_slug),
        resolved_organization: config.organization_for(&source_organization),
        locale: segment("locale")?,
        resource_slug: segment("resource")?,
        source_organization,
        project_slug,
    })
}
