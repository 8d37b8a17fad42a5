//! Branch names embedded in resource display names.
//!
//! Resources pushed by txgh are named `<source file> (heads/<branch>)`. The
//! branch is not exposed anywhere else in the editor.

use std::fmt;

/// Marker preceding the branch in a resource name.
pub const HEADS_MARKER: &str = "(heads/";

/// Source-control branch a resource was pushed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchIdentifier(String);

impl BranchIdentifier {
    /// Wraps a branch name.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the branch name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BranchIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BranchIdentifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Extracts the branch from a resource display name.
///
/// Takes everything after the first `(heads/` up to the last closing
/// parenthesis. Names without the marker, or with nothing after it, yield
/// `None`.
#[must_use]
pub fn branch_from_resource(resource_name: &str) -> Option<BranchIdentifier> {
    let (_, after_marker) = resource_name.split_once(HEADS_MARKER)?;
    let branch = after_marker
        .rsplit_once(')')
        .map_or_else(|| after_marker.trim_end(), |(name, _)| name);

    if branch.is_empty() {
        return None;
    }
    Some(BranchIdentifier::new(branch))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::branch_from_resource;

    #[rstest]
    #[case::locale_file("config/locales/en.yml (heads/feature-x)", "feature-x")]
    #[case::short_name("src (heads/main)", "main")]
    #[case::nested_branch("app.yml (heads/team/JIRA-12-fix)", "team/JIRA-12-fix")]
    #[case::parentheses_in_branch("app.yml (heads/fix(parser))", "fix(parser)")]
    #[case::trailing_whitespace("app.yml (heads/main)\n  ", "main")]
    #[case::unclosed("app.yml (heads/main", "main")]
    #[case::text_after_suffix("app.yml (heads/main) [stale]", "main")]
    fn branches_are_read_from_the_heads_suffix(#[case] name: &str, #[case] expected: &str) {
        let branch = branch_from_resource(name).expect("resource name should carry a branch");

        assert_eq!(branch.as_str(), expected);
    }

    #[rstest]
    #[case::no_marker("config/locales/en.yml")]
    #[case::tag_ref("config/locales/en.yml (tags/v1.0)")]
    #[case::empty_branch("config/locales/en.yml (heads/)")]
    #[case::empty("")]
    fn names_without_a_branch_yield_nothing(#[case] name: &str) {
        assert!(branch_from_resource(name).is_none(), "{name:?} should not decode");
    }
}
