//! Pattern-driven link extraction from pull request descriptions.
//!
//! Each configured pattern is a regular expression. Every match of every
//! pattern becomes a link, in pattern order then match order, with repeats
//! dropped.

use regex::Regex;

/// Ordered collection of distinct links.
///
/// The first occurrence of a link fixes its position; later duplicates are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: Vec<String>,
}

impl LinkSet {
    /// Creates an empty link set.
    #[must_use]
    pub const fn new() -> Self {
        Self { links: Vec::new() }
    }

    /// Appends `link` unless an equal link is already present.
    ///
    /// Returns `true` when the link was added.
    pub fn push(&mut self, link: impl Into<String>) -> bool {
        let candidate = link.into();
        if self.contains(&candidate) {
            return false;
        }
        self.links.push(candidate);
        true
    }

    /// Returns true when an identical link is already in the set.
    #[must_use]
    pub fn contains(&self, link: &str) -> bool {
        self.links.iter().any(|existing| existing == link)
    }

    /// Number of links held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true when the set holds no links.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Borrows the links in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.links
    }

    /// Consumes the set, returning the links in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.links
    }
}

impl Extend<String> for LinkSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for link in iter {
            self.push(link);
        }
    }
}

impl IntoIterator for LinkSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

/// Extracts every distinct match of `patterns` from `text`.
///
/// A pattern that fails to compile is logged and skipped; the remaining
/// patterns still contribute.
#[must_use]
pub fn extract_links<P>(text: &str, patterns: &[P]) -> LinkSet
where
    P: AsRef<str>,
{
    let mut links = LinkSet::new();
    extend_with_matches(&mut links, text, patterns);
    links
}

/// Appends the matches of `patterns` in `text` to an existing set.
pub fn extend_with_matches<P>(links: &mut LinkSet, text: &str, patterns: &[P])
where
    P: AsRef<str>,
{
    for pattern in patterns {
        let source = pattern.as_ref();
        let regex = match Regex::new(source) {
            Ok(regex) => regex,
            Err(error) => {
                tracing::warn!(pattern = source, %error, "skipping invalid link pattern");
                continue;
            }
        };

        for found in regex.find_iter(text) {
            links.push(found.as_str());
        }
    }
}
