//! Configuration options for matching.
//!
//! This module provides the `MatchOptions` struct and its builder.

use derive_builder::Builder;

/// Options for one matching call, or for every call of a [`StringMatcher`](crate::StringMatcher).
///
/// ```
/// use stringmatch::MatchOptionsBuilder;
///
/// let options = MatchOptionsBuilder::default()
///     .prefer_prefix_matches(true)
///     .build()
///     .unwrap();
/// assert!(options.prefer_prefix_matches);
/// assert!(options.segmented_search);
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(default)]
pub struct MatchOptions {
    /// Rank labels that start with the query above everything else
    ///
    /// Meant for completing key or property names, where the typed text is
    /// nearly always the beginning of the wanted name. Labels starting with the
    /// query are matched as a plain prefix, and the last segment preference is
    /// turned off.
    pub prefer_prefix_matches: bool,

    /// Search the last path segment first
    ///
    /// When disabled the query is matched against the whole label, which is
    /// then treated as a single segment.
    pub segmented_search: bool,

    /// Ignore diacritics, so that `e` matches `é`
    pub normalize: bool,

    /// Attach a per-weight score breakdown to every result
    pub debug_scores: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            prefer_prefix_matches: false,
            segmented_search: true,
            normalize: false,
            debug_scores: false,
        }
    }
}

impl MatchOptions {
    /// Whether the last segment preference applies.
    pub(crate) fn use_segments(&self) -> bool {
        self.segmented_search && !self.prefer_prefix_matches
    }
}
