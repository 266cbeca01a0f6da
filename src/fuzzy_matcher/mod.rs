//! Segment-aware fuzzy matching.
//!
//! The pipeline runs leaves first: [`specials`] indexes the anchor positions of
//! a label, [`match_list`] finds an order-preserving trace of the query in the
//! label, [`segment`] biases that search toward the label's last path segment
//! and [`score`] turns the trace into a rank and highlight ranges.

pub mod match_list;
pub mod score;
pub mod segment;
pub mod specials;
pub(crate) mod util;

use crate::matcher::string_match;
use crate::options::MatchOptions;

pub(crate) type IndexType = usize;
pub(crate) type ScoreType = i64;

/// Matched character indices, in label order.
pub type MatchIndices = Vec<IndexType>;

/// Trait for fuzzy matching text patterns against choices
pub trait FuzzyMatcher: Send + Sync {
    /// fuzzy match choice with pattern, and return the score & matched indices of characters
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> Option<(i64, MatchIndices)>;

    /// fuzzy match choice with pattern, and return the score of matching
    fn fuzzy_match(&self, choice: &str, pattern: &str) -> Option<i64> {
        self.fuzzy_indices(choice, pattern).map(|(score, _)| score)
    }

    /// Fuzzy match and return (score, begin_char_index, end_char_index).
    ///
    /// `begin` is the character index of the first matched pattern character,
    /// `end` is the character index of the last matched pattern character.
    fn fuzzy_match_range(&self, choice: &str, pattern: &str) -> Option<(i64, usize, usize)> {
        self.fuzzy_indices(choice, pattern).map(|(score, indices)| {
            let begin = indices.first().copied().unwrap_or(0);
            let end = indices.last().copied().unwrap_or(0);
            (score, begin, end)
        })
    }
}

/// Stateless matcher over path-like labels.
///
/// Unlike [`StringMatcher`](crate::StringMatcher) it keeps no caches, so a
/// single instance can be shared between threads.
///
/// # Example:
/// ```
/// use stringmatch::fuzzy_matcher::{FuzzyMatcher, PathMatcher};
///
/// let matcher = PathMatcher::default();
///
/// assert_eq!(None, matcher.fuzzy_match("abc", "abx"));
///
/// let (_score, indices) = matcher.fuzzy_indices("foo/bar/baz.js", "fbb").unwrap();
/// assert_eq!(indices, [0, 4, 8]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathMatcher {
    options: MatchOptions,
}

impl PathMatcher {
    /// Creates a matcher with the given options.
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    /// Gives labels that start with the query an extra boost.
    pub fn prefer_prefix_matches(mut self, prefer: bool) -> Self {
        self.options.prefer_prefix_matches = prefer;
        self
    }

    /// Enables or disables the last-segment preference.
    pub fn segmented_search(mut self, segmented: bool) -> Self {
        self.options.segmented_search = segmented;
        self
    }

    /// Strips diacritics before matching.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.options.normalize = normalize;
        self
    }

    /// Returns the options this matcher runs with.
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }
}

impl FuzzyMatcher for PathMatcher {
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> Option<(ScoreType, MatchIndices)> {
        let result = string_match(choice, pattern, &self.options, None)?;
        let indices = result.indices();
        Some((result.score, indices))
    }

    fn fuzzy_match(&self, choice: &str, pattern: &str) -> Option<ScoreType> {
        string_match(choice, pattern, &self.options, None).map(|result| result.score)
    }
}
