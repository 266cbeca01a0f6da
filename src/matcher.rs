//! This module contains the matching entry points
use std::collections::{HashMap, HashSet};

use crate::fuzzy_matcher::match_list::{MatchInput, generate_match_list, prefix_match_list};
use crate::fuzzy_matcher::ScoreType;
use crate::fuzzy_matcher::score::{LENGTH_PENALTY, ScoreDebug, compute_ranges, compute_ranges_and_score};
use crate::fuzzy_matcher::segment::whole_string_search;
use crate::fuzzy_matcher::specials::SpecialPositions;
use crate::fuzzy_matcher::util::fold;
use crate::item::{RankBuilder, SearchResult};
use crate::options::MatchOptions;
use crate::util::{map_char_index_to_original, normalize_with_char_mapping};

/// Matches `query` against `label`.
///
/// Returns `None` when some query character cannot be placed. An empty query
/// matches every label with score 0.
///
/// `specials` may carry a cached anchor index of the label; it must have been
/// built with [`SpecialPositions::for_label`] under the same options. When
/// `None` the index is computed on the fly.
///
/// ```
/// use stringmatch::{MatchOptions, string_match};
///
/// let options = MatchOptions::default();
/// let found = string_match("src/main.rs", "main", &options, None).unwrap();
/// assert_eq!(found.indices(), [4, 5, 6, 7]);
/// assert!(string_match("src/main.rs", "xyz", &options, None).is_none());
/// ```
pub fn string_match(
    label: &str,
    query: &str,
    options: &MatchOptions,
    specials: Option<&SpecialPositions>,
) -> Option<SearchResult> {
    if query.is_empty() {
        return Some(SearchResult::unmatched(label));
    }

    if !options.normalize {
        return match_label(label, query, options, specials);
    }

    let (normalized_label, mapping) = normalize_with_char_mapping(label);
    let (normalized_query, _) = normalize_with_char_mapping(query);
    if normalized_query.is_empty() {
        return Some(SearchResult::unmatched(label));
    }
    let normalized = match_label(&normalized_label, &normalized_query, options, specials)?;
    Some(map_to_original(label, normalized, &mapping))
}

fn match_label(
    label: &str,
    query: &str,
    options: &MatchOptions,
    specials: Option<&SpecialPositions>,
) -> Option<SearchResult> {
    let original_label: Vec<char> = label.chars().collect();
    let original_query: Vec<char> = query.chars().collect();
    if original_query.len() > original_label.len() {
        return None;
    }
    let folded_label = fold(&original_label);
    let folded_query = fold(&original_query);
    let input = MatchInput::new(&folded_query, &original_query, &folded_label, &original_label);

    let computed;
    let specials = match specials {
        Some(specials) => specials,
        None => {
            computed = SpecialPositions::from_chars(&original_label);
            &computed
        }
    };

    let (matches, last_segment_start) = if options.prefer_prefix_matches && folded_label.starts_with(&folded_query) {
        (prefix_match_list(&input, |index| specials.is_special(index)), 0)
    } else if options.use_segments() {
        let found = whole_string_search(&input, specials)?;
        (found.matches, specials.last_segment_start())
    } else {
        (generate_match_list(&input, specials.positions(), 0)?, 0)
    };
    trace!("{label:?} / {query:?}: {matches:?}");

    let scored = compute_ranges_and_score(
        &matches,
        &original_label,
        last_segment_start,
        options.prefer_prefix_matches,
    );
    Some(SearchResult {
        label: label.to_string(),
        matches,
        last_segment_start,
        score: scored.score,
        ranges: scored.ranges,
        score_debug: options.debug_scores.then_some(scored.debug),
    })
}

/// Moves a result computed on the normalized label back onto `label`.
///
/// The length penalty is charged on the chars of `label`, not of its
/// decomposed form.
fn map_to_original(label: &str, normalized: SearchResult, mapping: &[usize]) -> SearchResult {
    let original_label: Vec<char> = label.chars().collect();
    let original_len = original_label.len();
    let length_correction = (mapping.len() as ScoreType - original_len as ScoreType) * LENGTH_PENALTY;

    let mut matches = normalized.matches;
    for entry in matches.iter_mut() {
        entry.index = map_char_index_to_original(entry.index, mapping, original_len);
    }
    // several normalized chars may come from one original char
    matches.dedup_by_key(|entry| entry.index);

    let last_segment_start = map_char_index_to_original(normalized.last_segment_start, mapping, original_len);
    let ranges = compute_ranges(&matches, &original_label, last_segment_start);

    SearchResult {
        label: label.to_string(),
        matches,
        last_segment_start,
        score: normalized.score + length_correction,
        ranges,
        score_debug: normalized.score_debug.map(|debug| ScoreDebug {
            length: debug.length + length_correction,
            ..debug
        }),
    }
}

//==============================================================================
/// Matcher for one typing session.
///
/// Keeps the anchor index of every label it has seen, and remembers which
/// labels failed the current query: as long as the user keeps typing forward
/// (each query extends the previous one) those labels are skipped.
#[derive(Debug, Default)]
pub struct StringMatcher {
    options: MatchOptions,
    rank_builder: RankBuilder,
    last_query: Option<String>,
    specials_cache: HashMap<String, SpecialPositions>,
    no_match_cache: HashSet<String>,
}

impl StringMatcher {
    /// Creates a matcher using `options` for every call.
    pub fn new(options: MatchOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Sets the ordering used by [`match_all`](Self::match_all).
    pub fn rank_builder(mut self, rank_builder: RankBuilder) -> Self {
        self.rank_builder = rank_builder;
        self
    }

    /// Returns the options this matcher runs with.
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Forgets every cached anchor index and non-match.
    pub fn reset(&mut self) {
        debug!(
            "string matcher reset, dropping {} indexes and {} non-matches",
            self.specials_cache.len(),
            self.no_match_cache.len()
        );
        self.last_query = None;
        self.specials_cache.clear();
        self.no_match_cache.clear();
    }

    /// Matches `query` against `label`, using and filling the caches.
    pub fn string_match(&mut self, label: &str, query: &str) -> Option<SearchResult> {
        self.track_query(query);

        if self.no_match_cache.contains(label) {
            return None;
        }

        let options = &self.options;
        let specials = self
            .specials_cache
            .entry(label.to_string())
            .or_insert_with(|| SpecialPositions::for_label(label, options));

        let result = string_match(label, query, options, Some(specials));
        if result.is_none() {
            self.no_match_cache.insert(label.to_string());
        }
        result
    }

    /// Matches every label and returns the matches sorted best first.
    pub fn match_all<'a, I>(&mut self, labels: I, query: &str) -> Vec<SearchResult>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut results: Vec<SearchResult> = labels
            .into_iter()
            .filter_map(|label| self.string_match(label, query))
            .collect();
        self.rank_builder.sort(&mut results);
        debug!("query {query:?}: {} matches", results.len());
        results
    }

    /// Number of labels whose anchor index is cached.
    pub fn cached_labels(&self) -> usize {
        self.specials_cache.len()
    }

    /// Number of labels known not to match the current query.
    pub fn known_non_matches(&self) -> usize {
        self.no_match_cache.len()
    }

    fn track_query(&mut self, query: &str) {
        match &self.last_query {
            Some(last) if last == query => return,
            Some(last) if !query.starts_with(last.as_str()) => {
                trace!("query {last:?} -> {query:?} is not an extension, clearing non-matches");
                self.no_match_cache.clear();
            }
            _ => {}
        }
        self.last_query = Some(query.to_string());
    }
}
