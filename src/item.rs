//! Search results and their ordering.
//!
//! This module provides the result type produced for every matched label and
//! the ranking criteria used to sort a batch of them.
use std::cmp::Ordering;
use std::str::FromStr;

use thiserror::Error;

use crate::fuzzy_matcher::match_list::MatchEntry;
use crate::fuzzy_matcher::score::{ScoreDebug, StringRange};
use crate::fuzzy_matcher::{IndexType, MatchIndices, ScoreType};

//------------------------------------------------------------------------------
/// A label that matched a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The label as given by the caller
    pub label: String,
    /// One entry per query character, in label order
    pub matches: Vec<MatchEntry>,
    /// Char offset of the label's last segment (0 when not searched by segment)
    pub last_segment_start: IndexType,
    /// The rank, higher is better
    pub score: ScoreType,
    /// Matched and unmatched runs covering the whole label
    pub ranges: Vec<StringRange>,
    /// Score breakdown, present when requested through the options
    pub score_debug: Option<ScoreDebug>,
}

impl SearchResult {
    /// The result of an empty query: score 0 and nothing highlighted.
    pub fn unmatched(label: &str) -> Self {
        let ranges = if label.is_empty() {
            Vec::new()
        } else {
            let len = label.chars().count();
            vec![StringRange {
                text: label.to_string(),
                range: 0..len,
                matched: false,
                includes_last_segment: true,
            }]
        };
        Self {
            label: label.to_string(),
            matches: Vec::new(),
            last_segment_start: 0,
            score: 0,
            ranges,
            score_debug: None,
        }
    }

    /// Matched char offsets, in label order.
    pub fn indices(&self) -> MatchIndices {
        self.matches.iter().map(|entry| entry.index).collect()
    }

    /// Length of the label in chars.
    pub fn label_len(&self) -> usize {
        self.label.chars().count()
    }

    /// Renders the label with every matched run wrapped in `open` and `close`.
    pub fn highlighted(&self, open: &str, close: &str) -> String {
        let mut out = String::with_capacity(self.label.len());
        for range in &self.ranges {
            if range.matched {
                out.push_str(open);
                out.push_str(&range.text);
                out.push_str(close);
            } else {
                out.push_str(&range.text);
            }
        }
        out
    }
}

//------------------------------------------------------------------------------
/// Criteria for ranking and sorting search results
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RankCriteria {
    /// Higher score first
    Score,
    /// Lower score first
    NegScore,
    /// Shorter label first
    Length,
    /// Longer label first
    NegLength,
    /// Label in lexicographic order
    Label,
    /// Label in reverse lexicographic order
    NegLabel,
}

/// Error returned when parsing an unknown ranking criterion
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown rank criteria {0:?}, expected one of score, length, label (optionally prefixed with '-')")]
pub struct ParseRankCriteriaError(String);

impl FromStr for RankCriteria {
    type Err = ParseRankCriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use RankCriteria::*;
        Ok(match s.trim() {
            "score" => Score,
            "-score" => NegScore,
            "length" => Length,
            "-length" => NegLength,
            "label" => Label,
            "-label" => NegLabel,
            other => return Err(ParseRankCriteriaError(other.to_string())),
        })
    }
}

impl RankCriteria {
    fn compare(&self, a: &SearchResult, b: &SearchResult) -> Ordering {
        use RankCriteria::*;
        match self {
            Score => b.score.cmp(&a.score),
            NegScore => a.score.cmp(&b.score),
            Length => a.label_len().cmp(&b.label_len()),
            NegLength => b.label_len().cmp(&a.label_len()),
            Label => a.label.cmp(&b.label),
            NegLabel => b.label.cmp(&a.label),
        }
    }
}

/// Sorts results by a list of criteria, each breaking the ties of the previous one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankBuilder {
    criterion: Vec<RankCriteria>,
}

impl Default for RankBuilder {
    fn default() -> Self {
        Self {
            criterion: vec![RankCriteria::Score, RankCriteria::Length, RankCriteria::Label],
        }
    }
}

impl RankBuilder {
    /// Creates a new rank builder with the given criteria
    ///
    /// Score always takes part: it is put first unless one of its variants is listed.
    pub fn new(mut criterion: Vec<RankCriteria>) -> Self {
        if !criterion.contains(&RankCriteria::Score) && !criterion.contains(&RankCriteria::NegScore) {
            criterion.insert(0, RankCriteria::Score);
        }

        let mut seen = Vec::with_capacity(criterion.len());
        criterion.retain(|c| {
            if seen.contains(c) {
                false
            } else {
                seen.push(*c);
                true
            }
        });
        Self { criterion }
    }

    /// The criteria in priority order
    pub fn criterion(&self) -> &[RankCriteria] {
        &self.criterion
    }

    /// Compares two results, `Less` meaning `a` ranks first
    pub fn compare(&self, a: &SearchResult, b: &SearchResult) -> Ordering {
        self.criterion
            .iter()
            .map(|criteria| criteria.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Sorts `results` best first; equal results keep their relative order
    pub fn sort(&self, results: &mut [SearchResult]) {
        results.sort_by(|a, b| self.compare(a, b));
    }
}

/// Sorts `results` by descending score, then shorter label, then label.
pub fn sort(results: &mut [SearchResult]) {
    RankBuilder::default().sort(results);
}
