//! Turns a match trace into a rank and highlight ranges.
//!
//! Scores are additive per matched character. Entries inside the last segment
//! form their own subtotal which is multiplied by [`LAST_SEGMENT_BOOST`]; the
//! length and first-character penalties are subtracted at the end.

use std::ops::Range;

use crate::fuzzy_matcher::match_list::{MatchEntry, MatchKind};
use crate::fuzzy_matcher::util::contiguous_runs;
use crate::fuzzy_matcher::{IndexType, ScoreType};

/// Points for every entry placed on an anchor.
pub const SPECIAL_POINTS: ScoreType = 400;

/// Points for every matched character.
pub const MATCH_POINTS: ScoreType = 100;

/// Points for an entry whose query and label characters agree in case.
pub const CASE_MATCH_POINTS: ScoreType = 50;

/// Points for an entry right after the previous one.
pub const CONSECUTIVE_POINTS: ScoreType = 80;

/// Points when a segment's first entry sits on the segment's first character.
pub const BEGINNING_OF_NAME_POINTS: ScoreType = 130;

/// Multiplier for the subtotal of entries inside the last segment.
pub const LAST_SEGMENT_BOOST: ScoreType = 2;

/// Penalty per label character.
pub const LENGTH_PENALTY: ScoreType = 2;

/// Penalty when the first entry is not on an anchor.
pub const NOT_STARTING_ON_SPECIAL_PENALTY: ScoreType = 250;

/// Boost for a trace starting on the label's first character, used when
/// prefix matches are preferred.
pub const PREFIX_MATCH_POINTS: ScoreType = 5000;

/// Per-weight breakdown of a score.
///
/// Penalties are stored as negative numbers so that [`total`](Self::total)
/// is a plain sum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreDebug {
    /// Anchor entries.
    pub special: ScoreType,
    /// Every matched character.
    pub matched: ScoreType,
    /// Entries matching in case too.
    pub upper_case: ScoreType,
    /// Entries adjacent to their predecessor.
    pub consecutive: ScoreType,
    /// Entries opening the path or the last segment.
    pub beginning_of_name: ScoreType,
    /// What the last segment multiplier added on top of the plain subtotal.
    pub last_segment: ScoreType,
    /// Label length penalty.
    pub length: ScoreType,
    /// Penalty for a first entry off an anchor.
    pub not_starting_on_special: ScoreType,
    /// Prefix preference boost.
    pub prefix: ScoreType,
}

impl ScoreDebug {
    /// Sum of all contributions.
    pub fn total(&self) -> ScoreType {
        self.special
            + self.matched
            + self.upper_case
            + self.consecutive
            + self.beginning_of_name
            + self.last_segment
            + self.length
            + self.not_starting_on_special
            + self.prefix
    }
}

/// A run of label characters that is either matched or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringRange {
    /// The characters of the run.
    pub text: String,
    /// Char offsets of the run in the label.
    pub range: Range<IndexType>,
    /// Whether the run consists of matched characters.
    pub matched: bool,
    /// Whether the run overlaps the label's last segment.
    pub includes_last_segment: bool,
}

/// Score and highlight ranges of one trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMatch {
    /// The rank, higher is better.
    pub score: ScoreType,
    /// Highlight partition of the label.
    pub ranges: Vec<StringRange>,
    /// Where the score came from.
    pub debug: ScoreDebug,
}

/// Scores `matches` against `label`, whose last segment starts at `last_segment_start`.
pub fn compute_ranges_and_score(
    matches: &[MatchEntry],
    label: &[char],
    last_segment_start: IndexType,
    prefer_prefix_matches: bool,
) -> ScoredMatch {
    let mut debug = ScoreDebug::default();
    let mut segment_subtotal = 0;
    let first_in_segment = matches.iter().position(|entry| entry.index >= last_segment_start);

    for (i, entry) in matches.iter().enumerate() {
        let in_segment = entry.index >= last_segment_start;
        let mut points = MATCH_POINTS;
        debug.matched += MATCH_POINTS;

        if entry.kind == MatchKind::Special {
            points += SPECIAL_POINTS;
            debug.special += SPECIAL_POINTS;
        }
        if entry.upper_case_match {
            points += CASE_MATCH_POINTS;
            debug.upper_case += CASE_MATCH_POINTS;
        }
        if i > 0 && matches[i - 1].index + 1 == entry.index {
            points += CONSECUTIVE_POINTS;
            debug.consecutive += CONSECUTIVE_POINTS;
        }

        let (portion_start, first_of_portion) = if in_segment {
            (last_segment_start, first_in_segment == Some(i))
        } else {
            (0, i == 0)
        };
        if first_of_portion && entry.index == portion_start {
            points += BEGINNING_OF_NAME_POINTS;
            debug.beginning_of_name += BEGINNING_OF_NAME_POINTS;
        }

        if in_segment {
            segment_subtotal += points;
        }
    }
    debug.last_segment = segment_subtotal * (LAST_SEGMENT_BOOST - 1);

    debug.length = -(label.len() as ScoreType) * LENGTH_PENALTY;
    match matches.first() {
        Some(first) if first.kind == MatchKind::Normal => {
            debug.not_starting_on_special = -NOT_STARTING_ON_SPECIAL_PENALTY;
        }
        Some(first) if prefer_prefix_matches && first.index == 0 => {
            debug.prefix = PREFIX_MATCH_POINTS;
        }
        _ => {}
    }

    ScoredMatch {
        score: debug.total(),
        ranges: compute_ranges(matches, label, last_segment_start),
        debug,
    }
}

/// Splits `label` into alternating matched and unmatched runs.
pub fn compute_ranges(matches: &[MatchEntry], label: &[char], last_segment_start: IndexType) -> Vec<StringRange> {
    let indices: Vec<IndexType> = matches.iter().map(|entry| entry.index).collect();
    let mut ranges = Vec::new();
    let mut cursor = 0;

    let mut push = |range: Range<IndexType>, matched: bool| {
        ranges.push(StringRange {
            text: label[range.clone()].iter().collect(),
            includes_last_segment: range.end > last_segment_start,
            range,
            matched,
        });
    };

    for (start, end) in contiguous_runs(&indices) {
        if start > cursor {
            push(cursor..start, false);
        }
        push(start..end, true);
        cursor = end;
    }
    if cursor < label.len() {
        push(cursor..label.len(), false);
    }
    ranges
}
