//! Last-segment-first search.
//!
//! A query usually names the item itself (`main` for `src/main.rs`), so the
//! label's last path segment is searched first. Query characters that do not
//! fit there become the *remainder*, which has to match in the path before
//! the last segment.

use crate::fuzzy_matcher::match_list::{MatchEntry, MatchInput, generate_match_list};
use crate::fuzzy_matcher::specials::SpecialPositions;

/// A trace split into the part matched before the last segment and the part
/// matched inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentMatch {
    /// Number of leading query characters matched before the last segment.
    pub remainder_len: usize,
    /// The full trace, remainder entries first.
    pub matches: Vec<MatchEntry>,
}

/// Matches the longest possible tail of the query inside the last segment.
///
/// Returns the number of leading query characters left over together with the
/// trace of the tail. A remainder covering the whole query comes back with an
/// empty trace.
fn last_segment_search(input: &MatchInput, specials: &SpecialPositions) -> Option<(usize, Vec<MatchEntry>)> {
    let query_len = input.query.len();
    let segment_len = input.candidate.len().saturating_sub(specials.last_segment_start());

    // characters that cannot possibly fit into the segment
    let mut split = query_len.saturating_sub(segment_len);
    while split < query_len {
        let tail = input.with_query_range(split..query_len);
        if let Some(matches) = generate_match_list(&tail, specials.positions(), specials.last_segment_index()) {
            return Some((split, matches));
        }
        if !specials.has_segments() {
            return None;
        }
        split += 1;
    }

    if specials.has_segments() {
        Some((query_len, Vec::new()))
    } else {
        None
    }
}

/// Matches the query against the whole label, preferring its last segment.
///
/// On success the trace is in label order; remainder entries all lie before
/// the last segment and segment entries inside it.
pub fn whole_string_search(input: &MatchInput, specials: &SpecialPositions) -> Option<SegmentMatch> {
    let (remainder_len, segment_matches) = last_segment_search(input, specials)?;
    if remainder_len == 0 {
        return Some(SegmentMatch {
            remainder_len,
            matches: segment_matches,
        });
    }

    let prefix_len = specials.last_segment_start().min(input.candidate.len());
    let remainder = input
        .with_query_range(0..remainder_len)
        .with_candidate_prefix(prefix_len);
    let prefix_specials = &specials.positions()[..specials.last_segment_index()];
    let mut matches = generate_match_list(&remainder, prefix_specials, 0)?;
    trace!(
        "remainder of {} chars matched before offset {}",
        remainder_len, prefix_len
    );

    matches.extend(segment_matches);
    Some(SegmentMatch { remainder_len, matches })
}
