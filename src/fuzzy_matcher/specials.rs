//! Anchor ("special character") indexing.
//!
//! Anchors are the positions a user most likely means when typing a query:
//! the start of the label, the characters around path separators and
//! punctuation, and camelCase humps. The index is computed once per label
//! and can be cached for as long as the label does not change.

use crate::fuzzy_matcher::IndexType;
use crate::fuzzy_matcher::util::{is_punctuation, is_separator};
use crate::options::MatchOptions;
use crate::util::normalize_with_char_mapping;

/// Ordered anchor offsets of a label, plus where its last segment starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialPositions {
    positions: Vec<IndexType>,
    last_segment_index: usize,
}

impl SpecialPositions {
    /// Indexes the anchors of `text`.
    pub fn find(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        Self::from_chars(&chars)
    }

    /// Indexes the anchors of the form of `label` that matching will see under
    /// `options`, i.e. the diacritic-stripped label when normalizing.
    pub fn for_label(label: &str, options: &MatchOptions) -> Self {
        if options.normalize {
            let (normalized, _) = normalize_with_char_mapping(label);
            Self::find(&normalized)
        } else {
            Self::find(label)
        }
    }

    /// Indexes the anchors of an already decoded label.
    ///
    /// Offsets never exceed `chars.len()`; the one-past-the-end offset shows up
    /// only after a trailing separator or punctuation character.
    pub fn from_chars(chars: &[char]) -> Self {
        let mut positions = vec![0];
        let mut last_segment_index = 0;
        let mut last_was_lower = false;

        let mut i = 0;
        while i < chars.len() {
            let ch = chars[i];
            if is_separator(ch) {
                // the separator and the character after it, which is not examined
                push_position(&mut positions, i);
                push_position(&mut positions, i + 1);
                last_segment_index = positions.len() - 1;
                last_was_lower = false;
                i += 2;
                continue;
            }

            if is_punctuation(ch) {
                push_position(&mut positions, i);
                last_was_lower = false;
                // a following separator is handled by the separator branch
                if chars.get(i + 1).is_some_and(|&next| is_separator(next)) {
                    i += 1;
                } else {
                    push_position(&mut positions, i + 1);
                    i += 2;
                }
                continue;
            }

            if ch.is_uppercase() {
                if last_was_lower {
                    push_position(&mut positions, i);
                }
                last_was_lower = false;
            } else {
                last_was_lower = ch.is_lowercase();
            }
            i += 1;
        }

        Self {
            positions,
            last_segment_index,
        }
    }

    /// Anchor offsets, strictly increasing and starting at 0.
    pub fn positions(&self) -> &[IndexType] {
        &self.positions
    }

    /// Index into [`positions`](Self::positions) of the first anchor of the last segment.
    pub fn last_segment_index(&self) -> usize {
        self.last_segment_index
    }

    /// Char offset at which the last segment starts.
    pub fn last_segment_start(&self) -> IndexType {
        self.positions[self.last_segment_index]
    }

    /// True when the label has at least one separator, i.e. something precedes
    /// its last segment.
    pub fn has_segments(&self) -> bool {
        self.last_segment_index > 0
    }

    pub(crate) fn is_special(&self, index: IndexType) -> bool {
        self.positions.binary_search(&index).is_ok()
    }
}

fn push_position(positions: &mut Vec<IndexType>, index: IndexType) {
    if positions.last().is_none_or(|&last| index > last) {
        positions.push(index);
    }
}
