//! Backtracking search for an order-preserving match trace.
//!
//! The search prefers anchors: for every query character it first looks at
//! the next anchor positions of the label and only falls back to scanning
//! character by character when no anchor fits. Preferring anchors is greedy
//! and can paint the search into a corner (`abc` against `abc_b` puts the `b`
//! on the anchor at offset 4, leaving nothing for `c`), so on failure the
//! last entries are popped and the search resumes further left.
//!
//! Every pop records a dead-branch ceiling for the query position it frees:
//! the rightmost label offset that character may still be placed at. Placing
//! a character at offset `i` failed because the rest of the query did not fit
//! after `i`, and it cannot fit after any later offset either, so ceilings only
//! ever move left. This keeps the total work proportional to
//! `query.len() * label.len()`.

use crate::fuzzy_matcher::IndexType;

/// How a query character was placed in the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Placed on an anchor position.
    Special,
    /// Found by scanning between anchors.
    Normal,
}

/// One query character placed in the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchEntry {
    /// Whether the character landed on an anchor.
    pub kind: MatchKind,
    /// Char offset into the label.
    pub index: IndexType,
    /// The query and label characters agree before case folding too.
    pub upper_case_match: bool,
}

impl MatchEntry {
    /// Creates an entry placed on an anchor.
    pub fn special(index: IndexType, upper_case_match: bool) -> Self {
        Self {
            kind: MatchKind::Special,
            index,
            upper_case_match,
        }
    }

    /// Creates an entry found by scanning.
    pub fn normal(index: IndexType, upper_case_match: bool) -> Self {
        Self {
            kind: MatchKind::Normal,
            index,
            upper_case_match,
        }
    }

    /// Returns true if the entry landed on an anchor.
    pub fn is_special(&self) -> bool {
        self.kind == MatchKind::Special
    }
}

/// Query and label in both their case-folded and original forms.
///
/// Folded and original slices of the same string have equal length.
#[derive(Debug, Clone, Copy)]
pub struct MatchInput<'a> {
    /// Case-folded query.
    pub query: &'a [char],
    /// Query as typed.
    pub original_query: &'a [char],
    /// Case-folded label.
    pub candidate: &'a [char],
    /// Label as given.
    pub original_candidate: &'a [char],
}

impl<'a> MatchInput<'a> {
    /// Bundles the four views of one (query, label) pair.
    pub fn new(
        query: &'a [char],
        original_query: &'a [char],
        candidate: &'a [char],
        original_candidate: &'a [char],
    ) -> Self {
        debug_assert_eq!(query.len(), original_query.len());
        debug_assert_eq!(candidate.len(), original_candidate.len());
        Self {
            query,
            original_query,
            candidate,
            original_candidate,
        }
    }

    /// The same label with the query restricted to `range`.
    pub fn with_query_range(&self, range: std::ops::Range<usize>) -> Self {
        Self {
            query: &self.query[range.clone()],
            original_query: &self.original_query[range],
            ..*self
        }
    }

    /// The same query with the label truncated to its first `len` chars.
    pub fn with_candidate_prefix(&self, len: usize) -> Self {
        Self {
            candidate: &self.candidate[..len],
            original_candidate: &self.original_candidate[..len],
            ..*self
        }
    }

    /// True if the characters at the given positions agree before folding.
    #[inline]
    fn is_upper_case_match(&self, query_index: usize, candidate_index: usize) -> bool {
        self.original_query[query_index] == self.original_candidate[candidate_index]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SpecialsMatch,
    AnyMatch,
}

struct MatchListGenerator<'a> {
    input: MatchInput<'a>,
    specials: &'a [IndexType],
    starting_special: usize,
    start: IndexType,

    result: Vec<MatchEntry>,
    /// Rightmost label offset each query position may still be placed at.
    dead_branches: Vec<IndexType>,
    special_cursor: usize,
    str_cursor: IndexType,
    query_cursor: usize,
    state: State,
    /// Anchor probes, scanned characters and backtracks so far.
    steps: usize,
}

impl<'a> MatchListGenerator<'a> {
    fn new(input: MatchInput<'a>, specials: &'a [IndexType], starting_special: usize) -> Self {
        let start = specials.get(starting_special).copied().unwrap_or(input.candidate.len());
        Self {
            input,
            specials,
            starting_special,
            start,
            result: Vec::with_capacity(input.query.len()),
            dead_branches: vec![IndexType::MAX; input.query.len()],
            special_cursor: starting_special,
            str_cursor: start,
            query_cursor: 0,
            state: State::SpecialsMatch,
            steps: 0,
        }
    }

    fn run(mut self) -> Option<Vec<MatchEntry>> {
        let found = self.search();
        trace!("match list search took {} steps", self.steps);
        found.then_some(self.result)
    }

    fn search(&mut self) -> bool {
        let query_len = self.input.query.len();
        if query_len == 0 {
            return false;
        }
        let candidate_len = self.input.candidate.len();

        loop {
            while self.query_cursor < query_len
                && self.str_cursor < candidate_len
                && self.str_cursor <= self.dead_branches[self.query_cursor]
            {
                if self.state == State::SpecialsMatch && !self.find_matching_special() {
                    self.state = State::AnyMatch;
                }

                if self.state == State::AnyMatch {
                    self.scan_one();
                }
            }

            if self.query_cursor == query_len {
                return true;
            }

            if !self.backtrack() {
                return false;
            }
        }
    }

    /// Tries to place the current query character on one of the remaining
    /// anchors, left to right.
    fn find_matching_special(&mut self) -> bool {
        let query_char = self.input.query[self.query_cursor];
        let ceiling = self.dead_branches[self.query_cursor];

        for slot in self.special_cursor..self.specials.len() {
            self.steps += 1;
            let position = self.specials[slot];
            if position > ceiling || position >= self.input.candidate.len() {
                break;
            }
            if position < self.str_cursor {
                // behind the scan, e.g. after a normal match moved past it
                self.special_cursor = slot + 1;
                continue;
            }
            if query_char == self.input.candidate[position] {
                let upper = self.input.is_upper_case_match(self.query_cursor, position);
                self.result.push(MatchEntry::special(position, upper));
                self.special_cursor = slot;
                self.query_cursor += 1;
                self.str_cursor = position + 1;
                return true;
            }
        }
        false
    }

    /// Compares the current query character with the character under the scan
    /// cursor, then moves the cursor one to the right.
    fn scan_one(&mut self) {
        let position = self.str_cursor;
        self.steps += 1;
        if self.input.query[self.query_cursor] == self.input.candidate[position] {
            let upper = self.input.is_upper_case_match(self.query_cursor, position);
            self.result.push(MatchEntry::normal(position, upper));
            self.query_cursor += 1;
            self.state = State::SpecialsMatch;
        }
        self.str_cursor += 1;
    }

    /// Gives back the last placed character and tightens its ceiling.
    ///
    /// Returns false when there is nothing left to give back.
    fn backtrack(&mut self) -> bool {
        let Some(entry) = self.result.pop() else {
            return false;
        };
        self.steps += 1;
        self.query_cursor -= 1;

        // offset 0 can only hold the first character, and nothing is left of it
        let Some(ceiling) = entry.index.checked_sub(1) else {
            return false;
        };
        let slot = &mut self.dead_branches[self.query_cursor];
        *slot = (*slot).min(ceiling);

        self.str_cursor = self.result.last().map_or(self.start, |last| last.index + 1);
        // the anchor cursor follows the scan cursor back; for a popped special
        // this makes its anchor available again
        let str_cursor = self.str_cursor;
        let behind = self.specials[self.starting_special..].partition_point(|&position| position < str_cursor);
        self.special_cursor = self.starting_special + behind;
        self.state = State::AnyMatch;

        trace!(
            "backtrack: freed query[{}] at {}, ceiling {}",
            self.query_cursor, entry.index, ceiling
        );
        true
    }
}

/// Finds an order-preserving placement of every query character in the label.
///
/// The search starts at anchor `specials[starting_special]` and only places
/// characters at offsets inside `input.candidate`. Anchor offsets are absolute,
/// so truncating the candidate to a prefix needs no translation.
///
/// Returns `None` when the query is empty or cannot be placed in full.
pub fn generate_match_list(
    input: &MatchInput,
    specials: &[IndexType],
    starting_special: usize,
) -> Option<Vec<MatchEntry>> {
    MatchListGenerator::new(*input, specials, starting_special).run()
}

/// Builds the trace of a label that starts with the query: one entry per query
/// character at offsets `0..query.len()`.
///
/// The caller guarantees that the folded label starts with the folded query.
pub fn prefix_match_list(input: &MatchInput, is_special: impl Fn(IndexType) -> bool) -> Vec<MatchEntry> {
    (0..input.query.len())
        .map(|index| {
            let upper = input.is_upper_case_match(index, index);
            if is_special(index) {
                MatchEntry::special(index, upper)
            } else {
                MatchEntry::normal(index, upper)
            }
        })
        .collect()
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;
    use crate::fuzzy_matcher::specials::SpecialPositions;
    use crate::fuzzy_matcher::util::fold;

    fn generate(candidate: &str, query: &str) -> Option<Vec<MatchEntry>> {
        let original_candidate: Vec<char> = candidate.chars().collect();
        let original_query: Vec<char> = query.chars().collect();
        let folded_candidate = fold(&original_candidate);
        let folded_query = fold(&original_query);
        let specials = SpecialPositions::from_chars(&original_candidate);
        let input = MatchInput::new(&folded_query, &original_query, &folded_candidate, &original_candidate);
        generate_match_list(&input, specials.positions(), 0)
    }

    fn indices(candidate: &str, query: &str) -> Option<Vec<IndexType>> {
        generate(candidate, query).map(|list| list.iter().map(|entry| entry.index).collect())
    }

    #[test]
    fn contiguous_prefix() {
        let list = generate("abcdef", "abc").unwrap();
        assert_eq!(
            list,
            vec![
                MatchEntry::special(0, true),
                MatchEntry::normal(1, true),
                MatchEntry::normal(2, true)
            ]
        );
    }

    #[test]
    fn no_match() {
        assert_eq!(generate("x", "y"), None);
        assert_eq!(generate("abc", "abcd"), None);
        assert_eq!(generate("abc", "ca"), None);
        assert_eq!(generate("", "a"), None);
        assert_eq!(generate("abc", ""), None);
    }

    #[test]
    fn prefers_anchors() {
        let list = generate("foo_bar_baz", "fbb").unwrap();
        assert!(list.iter().all(MatchEntry::is_special));
        assert_eq!(list.iter().map(|e| e.index).collect::<Vec<_>>(), vec![0, 4, 8]);
    }

    #[test]
    fn camel_case_anchors() {
        assert_eq!(indices("getElementById", "gebi"), Some(vec![0, 3, 10, 12]));
    }

    #[test]
    fn falls_back_to_scanning() {
        let list = generate("axbycz", "abc").unwrap();
        assert_eq!(list[0].kind, MatchKind::Special);
        assert_eq!(list[1], MatchEntry::normal(2, true));
        assert_eq!(list[2], MatchEntry::normal(4, true));
    }

    #[test]
    fn backtracks_out_of_a_greedy_anchor() {
        // "ab" takes the anchor `b` at 4; `c` then has nowhere to go until the
        // `b` is moved back to offset 1
        assert_eq!(indices("abc_b", "abc"), Some(vec![0, 1, 2]));
        assert_eq!(indices("xa_b_ab", "abab"), Some(vec![1, 3, 5, 6]));
        assert_eq!(indices("ab_ba", "abab"), None);
        assert_eq!(indices("a_b_c_ab", "abab"), Some(vec![0, 2, 6, 7]));
    }

    #[test]
    fn backtracks_several_levels() {
        // every character first lands on a later anchor and has to be moved
        assert_eq!(indices("abcd-c-b", "abcd"), Some(vec![0, 1, 2, 3]));
        // after moving back, later characters still prefer anchors
        assert_eq!(indices("abcd-d-c-b", "abcd"), Some(vec![0, 1, 2, 5]));
    }

    #[test]
    fn upper_case_flag_uses_original_case() {
        let list = generate("Abc", "abc").unwrap();
        assert!(!list[0].upper_case_match);
        assert!(list[1].upper_case_match);

        let list = generate("fooBar", "fB").unwrap();
        assert_eq!(list[1], MatchEntry::special(3, true));
        let list = generate("fooBar", "fb").unwrap();
        assert_eq!(list[1], MatchEntry::special(3, false));
    }

    #[test]
    fn starts_at_the_given_anchor() {
        let original: Vec<char> = "foo/bar".chars().collect();
        let folded = fold(&original);
        let query: Vec<char> = "o".chars().collect();
        let specials = SpecialPositions::from_chars(&original);
        let input = MatchInput::new(&query, &query, &folded, &original);
        assert_eq!(generate_match_list(&input, specials.positions(), specials.last_segment_index()), None);
        let list = generate_match_list(&input, specials.positions(), 0).unwrap();
        assert_eq!(list[0].index, 1);
    }

    #[test]
    fn truncated_candidate_keeps_absolute_offsets() {
        let original: Vec<char> = "ab/cd/ab".chars().collect();
        let folded = fold(&original);
        let query: Vec<char> = "cd".chars().collect();
        let specials = SpecialPositions::from_chars(&original);
        let input = MatchInput::new(&query, &query, &folded, &original).with_candidate_prefix(6);
        let list = generate_match_list(&input, &specials.positions()[..specials.last_segment_index()], 0).unwrap();
        assert_eq!(list, vec![MatchEntry::special(3, true), MatchEntry::normal(4, true)]);
    }

    #[test]
    fn indices_strictly_increase_and_agree() {
        let cases = [
            ("src/components/Button.tsx", "scbt"),
            ("a-b-c-d-e-f", "abcdef"),
            ("mississippi", "sip"),
            ("aaaaab", "aab"),
            ("Cargo.toml", "ct"),
        ];
        for (candidate, query) in cases {
            let list = generate(candidate, query).unwrap_or_else(|| panic!("{candidate} / {query}"));
            assert_eq!(list.len(), query.chars().count());
            assert!(list.windows(2).all(|w| w[0].index < w[1].index));
            let chars: Vec<char> = candidate.chars().collect();
            for (entry, q) in list.iter().zip(query.chars()) {
                assert!(chars[entry.index].eq_ignore_ascii_case(&q));
            }
        }
    }

    #[test]
    fn prefix_trace() {
        let original: Vec<char> = "foo_bar".chars().collect();
        let folded = fold(&original);
        let query: Vec<char> = "foo_b".chars().collect();
        let specials = SpecialPositions::from_chars(&original);
        let input = MatchInput::new(&query, &query, &folded, &original);
        let list = prefix_match_list(&input, |index| specials.is_special(index));
        let kinds: Vec<_> = list.iter().map(|entry| entry.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MatchKind::Special,
                MatchKind::Normal,
                MatchKind::Normal,
                MatchKind::Special,
                MatchKind::Special
            ]
        );
    }

    /// Runs the search and also reports how many steps it took.
    fn counted(candidate: &str, query: &str) -> (Option<Vec<IndexType>>, usize) {
        let original_candidate: Vec<char> = candidate.chars().collect();
        let original_query: Vec<char> = query.chars().collect();
        let folded_candidate = fold(&original_candidate);
        let folded_query = fold(&original_query);
        let specials = SpecialPositions::from_chars(&original_candidate);
        let input = MatchInput::new(&folded_query, &original_query, &folded_candidate, &original_candidate);
        let mut generator = MatchListGenerator::new(input, specials.positions(), 0);
        let found = generator.search();
        let indices = found.then(|| generator.result.iter().map(|entry| entry.index).collect());
        (indices, generator.steps)
    }

    fn assert_bounded(candidate: &str, query: &str, steps: usize) {
        let bound = 2 * candidate.chars().count() * query.chars().count();
        assert!(steps <= bound, "{candidate:?} / {query:?}: {steps} steps, bound {bound}");
    }

    #[test]
    fn dead_branches_bound_the_work() {
        // every `a` first lands on an anchor, then the `b` forces a retreat
        let candidate = "a_".repeat(32) + "b";
        let (found, steps) = counted(&candidate, "aaaaaaaaaaab");
        assert_eq!(found, Some(vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 64]));
        assert_bounded(&candidate, "aaaaaaaaaaab", steps);
    }

    #[test]
    fn exhausted_search_is_bounded() {
        let candidates = ["a_".repeat(32) + "a", "a".repeat(40), "a/".repeat(30)];
        for candidate in &candidates {
            let (found, steps) = counted(candidate, "aaaaaaaaaab");
            assert_eq!(found, None, "{candidate:?}");
            assert_bounded(candidate, "aaaaaaaaaab", steps);
        }
    }

    #[test]
    fn anchors_behind_the_scan_are_probed_once() {
        // `a` is scanned past the anchor at 0; `b` resumes after it
        assert_eq!(counted("fooBarBaz", "oab"), (Some(vec![1, 4, 6]), 13));
    }

    #[test]
    fn work_grows_with_input_sizes() {
        for repeat in 1..25 {
            for prefix_len in 1..repeat + 2 {
                let query = "a".repeat(prefix_len) + "b";
                for candidate in [
                    "a_".repeat(repeat) + "b",
                    "a_".repeat(repeat),
                    "a".repeat(repeat) + "b",
                    "a/".repeat(repeat) + "b",
                ] {
                    let (_, steps) = counted(&candidate, &query);
                    assert_bounded(&candidate, &query, steps);
                }
            }
        }
    }
}
