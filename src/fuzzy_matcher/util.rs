use crate::fuzzy_matcher::IndexType;

/// Folds a single character to lower case.
///
/// Characters whose lower-case mapping expands to several characters fold to
/// themselves, so a folded string always has as many chars as its original.
#[inline]
pub fn fold_char(ch: char) -> char {
    if ch.is_ascii() {
        return ch.to_ascii_lowercase();
    }
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => ch,
    }
}

pub fn fold(chars: &[char]) -> Vec<char> {
    chars.iter().map(|&ch| fold_char(ch)).collect()
}

#[inline]
pub fn is_separator(ch: char) -> bool {
    ch == '/' || ch == '\\'
}

#[inline]
pub fn is_punctuation(ch: char) -> bool {
    matches!(ch, '.' | '-' | '_')
}

/// Returns the char offset at which the contiguous runs of `indices` start
/// and end, as half-open ranges.
pub fn contiguous_runs(indices: &[IndexType]) -> Vec<(IndexType, IndexType)> {
    let mut runs: Vec<(IndexType, IndexType)> = Vec::new();
    for &index in indices {
        match runs.last_mut() {
            Some((_, end)) if *end == index => *end += 1,
            _ => runs.push((index, index + 1)),
        }
    }
    runs
}

#[cfg(test)]
pub fn wrap_matches(line: &str, indices: &[IndexType]) -> String {
    let mut ret = String::new();
    let mut peekable = indices.iter().peekable();
    for (idx, ch) in line.chars().enumerate() {
        let next_id = **peekable.peek().unwrap_or(&&(line.len() as IndexType));
        if next_id == idx {
            ret.push_str(format!("[{}]", ch).as_str());
            peekable.next();
        } else {
            ret.push(ch);
        }
    }
    ret
}

/// Asserts that `lines` are listed in strictly decreasing score order.
#[cfg(test)]
pub fn assert_order(matcher: &dyn crate::fuzzy_matcher::FuzzyMatcher, pattern: &str, lines: &[&'static str]) {
    let scores: Vec<i64> = lines
        .iter()
        .map(|line| {
            matcher
                .fuzzy_match(line, pattern)
                .unwrap_or_else(|| panic!("{line:?} should match {pattern:?}"))
        })
        .collect();
    for (pair, lines) in scores.windows(2).zip(lines.windows(2)) {
        assert!(
            pair[0] > pair[1],
            "expected {:?} ({}) to rank above {:?} ({})",
            lines[0],
            pair[0],
            lines[1],
            pair[1]
        );
    }
}
