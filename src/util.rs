use unicode_normalization::UnicodeNormalization;

/// Normalize a string and return a mapping from normalized char indices to original char indices.
///
/// Characters are decomposed (NFD) and combining marks dropped, so `é` matches `e`.
/// Returns (normalized_string, mapping) where mapping[i] gives the original char index
/// for the i-th character in the normalized string.
pub fn normalize_with_char_mapping(s: &str) -> (String, Vec<usize>) {
    let mut normalized = String::with_capacity(s.len());
    let mut mapping = Vec::with_capacity(s.len());

    for (orig_char_idx, orig_char) in s.chars().enumerate() {
        for decomposed_char in orig_char.nfd() {
            if !unicode_normalization::char::is_combining_mark(decomposed_char) {
                normalized.push(decomposed_char);
                mapping.push(orig_char_idx);
            }
        }
    }

    (normalized, mapping)
}

/// Map a char index of a normalized string back to the original string.
///
/// Indices past the end of the mapping (the one-past-the-end offset) map to
/// `original_len`.
pub fn map_char_index_to_original(normalized_idx: usize, char_mapping: &[usize], original_len: usize) -> usize {
    char_mapping.get(normalized_idx).copied().unwrap_or(original_len)
}
