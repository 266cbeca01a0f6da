use stringmatch::prelude::*;
use stringmatch::{MatchKind, SearchResult};

fn matched(label: &str, query: &str) -> Option<SearchResult> {
    string_match(label, query, &MatchOptions::default(), None)
}

fn render(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|result| format!("{} {}", result.score, result.highlighted("[", "]")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn rank(labels: &[&str], query: &str, options: MatchOptions) -> String {
    let mut results: Vec<_> = labels
        .iter()
        .filter_map(|label| string_match(label, query, &options, None))
        .collect();
    sort(&mut results);
    render(&results)
}

#[test]
fn contiguous_prefix() {
    let found = matched("abcdef", "abc").unwrap();
    assert_eq!(found.indices(), [0, 1, 2]);
    assert_eq!(found.highlighted("[", "]"), "[abc]def");
}

#[test]
fn missing_character() {
    assert!(matched("x", "y").is_none());
    assert!(matched("abc", "abd").is_none());
}

#[test]
fn case_flag_needs_original_case() {
    let found = matched("Abc", "abc").unwrap();
    let flags: Vec<bool> = found.matches.iter().map(|entry| entry.upper_case_match).collect();
    assert_eq!(flags, [false, true, true]);
}

#[test]
fn shorter_path_wins() {
    insta::assert_snapshot!(rank(&["src/index.js", "index.js"], "index", MatchOptions::default()), @r"
    3184 [index].js
    3176 src/[index].js
    ");
}

#[test]
fn anchors_at_segment_starts() {
    let found = matched("foo/bar/baz.js", "fbb").unwrap();
    assert_eq!(found.indices(), [0, 4, 8]);
    assert!(found.matches.iter().all(|entry| entry.kind == MatchKind::Special));
    insta::assert_snapshot!(found.highlighted("[", "]"), @"[f]oo/[b]ar/[b]az.js");
}

#[test]
fn last_segment_first() {
    let labels = ["main/src/lib.rs", "README.md", "docs/maintenance.md", "src/main.rs"];
    insta::assert_snapshot!(rank(&labels, "main", MatchOptions::default()), @r"
    2718 src/[main].rs
    2702 docs/[main]tenance.md
    1340 [main]/src/lib.rs
    ");
}

#[test]
fn camel_case_humps() {
    let found = matched("getElementById", "gebi").unwrap();
    insta::assert_snapshot!(found.highlighted("[", "]"), @"[g]et[E]lement[B]y[I]d");
}

#[test]
fn prefix_preference() {
    let labels = ["sub/base", "base/sub"];
    insta::assert_snapshot!(rank(&labels, "ba", MatchOptions::default()), @r"
    1804 sub/[ba]se
    894 [ba]se/sub
    ");

    let options = MatchOptionsBuilder::default().prefer_prefix_matches(true).build().unwrap();
    insta::assert_snapshot!(rank(&labels, "ba", options), @r"
    6804 [ba]se/sub
    1544 sub/[ba]se
    ");
}

#[test]
fn session_matches_batch() {
    let labels = ["src/main.rs", "docs/maintenance.md", "main/src/lib.rs", "README.md"];
    let mut matcher = StringMatcher::new(MatchOptions::default());
    let last = ["m", "ma", "mai", "main"]
        .into_iter()
        .map(|query| matcher.match_all(labels, query))
        .last()
        .unwrap();
    assert_eq!(render(&last), rank(&labels, "main", MatchOptions::default()));
}
