//! Stringmatch ranks short lists of labels (file paths, symbol names, keys)
//! against a query typed one character at a time.
//!
//! A query matches a label when its characters appear in the label in order,
//! ignoring case. Matches landing on anchor positions (the start of a path
//! segment, the character after `_` or `.`, a camelCase hump) rank higher, and
//! the label's last path segment is searched first, so `main` finds
//! `src/main.rs` before `main/src/lib.rs`.
//!
//! # Examples
//!
//! ```
//! use stringmatch::prelude::*;
//!
//! let labels = ["src/main.rs", "main/src/lib.rs", "README.md"];
//! let mut matcher = StringMatcher::new(MatchOptions::default());
//!
//! let results = matcher.match_all(labels, "main");
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0].label, "src/main.rs");
//! assert_eq!(results[0].highlighted("[", "]"), "src/[main].rs");
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub use crate::fuzzy_matcher::match_list::{MatchEntry, MatchKind};
pub use crate::fuzzy_matcher::score::{ScoreDebug, StringRange};
pub use crate::fuzzy_matcher::specials::SpecialPositions;
pub use crate::fuzzy_matcher::{FuzzyMatcher, PathMatcher};
pub use crate::item::{ParseRankCriteriaError, RankBuilder, RankCriteria, SearchResult, sort};
pub use crate::matcher::{StringMatcher, string_match};
pub use crate::options::{MatchOptions, MatchOptionsBuilder};

pub mod fuzzy_matcher;
pub mod item;
pub mod matcher;
pub mod options;
pub mod prelude;
mod util;
