//! Convenience re-exports of commonly used types.
//!
//! This module provides a convenient way to import all the commonly used
//! stringmatch types and traits with a single `use stringmatch::prelude::*;` statement.

pub use crate::fuzzy_matcher::{FuzzyMatcher, PathMatcher};
pub use crate::item::{RankBuilder, RankCriteria, SearchResult, sort};
pub use crate::matcher::{StringMatcher, string_match};
pub use crate::options::{MatchOptions, MatchOptionsBuilder};
