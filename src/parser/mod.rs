//! Line tokenization utilities.
//!
//! This module decides how a single input line is decomposed:
//! - [`split_on_top_level_comma`]: splits a line into fields on commas that
//!   sit outside any parenthesis nesting
//! - [`is_comment_line`]: detects `//` comment lines, which never join a
//!   matrix block

pub mod split;

pub use split::{is_comment_line, split_on_top_level_comma};
