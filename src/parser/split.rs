//! Top-level comma splitting.
//!
//! A comma separates fields only when it sits at parenthesis nesting depth 0,
//! so macro arguments like `LT(NAV_, KC_SPC)` stay inside one field. The
//! depth counter is signed and never corrected: on unbalanced input it may go
//! negative, and commas after the imbalance are classified by whatever the
//! running count says. That is accepted behavior, not an error.

/// Split a line into fields on commas outside any parenthesis nesting.
///
/// Fields keep their surrounding whitespace; the separating commas are
/// dropped. A trailing substring is included unless the line ends exactly at
/// a separator, so `"a,b,"` yields `["a", "b"]` with no empty tail.
#[must_use]
pub fn split_on_top_level_comma(line: &str) -> Vec<&str> {
    let mut depth: i32 = 0;
    let mut first = 0;
    let mut pieces = Vec::new();

    for (i, c) in line.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if c == ',' && depth == 0 {
            pieces.push(&line[first..i]);
            first = i + 1;
        }
    }
    if first < line.len() {
        pieces.push(&line[first..]);
    }

    pieces
}

/// Check whether a line is a `//` comment after leading whitespace.
///
/// Comment lines never start or extend a matrix block.
#[must_use]
pub fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_split() {
        assert_eq!(split_on_top_level_comma("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_whitespace_preserved_in_fields() {
        assert_eq!(
            split_on_top_level_comma("  KC_A,  KC_B"),
            vec!["  KC_A", "  KC_B"]
        );
    }

    #[test]
    fn test_nested_commas_not_split() {
        assert_eq!(
            split_on_top_level_comma("a,(b,c),d"),
            vec!["a", "(b,c)", "d"]
        );
    }

    #[test]
    fn test_deeply_nested() {
        assert_eq!(
            split_on_top_level_comma("LT(NAV_, KC_SPC),MO(NUM_)"),
            vec!["LT(NAV_, KC_SPC)", "MO(NUM_)"]
        );
    }

    #[test]
    fn test_no_comma_returns_whole_line() {
        assert_eq!(
            split_on_top_level_comma("no commas here"),
            vec!["no commas here"]
        );
    }

    #[test]
    fn test_trailing_comma_no_empty_field() {
        assert_eq!(split_on_top_level_comma("KC_A,KC_B,"), vec!["KC_A", "KC_B"]);
    }

    #[test]
    fn test_consecutive_commas_give_empty_field() {
        assert_eq!(split_on_top_level_comma("a,,b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_empty_line() {
        assert!(split_on_top_level_comma("").is_empty());
    }

    #[test]
    fn test_unbalanced_close_paren_hides_later_commas() {
        // depth drops to -1 at ')', so the following comma is not top level
        assert_eq!(split_on_top_level_comma("),x,y"), vec!["),x,y"]);
    }

    #[test]
    fn test_unbalanced_open_paren_hides_later_commas() {
        assert_eq!(split_on_top_level_comma("a,(b,c"), vec!["a", "(b,c"]);
    }

    #[test]
    fn test_comment_detection() {
        assert!(is_comment_line("// layer names"));
        assert!(is_comment_line("    // clang-format off"));
        assert!(!is_comment_line("KC_A, KC_B // trailing comment"));
        assert!(!is_comment_line("/ not a comment"));
    }
}
