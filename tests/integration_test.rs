//! Integration tests for matfmt
//!
//! These tests verify that the components work together correctly

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{BufReader, Cursor};

use matfmt::process::format_matrices;

/// Run the formatter over an in-memory input and return the output
fn run(input: &str) -> String {
    let reader = BufReader::new(Cursor::new(input.as_bytes()));
    let mut output = Vec::new();
    format_matrices(reader, &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_blocks_separated_by_comment() {
    let input = "KC_A,KC_B,\nKC_C,KC_D\n// comment\nKC_E,KC_F\n";
    let expected = "KC_A,          KC_B,\nKC_C,          KC_D\n// comment\nKC_E,KC_F\n";
    assert_eq!(run(input), expected);
}

#[test]
fn test_pass_through_only_file_is_identical() {
    let input = "\
// Copyright 2024
#include QMK_KEYBOARD_H

enum LAYER { BASE_ };

void matrix_init_user(void) {
}
";
    assert_eq!(run(input), input);
}

#[test]
fn test_empty_file_produces_no_output() {
    assert_eq!(run(""), "");
}

#[test]
fn test_nested_macro_commas_stay_inside_their_field() {
    let input = "LT(NAV_, KC_SPC), KC_A\nKC_B, KC_C\n";
    let out = run(input);
    // the macro survives as a single field, nested comma and all
    assert!(out.contains("LT(NAV_, KC_SPC),"));
    for line in out.lines() {
        let fields = matfmt::parser::split_on_top_level_comma(line);
        assert_eq!(fields.len(), 2, "line should still have 2 fields: {line:?}");
    }
}

#[test]
fn test_lone_multi_field_line_renders_without_padding() {
    let input = "[NUM_] = X(\nKC_1, KC_2, KC_3\n)\n";
    let out = run(input);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "[NUM_] = X(");
    assert_eq!(lines[1], "KC_1, KC_2, KC_3");
    assert_eq!(lines[2], ")");
}

#[test]
fn test_last_block_line_has_no_trailing_comma() {
    let out = run("KC_A, KC_B,\nKC_C, KC_D,\nKC_E, KC_F,\n");
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].ends_with(','));
    assert!(lines[1].ends_with(','));
    assert!(!lines[2].ends_with(','));
}

#[test]
fn test_block_at_eof_is_flushed() {
    let out = run("KC_A, KC_B\nKC_C, KC_D");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "KC_C,          KC_D");
}

#[test]
fn test_indentation_comes_from_least_indented_row() {
    let input = "    KC_A, KC_B\n        KC_C, KC_D\n";
    let out = run(input);
    for line in out.lines() {
        assert!(line.starts_with("    KC_"), "unexpected margin: {line:?}");
    }
}

#[test]
fn test_formatting_is_idempotent() {
    let input = "\
const uint16_t PROGMEM keymaps[][MATRIX_ROWS][MATRIX_COLS] = {
    [BASE_] = LAYOUT_split_3x6_3(
        KC_ESC, LGUI_T(KC_A), KC_B,
        KC_TAB, KC_C
    ),
};
";
    let once = run(input);
    let twice = run(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_unbalanced_parens_degrade_without_error() {
    // the closing paren drops the depth below zero; later commas are hidden
    let input = "), a, b\nKC_A, KC_B\n";
    let out = run(input);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "), a, b");
    // the lone buffered line renders as a degenerate block: raw fields
    // rejoined, reconstructing the input
    assert_eq!(lines[1], "KC_A, KC_B");
}

#[test]
fn test_crlf_input_normalizes_line_endings() {
    let out = run("plain line\r\nKC_A, KC_B\r\nKC_C, KC_D\r\n");
    assert_eq!(
        out,
        "plain line\nKC_A,          KC_B,\nKC_C,          KC_D\n"
    );
}
