//! Block renderer for keymap matrix definitions.
//!
//! A block is a run of consecutive lines that each split into two or more
//! top-level fields. The renderer lays the whole block out as a uniform grid:
//! one field width for every slot, one shared left margin, and justification
//! that fans out from the center column so the matrix reads like the physical
//! key layout it describes.

/// Minimum field slot width in characters.
const MIN_FIELD_WIDTH: usize = 10;

/// Justification of a rendered field within its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Justify {
    Left,
    Right,
    Center,
}

impl Justify {
    /// Render `field` plus its trailing comma into `out`, padded to `width`.
    ///
    /// Cells wider than the slot are emitted unpadded. For centered cells
    /// with an odd margin, the parity of the slot width decides which side
    /// takes the extra fill; already-formatted files round-trip unchanged.
    fn pad_into(self, out: &mut String, field: &str, width: usize) {
        let cell_len = char_width(field) + 1;
        let margin = width.saturating_sub(cell_len);
        match self {
            Justify::Left => {
                out.push_str(field);
                out.push(',');
                push_spaces(out, margin);
            }
            Justify::Right => {
                push_spaces(out, margin);
                out.push_str(field);
                out.push(',');
            }
            Justify::Center => {
                let left = margin / 2 + (margin & width & 1);
                push_spaces(out, left);
                out.push_str(field);
                out.push(',');
                push_spaces(out, margin - left);
            }
        }
    }
}

/// Append `count` spaces to `out`.
fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat(' ').take(count));
}

/// Number of characters in a field (what padding math counts).
fn char_width(s: &str) -> usize {
    s.chars().count()
}

/// Length of the leading whitespace run of a raw first field.
fn leading_whitespace(s: &str) -> usize {
    s.chars().take_while(|c| c.is_whitespace()).count()
}

/// Render a buffered block into aligned output lines.
///
/// Each entry of `block` is one input line, already split into raw fields
/// with their original whitespace intact. The output has the same number of
/// lines; only spacing changes. The last line loses its trailing comma.
#[must_use]
pub fn format_block(block: &[Vec<String>]) -> Vec<String> {
    if block.is_empty() {
        return Vec::new();
    }

    // A lone multi-field line gets no grid treatment. Joining the raw fields
    // puts the separating commas back, reconstructing the line verbatim.
    if block.len() == 1 {
        return vec![block[0].join(",")];
    }

    // The block shares one left margin, taken from its least indented row.
    let indentation = block
        .iter()
        .map(|row| row.first().map_or(0, |f| leading_whitespace(f)))
        .min()
        .unwrap_or(0);

    let n_fields_max = block.iter().map(Vec::len).max().unwrap_or(0);

    let trimmed: Vec<Vec<&str>> = block
        .iter()
        .map(|row| row.iter().map(|field| field.trim()).collect())
        .collect();

    // One slot width for the whole grid: longest field plus comma and a
    // separating space, floored so sparse layers still line up.
    let longest = trimmed
        .iter()
        .flat_map(|row| row.iter())
        .map(|field| char_width(field))
        .max()
        .unwrap_or(0);
    let field_width = (longest + 2).max(MIN_FIELD_WIDTH);

    let mut out = Vec::with_capacity(block.len());
    for row in &trimmed {
        let n_missing = n_fields_max - row.len();
        // Missing slots are distributed symmetrically around the center;
        // the floor division fills the left side first for odd counts.
        let margin = indentation + n_missing / 2 * field_width;

        let mut rendered = String::with_capacity(margin + row.len() * field_width);
        push_spaces(&mut rendered, margin);

        for (i_field, field) in row.iter().enumerate() {
            // Doubled offset from the half-integer center column, shifted by
            // n_fields_max so it stays unsigned: below the pivot is left of
            // center, equal is exactly on it, above is right of it.
            let fan = 2 * i_field + 1 + n_missing;
            let justify = match fan.cmp(&n_fields_max) {
                std::cmp::Ordering::Less => Justify::Left,
                std::cmp::Ordering::Greater => Justify::Right,
                std::cmp::Ordering::Equal => Justify::Center,
            };
            justify.pad_into(&mut rendered, field, field_width);
        }
        out.push(rendered);
    }

    // The final entry of a block must not end with a comma.
    if let Some(last) = out.last_mut() {
        last.pop();
    }

    out
}
