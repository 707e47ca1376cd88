//! Driver loop: accumulate, flush, pass through.

use std::io::{BufRead, Write};

use crate::format::format_block;
use crate::parser::{is_comment_line, split_on_top_level_comma};
use crate::Result;

/// Format a stream of keymap source, aligning matrix blocks.
///
/// Reads `input` line by line (trailing whitespace stripped), buffers
/// consecutive multi-field non-comment lines, and writes each flushed block
/// through [`format_block`]. Every other line is written unchanged. A block
/// still open at EOF is flushed the same way.
pub fn format_matrices<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<()> {
    let mut block: Vec<Vec<String>> = Vec::new();

    let mut reader = input;
    let mut raw_line = String::new();
    loop {
        raw_line.clear();
        if reader.read_line(&mut raw_line)? == 0 {
            break;
        }
        let line = raw_line.trim_end();

        let fields = split_on_top_level_comma(line);
        if fields.len() > 1 && !is_comment_line(line) {
            block.push(fields.iter().map(|f| (*f).to_string()).collect());
            continue;
        }

        // First line after a block that is either a comment or has no
        // top-level comma: flush, then emit the line itself.
        flush_block(&mut block, output)?;
        writeln!(output, "{line}")?;
    }
    flush_block(&mut block, output)?;

    Ok(())
}

/// Render and emit the buffered block, leaving the buffer empty.
fn flush_block<W: Write>(block: &mut Vec<Vec<String>>, output: &mut W) -> Result<()> {
    if block.is_empty() {
        return Ok(());
    }
    for line in format_block(block) {
        writeln!(output, "{line}")?;
    }
    block.clear();
    Ok(())
}
