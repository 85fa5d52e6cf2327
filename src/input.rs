//! Input handling for line mode.
//!
//! Input is treated as raw bytes. Nothing here assumes an encoding, so lines
//! that are not valid UTF-8 are matched like any other.

use std::io::Read;

use anyhow::{Context, Result};
use itertools::Itertools;

/// Read all of `reader` into memory.
pub fn read_input(mut reader: impl Read) -> Result<Vec<u8>> {
    let mut input = Vec::new();
    reader
        .read_to_end(&mut input)
        .context("failed to read input")?;
    Ok(input)
}

/// `line` without a trailing `\r`, so `\r\n` breaks are removed whole.
pub fn line_bytes(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// All lines of `input`, line breaks removed.
///
/// Lines end at `\n` or `\r\n`. A trailing line break ends the last line;
/// it does not start an empty one.
pub fn text_lines(input: &[u8]) -> Vec<&[u8]> {
    let mut lines = input.split(|&b| b == b'\n').map(line_bytes).collect_vec();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}
