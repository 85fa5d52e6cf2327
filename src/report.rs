//! Output for the command-line front end.
//!
//! Writers take any `io::Write` so tests can render into a `Vec<u8>`.

use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;
use crossterm::queue;
use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::tty::IsTty;
use tracing::debug;

use crate::input::text_lines;
use crate::{MatchSpan, Matcher, Pattern};

/// When to highlight matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Only when standard output is a terminal.
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => io::stdout().is_tty(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Options for line mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineOptions {
    /// Select lines that do not match.
    pub invert: bool,
    /// Prefix each line with its 1-based number.
    pub line_number: bool,
    /// Print only the number of selected lines.
    pub count: bool,
    /// Print nothing.
    pub quiet: bool,
    pub color: bool,
}

/// Write `text` followed by a newline, highlighting `span` when `color` is set.
pub fn write_line(
    out: &mut impl Write,
    line_number: Option<usize>,
    text: &[u8],
    span: Option<MatchSpan>,
    color: bool,
) -> io::Result<()> {
    if let Some(n) = line_number {
        if color {
            queue!(out, SetForegroundColor(Color::Green))?;
            write!(out, "{n}")?;
            queue!(out, ResetColor)?;
            write!(out, ":")?;
        } else {
            write!(out, "{n}:")?;
        }
    }
    match span {
        Some(span) if color && !span.is_empty() => {
            out.write_all(&text[..span.start])?;
            queue!(
                out,
                SetForegroundColor(Color::Red),
                SetAttribute(Attribute::Bold)
            )?;
            out.write_all(&text[span.range()])?;
            queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
            out.write_all(&text[span.end..])?;
        }
        _ => out.write_all(text)?,
    }
    out.write_all(b"\n")
}

/// Test one `text` and print `match` or `no match`.
pub fn check_text(
    matcher: &Matcher,
    pattern: &Pattern,
    text: &[u8],
    quiet: bool,
    out: &mut impl Write,
) -> Result<bool> {
    let found = matcher.find(pattern, text)?.is_some();
    if !quiet {
        writeln!(out, "{}", if found { "match" } else { "no match" })?;
    }
    Ok(found)
}

/// Test every line of `input` and print the selected ones.
///
/// Returns the number of selected lines. Stops at the first line that
/// exhausts the step limit.
pub fn scan_lines(
    matcher: &Matcher,
    pattern: &Pattern,
    input: &[u8],
    opts: LineOptions,
    out: &mut impl Write,
) -> Result<usize> {
    let mut selected = 0usize;
    for (idx, line) in text_lines(input).into_iter().enumerate() {
        let span = matcher.find(pattern, line)?;
        if span.is_some() == opts.invert {
            continue;
        }
        selected += 1;
        if !opts.quiet && !opts.count {
            let span = if opts.invert { None } else { span };
            write_line(out, opts.line_number.then_some(idx + 1), line, span, opts.color)?;
        }
    }
    debug!(selected, "scanned lines");
    if opts.count && !opts.quiet {
        writeln!(out, "{selected}")?;
    }
    Ok(selected)
}
