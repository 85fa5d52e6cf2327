//! Pattern matching engine.
//!
//! Patterns are byte strings. Every byte that is not a metacharacter is a
//! literal, compared exactly (no case folding, no encoding).
//!
//! # Pattern syntax
//!
//! | Token   | Meaning                                            |
//! |---------|----------------------------------------------------|
//! | `b`     | The literal byte `b`                               |
//! | `.`     | Any one byte                                       |
//! | `X*`    | Zero or more `X`, greedy                           |
//! | `X+`    | One or more `X`, greedy                            |
//! | `X?`    | Zero or one `X`, greedy                            |
//! | `^`     | Start of text (only as the first pattern byte)     |
//! | `$`     | End of text (only as the last pattern byte)        |
//!
//! `X` is a single literal or `.`. There is no grouping, alternation,
//! character class or escaping: `\` is a literal, and `^`/`$` anywhere else
//! in the pattern are literals too.

pub mod ast;
pub mod atom;
pub mod matcher;
pub mod parser;

pub use ast::{Atom, Item, Pattern, Quantifier};
pub use matcher::{DEFAULT_STEP_LIMIT, MatchSpan, Steps, find_forward, match_at};
pub use parser::{PatternError, PatternErrorKind, parse};
