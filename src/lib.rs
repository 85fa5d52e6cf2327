//! A small backtracking regular-expression matcher over byte strings.
//!
//! Supports literals, `.`, the greedy quantifiers `*`, `+` and `?`, and the
//! `^`/`$` anchors. See [`pattern`] for the full syntax.
//!
//! # Example
//!
//! ```rust
//! use rematch::{MatchError, Pattern, matches};
//!
//! assert!(matches("a.c", "xabc").unwrap());
//! assert!(!matches("^abc", "xabc").unwrap());
//! assert!(matches("", "").unwrap());
//!
//! // A quantifier needs something to repeat.
//! assert!(matches!(matches("*abc", "abc"), Err(MatchError::MalformedPattern(_))));
//!
//! // Compile once, search many times.
//! let pattern = Pattern::new("b+$").unwrap();
//! let span = pattern.find("abbb").unwrap().unwrap();
//! assert_eq!(span.range(), 1..4);
//! ```

mod engine;
pub mod input;
mod match_error;
pub mod pattern;
pub mod report;

pub use engine::Matcher;
pub use match_error::MatchError;
pub use pattern::{DEFAULT_STEP_LIMIT, MatchSpan, Pattern, PatternError, PatternErrorKind};

/// Test whether `pattern` matches anywhere in `text`.
///
/// Runs under [`DEFAULT_STEP_LIMIT`]; use [`Matcher`] to change it.
pub fn matches(pattern: impl AsRef<[u8]>, text: impl AsRef<[u8]>) -> Result<bool, MatchError> {
    Matcher::new().matches(pattern, text)
}
