//! Compiled patterns and the configurable matcher front end.

use tracing::debug;

use crate::match_error::MatchError;
use crate::pattern::{DEFAULT_STEP_LIMIT, MatchSpan, Pattern, Steps, find_forward, parse};

impl Pattern {
    /// Parse and validate `pattern`.
    pub fn new(pattern: impl AsRef<[u8]>) -> Result<Self, MatchError> {
        let compiled = parse(pattern.as_ref())?;
        debug!(
            pattern = %compiled,
            items = compiled.items.len(),
            anchored_start = compiled.anchored_start,
            anchored_end = compiled.anchored_end,
            "compiled pattern"
        );
        Ok(compiled)
    }

    /// True if the pattern matches anywhere in `text`, using the default
    /// step limit.
    pub fn is_match(&self, text: impl AsRef<[u8]>) -> Result<bool, MatchError> {
        Matcher::new().is_match(self, text)
    }

    /// The leftmost match in `text`, using the default step limit.
    pub fn find(&self, text: impl AsRef<[u8]>) -> Result<Option<MatchSpan>, MatchError> {
        Matcher::new().find(self, text)
    }
}

/// Runs compiled patterns under a step ceiling.
///
/// The ceiling applies to each start offset of a search separately, on top
/// of an allowance proportional to the text after that offset (see
/// [`Steps`]). Long texts therefore never exhaust it by length alone; only
/// runaway backtracking does. A search that exceeds it fails with
/// [`MatchError::ResourceExhausted`].
///
/// ```rust
/// use rematch::{Matcher, Pattern};
///
/// let pattern = Pattern::new("a+b").unwrap();
/// let matcher = Matcher::new().step_limit(Some(1_000));
/// assert!(matcher.is_match(&pattern, "xxaab").unwrap());
/// assert_eq!(matcher.find(&pattern, "xxaab").unwrap().map(|m| m.range()), Some(2..5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    step_limit: Option<usize>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    /// A matcher with [`DEFAULT_STEP_LIMIT`].
    pub fn new() -> Self {
        Self {
            step_limit: Some(DEFAULT_STEP_LIMIT),
        }
    }

    /// A matcher with no step ceiling. Pathological patterns may then run
    /// for exponential time.
    pub fn unlimited() -> Self {
        Self { step_limit: None }
    }

    /// Set the step ceiling; `None` removes it.
    pub fn step_limit(self, step_limit: Option<usize>) -> Self {
        Self { step_limit }
    }

    pub fn limit(&self) -> Option<usize> {
        self.step_limit
    }

    /// Compile `pattern` and test it against `text`.
    pub fn matches(
        &self,
        pattern: impl AsRef<[u8]>,
        text: impl AsRef<[u8]>,
    ) -> Result<bool, MatchError> {
        let pattern = Pattern::new(pattern)?;
        self.is_match(&pattern, text)
    }

    pub fn is_match(&self, pattern: &Pattern, text: impl AsRef<[u8]>) -> Result<bool, MatchError> {
        Ok(self.find(pattern, text)?.is_some())
    }

    /// The leftmost match in `text`.
    pub fn find(
        &self,
        pattern: &Pattern,
        text: impl AsRef<[u8]>,
    ) -> Result<Option<MatchSpan>, MatchError> {
        self.find_at(pattern, text, 0)
    }

    /// The leftmost match in `text` that starts at or after `start`.
    pub fn find_at(
        &self,
        pattern: &Pattern,
        text: impl AsRef<[u8]>,
        start: usize,
    ) -> Result<Option<MatchSpan>, MatchError> {
        let mut steps = Steps::new(self.step_limit);
        find_forward(pattern, text.as_ref(), start, &mut steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_new_rejects_malformed() {
        let err = Pattern::new("a**").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn pattern_accepts_bytes_and_strings() {
        assert_eq!(Pattern::new("ab").unwrap(), Pattern::new(b"ab").unwrap());
        assert_eq!(
            Pattern::new(String::from("ab")).unwrap(),
            Pattern::new(vec![b'a', b'b']).unwrap()
        );
    }

    #[test]
    fn pattern_find() {
        let p = Pattern::new("b.d").unwrap();
        assert_eq!(p.find("abcde").unwrap(), Some(MatchSpan { start: 1, end: 4 }));
        assert!(p.is_match("abcde").unwrap());
        assert!(!p.is_match("abde").unwrap());
    }

    #[test]
    fn matcher_defaults() {
        assert_eq!(Matcher::default(), Matcher::new());
        assert_eq!(Matcher::new().limit(), Some(DEFAULT_STEP_LIMIT));
        assert_eq!(Matcher::unlimited().limit(), None);
        assert_eq!(Matcher::new().step_limit(Some(5)).limit(), Some(5));
    }

    #[test]
    fn matcher_matches_compiles_first() {
        let m = Matcher::new().step_limit(Some(0));
        // Malformed patterns fail before any step is taken.
        assert!(m.matches("+", "").unwrap_err().is_malformed());
        assert!(m.matches("a", "a").unwrap());
        let text = "a".repeat(30);
        assert!(m.matches("a*a*a*b", &text).unwrap_err().is_resource_exhausted());
    }

    #[test]
    fn find_at_skips_earlier_matches() {
        let p = Pattern::new("ab").unwrap();
        let m = Matcher::new();
        assert_eq!(m.find_at(&p, "abab", 1).unwrap(), Some(MatchSpan { start: 2, end: 4 }));
        assert_eq!(m.find_at(&p, "abab", 3).unwrap(), None);
    }

    #[test]
    fn pathological_pattern_exhausts_default_limit() {
        let p = Pattern::new("a*a*a*a*a*a*b").unwrap();
        let text = "a".repeat(200);
        assert!(p.is_match(&text).unwrap_err().is_resource_exhausted());
    }

    #[test]
    fn long_text_fits_default_limit() {
        let text = "a".repeat(5_000);
        assert_eq!(Pattern::new("a.*b").unwrap().find(&text).unwrap(), None);
        let span = Pattern::new(".*a$").unwrap().find(&text).unwrap();
        assert_eq!(span, Some(MatchSpan { start: 0, end: 5_000 }));
    }

    #[test]
    fn pathological_pattern_completes_when_small() {
        let p = Pattern::new("a*a*a*b").unwrap();
        let text = "a".repeat(20);
        assert!(!Matcher::unlimited().is_match(&p, &text).unwrap());
    }
}
