//! Pattern matcher: find matches of a [`Pattern`] in a byte string.
//!
//! All positions are byte offsets into the text.

use tracing::{debug, trace};

use crate::match_error::MatchError;

use super::ast::*;
use super::atom::{atom_matches_at, run_length};

/// Default ceiling on backtracking steps from one start offset.
pub const DEFAULT_STEP_LIMIT: usize = 10_000_000;

/// The span of a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    /// Offset of the first matched byte.
    pub start: usize,
    /// Offset one past the last matched byte.
    pub end: usize,
}

impl MatchSpan {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Step budget for one search.
///
/// The ceiling is applied to each start offset separately. An attempt at
/// `pos` may take `limit` steps plus `(items + 1) * (remaining + 1)`, where
/// `remaining` is the number of text bytes after `pos`. That allowance
/// covers a full scan of the rest of the text with one give-back per byte,
/// so only super-linear backtracking from a single offset can trip the
/// ceiling; the text length alone never does.
#[derive(Debug, Clone)]
pub struct Steps {
    /// Steps taken over the whole search.
    used: usize,
    /// Steps taken by the current attempt.
    attempt: usize,
    /// Ceiling for the current attempt.
    budget: Option<usize>,
    limit: Option<usize>,
}

impl Steps {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            used: 0,
            attempt: 0,
            budget: limit,
            limit,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    pub fn used(&self) -> usize {
        self.used
    }

    /// Reset the per-attempt count for a match attempt over `remaining`
    /// bytes with a pattern of `items` items.
    fn begin_attempt(&mut self, items: usize, remaining: usize) {
        self.attempt = 0;
        self.budget = self.limit.map(|limit| {
            let allowance = (items + 1).saturating_mul(remaining.saturating_add(1));
            limit.saturating_add(allowance)
        });
    }

    fn tick(&mut self) -> Result<(), MatchError> {
        self.used += 1;
        self.attempt += 1;
        match self.budget {
            Some(budget) if self.attempt > budget => {
                debug!(steps = self.attempt, budget, "step limit exceeded");
                Err(MatchError::ResourceExhausted {
                    steps: self.attempt,
                })
            }
            _ => Ok(()),
        }
    }
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Find the leftmost match starting at or after `start`.
pub fn find_forward(
    pattern: &Pattern,
    text: &[u8],
    start: usize,
    steps: &mut Steps,
) -> Result<Option<MatchSpan>, MatchError> {
    if start > text.len() {
        return Ok(None);
    }
    if pattern.is_empty_pattern() {
        return Ok(Some(MatchSpan { start, end: start }));
    }
    if pattern.anchored_start {
        return if start == 0 {
            match_at(pattern, text, 0, steps)
        } else {
            Ok(None)
        };
    }

    // No match can start where fewer than `min_len` bytes remain.
    let Some(last) = text.len().checked_sub(pattern.min_len()) else {
        return Ok(None);
    };
    for pos in start..=last {
        if let Some(span) = match_at(pattern, text, pos, steps)? {
            trace!(start = span.start, end = span.end, steps = steps.used(), "match");
            return Ok(Some(span));
        }
    }
    trace!(steps = steps.used(), "no match");
    Ok(None)
}

/// Test whether a match begins exactly at `pos`.
pub fn match_at(
    pattern: &Pattern,
    text: &[u8],
    pos: usize,
    steps: &mut Steps,
) -> Result<Option<MatchSpan>, MatchError> {
    if pos > text.len() || (pattern.anchored_start && pos != 0) {
        return Ok(None);
    }
    steps.begin_attempt(pattern.items.len(), text.len() - pos);
    let end = match_here(&pattern.items, pattern.anchored_end, text, pos, steps)?;
    Ok(end.map(|end| MatchSpan { start: pos, end }))
}

// ─── Core matching ──────────────────────────────────────────────────────────

/// A saved backtracking state: quantified item `item` began at `start` and
/// currently consumes `taken` bytes.
#[derive(Debug)]
struct ChoicePoint {
    item: usize,
    start: usize,
    taken: usize,
}

/// Backtracking sequence matcher.
///
/// Each quantified item first takes as many bytes as it can and records a
/// choice point. When a later item fails, the most recent choice point gives
/// back one byte and matching resumes from the item after it. Returns the
/// end offset of the first success.
fn match_here(
    items: &[Item],
    anchored_end: bool,
    text: &[u8],
    start: usize,
    steps: &mut Steps,
) -> Result<Option<usize>, MatchError> {
    let mut stack: Vec<ChoicePoint> = Vec::new();
    let mut idx = 0;
    let mut pos = start;

    loop {
        steps.tick()?;
        let advanced = match items.get(idx) {
            None => {
                if !anchored_end || pos == text.len() {
                    return Ok(Some(pos));
                }
                false
            }
            Some(item) if item.quantifier == Quantifier::Once => {
                let ok = atom_matches_at(item.atom, text, pos);
                if ok {
                    idx += 1;
                    pos += 1;
                }
                ok
            }
            Some(item) => {
                let taken = run_length(item.atom, text, pos, item.quantifier.max());
                let ok = taken >= item.quantifier.min();
                if ok {
                    stack.push(ChoicePoint {
                        item: idx,
                        start: pos,
                        taken,
                    });
                    idx += 1;
                    pos += taken;
                }
                ok
            }
        };
        if advanced {
            continue;
        }

        // Backtrack to the most recent choice point that can give a byte back.
        loop {
            let Some(top) = stack.last_mut() else {
                return Ok(None);
            };
            if top.taken > items[top.item].quantifier.min() {
                top.taken -= 1;
                idx = top.item + 1;
                pos = top.start + top.taken;
                break;
            }
            stack.pop();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parser::parse;

    fn fwd(pattern_str: &str, text: &str, start: usize) -> Option<(usize, usize)> {
        let p = parse(pattern_str.as_bytes()).unwrap();
        find_forward(&p, text.as_bytes(), start, &mut Steps::unlimited())
            .unwrap()
            .map(|m| (m.start, m.end))
    }

    fn mat(pattern_str: &str, text: &str, pos: usize) -> Option<(usize, usize)> {
        let p = parse(pattern_str.as_bytes()).unwrap();
        match_at(&p, text.as_bytes(), pos, &mut Steps::unlimited())
            .unwrap()
            .map(|m| (m.start, m.end))
    }

    // --- Literals ---

    #[test]
    fn literal_at_start() {
        assert_eq!(fwd("hello", "hello world", 0), Some((0, 5)));
    }

    #[test]
    fn literal_not_at_start() {
        assert_eq!(fwd("world", "hello world", 0), Some((6, 11)));
    }

    #[test]
    fn literal_no_match() {
        assert_eq!(fwd("xyz", "hello world", 0), None);
    }

    #[test]
    fn literal_is_case_sensitive() {
        assert_eq!(fwd("Hello", "hello", 0), None);
    }

    #[test]
    fn start_offset_skips_earlier_matches() {
        assert_eq!(fwd("o", "hello world", 5), Some((7, 8)));
    }

    #[test]
    fn start_past_end_is_none() {
        assert_eq!(fwd("", "abc", 4), None);
        assert_eq!(fwd("", "abc", 3), Some((3, 3)));
    }

    // --- Wildcard ---

    #[test]
    fn dot_matches_one_byte() {
        assert_eq!(fwd("a.c", "xabc", 0), Some((1, 4)));
        assert_eq!(fwd("a.c", "ac", 0), None);
    }

    #[test]
    fn dot_does_not_match_past_end() {
        assert_eq!(fwd("a.", "a", 0), None);
    }

    // --- Quantifiers ---

    #[test]
    fn star_is_greedy() {
        assert_eq!(fwd("a*", "aaab", 0), Some((0, 3)));
    }

    #[test]
    fn star_matches_empty_at_first_position() {
        assert_eq!(fwd("a*", "baaa", 0), Some((0, 0)));
    }

    #[test]
    fn star_gives_back_for_the_rest() {
        // .* first takes "abcabc", then gives back until "c" fits.
        assert_eq!(fwd(".*c", "abcabc", 0), Some((0, 6)));
        assert_eq!(fwd(".*bc", "abcabx", 0), Some((0, 3)));
    }

    #[test]
    fn plus_requires_one() {
        assert_eq!(fwd("a+b", "b", 0), None);
        assert_eq!(fwd("a+b", "xaab", 0), Some((1, 4)));
    }

    #[test]
    fn question_prefers_one() {
        assert_eq!(fwd("ab?", "abc", 0), Some((0, 2)));
        assert_eq!(fwd("ab?", "ac", 0), Some((0, 1)));
    }

    #[test]
    fn question_falls_back_to_zero() {
        assert_eq!(fwd("a?ab", "ab", 0), Some((0, 2)));
    }

    #[test]
    fn nested_backtracking() {
        assert_eq!(fwd("a*a*b", "aaab", 0), Some((0, 4)));
        assert_eq!(fwd("x.*y.*z", "x1y2z3", 0), Some((0, 5)));
    }

    // --- Anchors ---

    #[test]
    fn caret_only_matches_at_zero() {
        assert_eq!(fwd("^abc", "abcabc", 0), Some((0, 3)));
        assert_eq!(fwd("^abc", "xabc", 0), None);
        assert_eq!(fwd("^abc", "abcabc", 1), None);
    }

    #[test]
    fn dollar_only_matches_at_end() {
        assert_eq!(fwd("abc$", "abcabc", 0), Some((3, 6)));
        assert_eq!(fwd("abc$", "abcx", 0), None);
    }

    #[test]
    fn lone_dollar_matches_empty_suffix() {
        assert_eq!(fwd("$", "abc", 0), Some((3, 3)));
    }

    #[test]
    fn star_then_dollar_backtracks_to_end() {
        assert_eq!(fwd("a.*c$", "abcbc", 0), Some((0, 5)));
    }

    #[test]
    fn literal_caret_and_dollar() {
        assert_eq!(fwd("a^b", "xa^b", 0), Some((1, 4)));
        assert_eq!(fwd("$x", "a$x", 0), Some((1, 3)));
    }

    // --- match_at ---

    #[test]
    fn match_at_success() {
        assert_eq!(mat("b+", "abbc", 1), Some((1, 3)));
    }

    #[test]
    fn match_at_wrong_pos() {
        assert_eq!(mat("b", "abc", 0), None);
    }

    #[test]
    fn match_at_respects_caret() {
        assert_eq!(mat("^a", "aa", 1), None);
        assert_eq!(mat("^a", "aa", 0), Some((0, 1)));
    }

    #[test]
    fn match_at_end_of_text() {
        assert_eq!(mat("x*", "ab", 2), Some((2, 2)));
        assert_eq!(mat("x*", "ab", 3), None);
    }

    // --- Steps ---

    #[test]
    fn steps_are_counted() {
        let p = parse(b"abc").unwrap();
        let mut steps = Steps::unlimited();
        find_forward(&p, b"xxabc", 0, &mut steps).unwrap();
        assert!(steps.used() > 0);
    }

    #[test]
    fn step_limit_trips() {
        let p = parse(b"a*a*a*a*a*b").unwrap();
        let text = vec![b'a'; 64];
        let mut steps = Steps::new(Some(1_000));
        let err = find_forward(&p, &text, 0, &mut steps).unwrap_err();
        // 1_000 plus the allowance for 6 items over 64 remaining bytes.
        assert_eq!(err, MatchError::ResourceExhausted { steps: 1_456 });
    }

    #[test]
    fn step_limit_is_per_start_offset() {
        // Each offset needs a couple of steps; the whole search needs far
        // more than the limit.
        let p = parse(b"x").unwrap();
        let text = vec![b'a'; 5_000];
        let mut steps = Steps::new(Some(10));
        assert_eq!(find_forward(&p, &text, 0, &mut steps).unwrap(), None);
        assert!(steps.used() > 5_000);
    }

    #[test]
    fn linear_give_back_fits_any_length() {
        // `.*x` gives back every byte from every offset, with no extra limit.
        let p = parse(b".*xy").unwrap();
        let text = vec![b'a'; 3_000];
        let mut steps = Steps::new(Some(0));
        assert_eq!(find_forward(&p, &text, 0, &mut steps).unwrap(), None);
    }

    #[test]
    fn empty_pattern_matches_at_start_offset() {
        assert_eq!(fwd("", "abc", 1), Some((1, 1)));
        let p = parse(b"").unwrap();
        let mut steps = Steps::new(Some(0));
        assert_eq!(
            find_forward(&p, b"abc", 2, &mut steps).unwrap(),
            Some(MatchSpan { start: 2, end: 2 })
        );
    }

    #[test]
    fn step_limit_not_reached_on_easy_input() {
        let p = parse(b"a*b").unwrap();
        let mut steps = Steps::new(Some(1_000));
        let span = find_forward(&p, b"aaab", 0, &mut steps).unwrap();
        assert_eq!(span, Some(MatchSpan { start: 0, end: 4 }));
    }

    #[test]
    fn long_pattern_does_not_recurse() {
        let pattern: Vec<u8> = b"a?".repeat(50_000);
        let p = parse(&pattern).unwrap();
        let text = vec![b'a'; 50_000];
        let span = find_forward(&p, &text, 0, &mut Steps::unlimited()).unwrap();
        assert_eq!(span, Some(MatchSpan { start: 0, end: 50_000 }));
    }

    #[test]
    fn span_helpers() {
        let span = MatchSpan { start: 2, end: 5 };
        assert!(!span.is_empty());
        assert_eq!(span.range(), 2..5);
        assert!(MatchSpan { start: 4, end: 4 }.is_empty());
    }
}
