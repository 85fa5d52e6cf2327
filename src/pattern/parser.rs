//! Single-pass parser for pattern strings.
//!
//! The whole pattern is validated here so that malformed input is rejected
//! before the matcher does any work.

use phf::{Map, phf_map};
use thiserror::Error;

use super::ast::*;

/// Bytes that quantify the preceding atom.
const QUANTIFIERS: Map<u8, Quantifier> = phf_map! {
    b'*' => Quantifier::ZeroOrMore,
    b'+' => Quantifier::OneOrMore,
    b'?' => Quantifier::ZeroOrOne,
};

/// A structural defect in a pattern, with the byte offset of the offending
/// quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at offset {position}")]
pub struct PatternError {
    pub kind: PatternErrorKind,
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PatternErrorKind {
    /// Quantifier at the very start of the pattern.
    #[error("quantifier '{}' has nothing to repeat", char::from(*.0))]
    DanglingQuantifier(u8),
    /// Quantifier directly after the leading `^`.
    #[error("quantifier '{}' cannot apply to the '^' anchor", char::from(*.0))]
    QuantifiedAnchor(u8),
    /// Quantifier directly after another quantifier.
    #[error("quantifier '{}' follows another quantifier", char::from(*.0))]
    StackedQuantifier(u8),
}

/// True if `b` is one of `*`, `+`, `?`.
pub fn is_quantifier(b: u8) -> bool {
    QUANTIFIERS.contains_key(&b)
}

/// Parse a pattern into a [`Pattern`].
///
/// A `^` is an anchor only at offset 0 and a `$` only at the final offset;
/// anywhere else both are ordinary literals.
pub fn parse(input: &[u8]) -> Result<Pattern, PatternError> {
    Parser {
        bytes: input,
        pos: 0,
    }
    .parse_pattern()
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn parse_pattern(&mut self) -> Result<Pattern, PatternError> {
        let anchored_start = self.peek() == Some(b'^');
        if anchored_start {
            self.pos += 1;
            if let Some(q) = self.peek().filter(|&b| is_quantifier(b)) {
                return Err(self.error(PatternErrorKind::QuantifiedAnchor(q)));
            }
        }

        let mut items = Vec::with_capacity(self.bytes.len());
        let mut anchored_end = false;
        while let Some(b) = self.peek() {
            if b == b'$' && self.pos + 1 == self.bytes.len() {
                self.pos += 1;
                anchored_end = true;
                break;
            }
            items.push(self.parse_item(b)?);
        }

        Ok(Pattern {
            anchored_start,
            items,
            anchored_end,
        })
    }

    /// Parse one atom (the byte `b` at the current offset) and its optional
    /// quantifier suffix.
    fn parse_item(&mut self, b: u8) -> Result<Item, PatternError> {
        // An item can only start with a quantifier if there is no atom
        // before it, or the previous item already took its quantifier.
        if is_quantifier(b) {
            let kind = if self.pos == 0 {
                PatternErrorKind::DanglingQuantifier(b)
            } else {
                PatternErrorKind::StackedQuantifier(b)
            };
            return Err(self.error(kind));
        }
        self.pos += 1;

        let atom = if b == b'.' { Atom::Any } else { Atom::Literal(b) };
        let quantifier = match self.peek().and_then(|q| QUANTIFIERS.get(&q)) {
            Some(&q) => {
                self.pos += 1;
                q
            }
            None => Quantifier::Once,
        };
        Ok(Item { atom, quantifier })
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, kind: PatternErrorKind) -> PatternError {
        PatternError {
            kind,
            position: self.pos,
        }
    }
}
