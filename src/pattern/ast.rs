//! AST types for compiled patterns.

/// A fully parsed pattern.
///
/// A pattern like `^ab*c$` has `anchored_start`, items `a`, `b*`, `c`
/// and `anchored_end`. The anchors are kept out of `items` because they
/// consume no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub anchored_start: bool,
    pub items: Vec<Item>,
    pub anchored_end: bool,
}

impl Pattern {
    /// True if the pattern has no items and no anchors. Such a pattern
    /// matches the empty string at any position.
    pub fn is_empty_pattern(&self) -> bool {
        self.items.is_empty() && !self.anchored_start && !self.anchored_end
    }

    /// Smallest number of text bytes any match can consume.
    pub fn min_len(&self) -> usize {
        self.items.iter().map(|item| item.quantifier.min()).sum()
    }
}

/// One quantified atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub atom: Atom,
    pub quantifier: Quantifier,
}

impl Item {
    pub fn once(atom: Atom) -> Self {
        Self {
            atom,
            quantifier: Quantifier::Once,
        }
    }
}

/// A single-byte matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom {
    Literal(u8),
    /// `.`
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Once,
    ZeroOrMore, // *
    OneOrMore,  // +
    ZeroOrOne,  // ?
}

impl Quantifier {
    pub fn min(self) -> usize {
        match self {
            Quantifier::Once | Quantifier::OneOrMore => 1,
            Quantifier::ZeroOrMore | Quantifier::ZeroOrOne => 0,
        }
    }

    /// Upper repetition bound; `None` is unbounded.
    pub fn max(self) -> Option<usize> {
        match self {
            Quantifier::Once | Quantifier::ZeroOrOne => Some(1),
            Quantifier::ZeroOrMore | Quantifier::OneOrMore => None,
        }
    }

    /// The pattern byte that introduces this quantifier, if any.
    pub fn symbol(self) -> Option<u8> {
        match self {
            Quantifier::Once => None,
            Quantifier::ZeroOrMore => Some(b'*'),
            Quantifier::OneOrMore => Some(b'+'),
            Quantifier::ZeroOrOne => Some(b'?'),
        }
    }
}

/// Renders the pattern back to its source form (lossy for non-UTF-8 bytes).
impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut bytes = Vec::with_capacity(self.items.len() * 2 + 2);
        if self.anchored_start {
            bytes.push(b'^');
        }
        for item in &self.items {
            bytes.push(match item.atom {
                Atom::Literal(b) => b,
                Atom::Any => b'.',
            });
            bytes.extend(item.quantifier.symbol());
        }
        if self.anchored_end {
            bytes.push(b'$');
        }
        write!(f, "{}", String::from_utf8_lossy(&bytes))
    }
}
