//! Atom membership tests.

use super::ast::Atom;

/// Test whether `byte` is matched by `atom`.
pub fn atom_matches(atom: Atom, byte: u8) -> bool {
    match atom {
        Atom::Literal(b) => b == byte,
        Atom::Any => true,
    }
}

/// Test `atom` against the text byte at `pos`. Never matches past the end.
pub fn atom_matches_at(atom: Atom, text: &[u8], pos: usize) -> bool {
    text.get(pos).is_some_and(|&b| atom_matches(atom, b))
}

/// Count how many consecutive bytes from `pos` match `atom`, up to `max`.
pub fn run_length(atom: Atom, text: &[u8], pos: usize, max: Option<usize>) -> usize {
    let available = text.len().saturating_sub(pos);
    let limit = max.map_or(available, |m| m.min(available));
    match atom {
        Atom::Any => limit,
        Atom::Literal(b) => text
            .iter()
            .skip(pos)
            .take(limit)
            .take_while(|&&t| t == b)
            .count(),
    }
}
