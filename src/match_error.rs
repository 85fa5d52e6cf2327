use thiserror::Error;

use crate::pattern::PatternError;

/// The reason a match could not produce a yes/no answer.
///
/// Failing to find a match is not an error; it is `Ok(false)` or `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The pattern has a dangling or stacked quantifier. Reported before
    /// any matching is attempted.
    #[error("malformed pattern: {0}")]
    MalformedPattern(#[from] PatternError),
    /// The step ceiling was reached before the search finished.
    #[error("step limit exceeded after {steps} steps")]
    ResourceExhausted { steps: usize },
}

impl MatchError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, MatchError::MalformedPattern(_))
    }

    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, MatchError::ResourceExhausted { .. })
    }
}
