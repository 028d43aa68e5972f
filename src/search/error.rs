use crate::cards::CardId;

/// Why one search (one exclusion) produced no result.
///
/// These never cross exclusions: the driver records the error against the
/// exclusion that raised it and moves on to the next card.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("excluded card {0} is not in the hand")]
    InvalidExclusion(CardId),
    #[error("protocol violation: {0}")]
    ProtocolViolation(&'static str),
    #[error("gave up after {0} expansions")]
    ExpansionLimit(usize),
    #[error("search cancelled")]
    Cancelled,
    #[error("hand of {0} cards does not fit the search mask")]
    HandTooLarge(usize),
}
