use thiserror::Error;

use crate::ids::ParticipantId;

/// Reasons an operation is refused.
///
/// A refused operation leaves the pool and the roster exactly as they were.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShareError {
    // --- Money pool ---
    #[error("total pool must be a positive finite amount, got {0}")]
    NonPositiveTotal(f64),

    #[error("total pool {requested} is below the committed reserved + manual amount {committed}")]
    TotalBelowCommitted { requested: f64, committed: f64 },

    #[error("reserved pool {requested} outside [0, {max}]")]
    ReservedOutOfRange { requested: f64, max: f64 },

    #[error("manual pool would reach {proposed}, above the available {available}")]
    ManualOverflow { proposed: f64, available: f64 },

    // --- Roster ---
    #[error("participant name is empty")]
    EmptyName,

    #[error("participant name already taken: {0}")]
    DuplicateName(String),

    #[error("unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("score of manual participant {0} is locked")]
    ScoreLocked(ParticipantId),

    #[error("unknown sort field: {0}")]
    UnknownSortField(String),

    // --- Input / setup ---
    #[error("not a number: {0:?}")]
    InvalidNumber(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result alias used across the share crates.
pub type ShareResult<T> = Result<T, ShareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ShareError::ReservedOutOfRange {
            requested: 1500.0,
            max: 1000.0,
        };
        let s = err.to_string();
        assert!(s.contains("1500"));
        assert!(s.contains("1000"));

        let err = ShareError::DuplicateName("Ana".into());
        assert!(err.to_string().contains("Ana"));
    }

    #[test]
    fn unknown_participant_names_the_id() {
        let id = ParticipantId::generate();
        assert!(ShareError::UnknownParticipant(id)
            .to_string()
            .contains(&id.as_uuid().to_string()));
    }
}
