//! Gaff engine errors

/// Failure of a decision maker, condition or device call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GaffError {
    #[error("Unsatisfiable constraint in {decision}: {reason}")]
    Unsatisfiable { decision: String, reason: String },

    #[error("Result condition not met: {condition}")]
    ResultUnmet { condition: String },

    #[error("Step conditions still unmet after {waited_games} games: {conditions}")]
    ConditionUnmetTimeout { waited_games: u64, conditions: String },

    #[error("Device error: {0}")]
    Device(String),

    #[error("Unknown sequence: {0}")]
    UnknownSequence(String),
}

impl GaffError {
    pub(crate) fn unsatisfiable(decision: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unsatisfiable {
            decision: decision.into(),
            reason: reason.into(),
        }
    }
}

/// A sequence failed; names the sequence and the step that failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Sequence '{sequence}' failed at step '{step}': {source}")]
pub struct SequenceError {
    pub sequence: String,
    pub step: String,
    pub source: GaffError,
}
