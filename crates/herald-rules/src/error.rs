//! Error types for the rules engine.

/// Errors raised when a rules operation is rejected.
///
/// A rejected operation never mutates the character it was applied to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// An input was outside its allowed range or not a known catalog entry.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// The offending input.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A spend asked for more of a resource than is available.
    #[error("insufficient {resource}: need {required}, have {available}")]
    InsufficientResource {
        /// The resource that ran short (e.g. "experience").
        resource: &'static str,
        /// Amount the operation required.
        required: u32,
        /// Amount currently available.
        available: u32,
    },

    /// The operation is not allowed in the character's current state.
    #[error("{0}")]
    StateConflict(String),
}

impl RulesError {
    /// Build a validation error for `field`.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Build a state conflict error.
    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::StateConflict(reason.into())
    }
}

/// Convenience result type for rules operations.
pub type RulesResult<T> = Result<T, RulesError>;
