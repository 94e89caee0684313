//! Error types for service operations.

use herald_rules::RulesError;

use crate::store::StoreError;

/// Errors surfaced to the command layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The rules rejected the operation; nothing was changed.
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// No such character.
    #[error("no character named '{name}'")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// A character with this name already exists for the owner.
    #[error("a character named '{name}' already exists")]
    AlreadyExists {
        /// The conflicting name.
        name: String,
    },

    /// No name was given and the owner has no active character.
    #[error("no active character; create one or switch to one first")]
    NoActiveCharacter,

    /// Another command held the character for longer than the lock timeout.
    #[error("character '{name}' is busy, try again")]
    Busy {
        /// The contested character.
        name: String,
    },

    /// Every retry after a version conflict lost the race.
    #[error("character '{name}' kept changing during the update ({attempts} attempts), try again")]
    Conflict {
        /// The contested character.
        name: String,
        /// Saves attempted.
        attempts: u32,
    },

    /// The store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    /// Whether retrying the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Busy { .. } | Self::Conflict { .. })
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(key) => Self::NotFound { name: key.name },
            StoreError::AlreadyExists(key) => Self::AlreadyExists { name: key.name },
            StoreError::Conflict { key, .. } => Self::Conflict {
                name: key.name,
                attempts: 1,
            },
            StoreError::Backend(msg) | StoreError::Serialization(msg) => Self::Storage(msg),
        }
    }
}

/// Convenience result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CharacterKey;

    #[test]
    fn store_errors_map_to_service_errors() {
        let key = CharacterKey::new("u1", "Ada");
        assert!(matches!(
            ServiceError::from(StoreError::NotFound(key.clone())),
            ServiceError::NotFound { ref name } if name == "ada"
        ));
        assert!(ServiceError::from(StoreError::Conflict {
            key,
            expected: 1,
            found: 2
        })
        .is_transient());
        assert!(!ServiceError::from(StoreError::Backend("disk".into())).is_transient());
    }

    #[test]
    fn rules_errors_pass_through() {
        let e = ServiceError::from(RulesError::conflict("already in despair"));
        assert_eq!(e.to_string(), "already in despair");
    }
}
