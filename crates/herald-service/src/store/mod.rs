//! Storage ports and the two bundled adapters.
//!
//! Characters are stored one record per `(owner, name)`, each with a
//! version number that every successful save increments. A save that
//! names a stale version is refused, so concurrent writers cannot
//! silently overwrite each other.

pub mod error;
pub mod json;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use json::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use herald_rules::Character;
use serde::{Deserialize, Serialize};

/// Identity of a character: its owner and its name, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterKey {
    /// The owning player.
    pub owner: String,
    /// Lowercased, trimmed character name.
    pub name: String,
}

impl CharacterKey {
    /// Build a key, normalizing the name.
    pub fn new(owner: impl Into<String>, name: &str) -> Self {
        Self {
            owner: owner.into(),
            name: name.trim().to_lowercase(),
        }
    }

    /// The key a character is stored under.
    pub fn of(character: &Character) -> Self {
        Self::new(character.owner(), character.name())
    }
}

impl std::fmt::Display for CharacterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' (owner {})", self.name, self.owner)
    }
}

/// A stored character and the version it was read at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Versioned {
    /// Incremented by every successful save.
    pub version: u64,
    /// The stored character.
    pub character: Character,
}

/// Keyed character storage.
#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// Load one character.
    async fn load(&self, key: &CharacterKey) -> StoreResult<Versioned>;

    /// Save a character. With `expected: None` the record must not exist
    /// yet; otherwise the stored version must equal `expected`.
    /// Returns the new version.
    async fn save(&self, character: &Character, expected: Option<u64>) -> StoreResult<u64>;

    /// Delete one character.
    async fn delete(&self, key: &CharacterKey) -> StoreResult<()>;

    /// Every character of one owner, ordered by name.
    async fn list(&self, owner: &str) -> StoreResult<Vec<Character>>;
}

/// Per-owner settings: which character is active.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Normalized name of the owner's active character.
    async fn active(&self, owner: &str) -> StoreResult<Option<String>>;

    /// Point the owner at a character.
    async fn set_active(&self, owner: &str, name: &str) -> StoreResult<()>;

    /// Forget the owner's active character.
    async fn clear_active(&self, owner: &str) -> StoreResult<()>;
}

/// Check `expected` against the stored version and return the next one.
pub(crate) fn next_version(
    key: &CharacterKey,
    current: Option<u64>,
    expected: Option<u64>,
) -> StoreResult<u64> {
    match (current, expected) {
        (None, None) => Ok(1),
        (Some(_), None) => Err(StoreError::AlreadyExists(key.clone())),
        (None, Some(_)) => Err(StoreError::NotFound(key.clone())),
        (Some(found), Some(expected)) if found == expected => Ok(found + 1),
        (Some(found), Some(expected)) => Err(StoreError::Conflict {
            key: key.clone(),
            expected,
            found,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_case_insensitive() {
        assert_eq!(CharacterKey::new("u1", " Ada "), CharacterKey::new("u1", "ADA"));
        assert_ne!(CharacterKey::new("u1", "Ada"), CharacterKey::new("u2", "Ada"));
    }

    #[test]
    fn version_rules() {
        let key = CharacterKey::new("u", "ada");
        assert_eq!(next_version(&key, None, None).unwrap(), 1);
        assert_eq!(next_version(&key, Some(4), Some(4)).unwrap(), 5);
        assert!(matches!(
            next_version(&key, Some(1), None),
            Err(StoreError::AlreadyExists(_))
        ));
        assert!(matches!(
            next_version(&key, None, Some(1)),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            next_version(&key, Some(3), Some(2)),
            Err(StoreError::Conflict {
                expected: 2,
                found: 3,
                ..
            })
        ));
    }
}
