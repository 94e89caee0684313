//! In-memory store, for tests and embedding.

use std::collections::HashMap;

use async_trait::async_trait;
use herald_rules::Character;
use tokio::sync::RwLock;

use super::{
    CharacterKey, CharacterStore, SettingsStore, StoreError, StoreResult, Versioned, next_version,
};

/// Characters and settings held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    characters: RwLock<HashMap<CharacterKey, Versioned>>,
    active: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterStore for MemoryStore {
    async fn load(&self, key: &CharacterKey) -> StoreResult<Versioned> {
        self.characters
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.clone()))
    }

    async fn save(&self, character: &Character, expected: Option<u64>) -> StoreResult<u64> {
        let key = CharacterKey::of(character);
        let mut guard = self.characters.write().await;
        let version = next_version(&key, guard.get(&key).map(|v| v.version), expected)?;
        guard.insert(
            key,
            Versioned {
                version,
                character: character.clone(),
            },
        );
        Ok(version)
    }

    async fn delete(&self, key: &CharacterKey) -> StoreResult<()> {
        self.characters
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.clone()))
    }

    async fn list(&self, owner: &str) -> StoreResult<Vec<Character>> {
        let guard = self.characters.read().await;
        let mut found: Vec<(&CharacterKey, &Versioned)> =
            guard.iter().filter(|(k, _)| k.owner == owner).collect();
        found.sort_by(|a, b| a.0.cmp(b.0));
        Ok(found.into_iter().map(|(_, v)| v.character.clone()).collect())
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn active(&self, owner: &str) -> StoreResult<Option<String>> {
        Ok(self.active.read().await.get(owner).cloned())
    }

    async fn set_active(&self, owner: &str, name: &str) -> StoreResult<()> {
        self.active
            .write()
            .await
            .insert(owner.to_string(), name.trim().to_lowercase());
        Ok(())
    }

    async fn clear_active(&self, owner: &str) -> StoreResult<()> {
        self.active.write().await.remove(owner);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_rules::Attributes;

    fn character(owner: &str, name: &str) -> Character {
        Character::create(owner, name, Attributes::default()).unwrap()
    }

    #[tokio::test]
    async fn save_and_load() {
        let store = MemoryStore::new();
        let c = character("u1", "Ada");
        assert_eq!(store.save(&c, None).await.unwrap(), 1);
        let loaded = store.load(&CharacterKey::new("u1", "ada")).await.unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.character, c);
    }

    #[tokio::test]
    async fn stale_save_conflicts() {
        let store = MemoryStore::new();
        let c = character("u1", "Ada");
        store.save(&c, None).await.unwrap();
        assert_eq!(store.save(&c, Some(1)).await.unwrap(), 2);
        assert!(matches!(
            store.save(&c, Some(1)).await,
            Err(StoreError::Conflict { .. })
        ));
        assert!(matches!(
            store.save(&c, None).await,
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn list_is_per_owner_and_sorted() {
        let store = MemoryStore::new();
        for (owner, name) in [("u1", "Zed"), ("u1", "Ada"), ("u2", "Bob")] {
            store.save(&character(owner, name), None).await.unwrap();
        }
        let names: Vec<String> = store
            .list("u1")
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["Ada", "Zed"]);
    }

    #[tokio::test]
    async fn delete_and_missing() {
        let store = MemoryStore::new();
        let key = CharacterKey::new("u1", "Ada");
        store.save(&character("u1", "Ada"), None).await.unwrap();
        store.delete(&key).await.unwrap();
        assert!(matches!(store.load(&key).await, Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete(&key).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn active_pointer() {
        let store = MemoryStore::new();
        assert_eq!(store.active("u1").await.unwrap(), None);
        store.set_active("u1", "Ada").await.unwrap();
        assert_eq!(store.active("u1").await.unwrap(), Some("ada".to_string()));
        store.clear_active("u1").await.unwrap();
        assert_eq!(store.active("u1").await.unwrap(), None);
    }
}
