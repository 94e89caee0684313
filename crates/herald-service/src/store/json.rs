//! Single-file JSON store used by the command-line frontend.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use herald_rules::Character;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{
    CharacterKey, CharacterStore, SettingsStore, StoreError, StoreResult, Versioned, next_version,
};

/// On-disk layout: characters grouped by owner, then by normalized name.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    characters: BTreeMap<String, BTreeMap<String, Versioned>>,
    #[serde(default)]
    active: BTreeMap<String, String>,
}

/// Every character and setting in one JSON document.
///
/// Each operation reads the file, applies its change and writes it back
/// through a temporary file and a rename.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    io: Mutex<()>,
}

impl JsonFileStore {
    /// A store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io: Mutex::new(()),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> StoreResult<StoreFile> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(StoreFile::default()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, file: &StoreFile) -> StoreResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        let text = serde_json::to_string_pretty(file)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, text).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CharacterStore for JsonFileStore {
    async fn load(&self, key: &CharacterKey) -> StoreResult<Versioned> {
        let _io = self.io.lock().await;
        self.read()
            .await?
            .characters
            .get(&key.owner)
            .and_then(|owned| owned.get(&key.name))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.clone()))
    }

    async fn save(&self, character: &Character, expected: Option<u64>) -> StoreResult<u64> {
        let _io = self.io.lock().await;
        let key = CharacterKey::of(character);
        let mut file = self.read().await?;
        let owned = file.characters.entry(key.owner.clone()).or_default();
        let version = next_version(&key, owned.get(&key.name).map(|v| v.version), expected)?;
        owned.insert(
            key.name.clone(),
            Versioned {
                version,
                character: character.clone(),
            },
        );
        self.write(&file).await?;
        Ok(version)
    }

    async fn delete(&self, key: &CharacterKey) -> StoreResult<()> {
        let _io = self.io.lock().await;
        let mut file = self.read().await?;
        let owned = file
            .characters
            .get_mut(&key.owner)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;
        owned
            .remove(&key.name)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;
        if owned.is_empty() {
            file.characters.remove(&key.owner);
        }
        self.write(&file).await
    }

    async fn list(&self, owner: &str) -> StoreResult<Vec<Character>> {
        let _io = self.io.lock().await;
        Ok(self
            .read()
            .await?
            .characters
            .remove(owner)
            .map(|owned| owned.into_values().map(|v| v.character).collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn active(&self, owner: &str) -> StoreResult<Option<String>> {
        let _io = self.io.lock().await;
        Ok(self.read().await?.active.remove(owner))
    }

    async fn set_active(&self, owner: &str, name: &str) -> StoreResult<()> {
        let _io = self.io.lock().await;
        let mut file = self.read().await?;
        file.active
            .insert(owner.to_string(), name.trim().to_lowercase());
        self.write(&file).await
    }

    async fn clear_active(&self, owner: &str) -> StoreResult<()> {
        let _io = self.io.lock().await;
        let mut file = self.read().await?;
        if file.active.remove(owner).is_some() {
            self.write(&file).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_rules::{Attributes, Skill};

    fn character(owner: &str, name: &str) -> Character {
        Character::create(owner, name, Attributes::default()).unwrap()
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("none.json"));
        assert!(store.list("u1").await.unwrap().is_empty());
        assert_eq!(store.active("u1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("herald.json");
        let mut c = character("u1", "Ada");
        c.set_skill(Skill::Occult, 3).unwrap();
        {
            let store = JsonFileStore::new(&path);
            store.save(&c, None).await.unwrap();
            store.set_active("u1", "Ada").await.unwrap();
        }
        let store = JsonFileStore::new(&path);
        let loaded = store.load(&CharacterKey::new("u1", "ADA")).await.unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.character.skill(Skill::Occult), 3);
        assert_eq!(store.active("u1").await.unwrap(), Some("ada".to_string()));
    }

    #[tokio::test]
    async fn versions_checked_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("h.json"));
        let c = character("u1", "Ada");
        store.save(&c, None).await.unwrap();
        store.save(&c, Some(1)).await.unwrap();
        assert!(matches!(
            store.save(&c, Some(1)).await,
            Err(StoreError::Conflict {
                expected: 1,
                found: 2,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("h.json"));
        store.save(&character("u1", "Ada"), None).await.unwrap();
        store.save(&character("u1", "Bea"), None).await.unwrap();
        store.delete(&CharacterKey::new("u1", "ada")).await.unwrap();
        let names: Vec<String> = store
            .list("u1")
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["Bea"]);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("h.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.list("u1").await,
            Err(StoreError::Serialization(_))
        ));
    }
}
