//! One async mutex per character.
//!
//! A command holds its character's lock for the whole load, mutate and
//! save cycle. Commands on different characters never wait for each other.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::{ServiceError, ServiceResult};
use crate::store::CharacterKey;

/// Held while a command owns a character.
pub type CharacterGuard = OwnedMutexGuard<()>;

/// Lazily created per-character locks.
#[derive(Debug, Default)]
pub struct CharacterLocks {
    locks: DashMap<CharacterKey, Arc<Mutex<()>>>,
}

impl CharacterLocks {
    /// An empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait up to `timeout` for exclusive access to `key`.
    pub async fn acquire(&self, key: &CharacterKey, timeout: Duration) -> ServiceResult<CharacterGuard> {
        let lock = self.locks.entry(key.clone()).or_default().clone();
        tokio::time::timeout(timeout, lock.lock_owned())
            .await
            .map_err(|_| ServiceError::Busy {
                name: key.name.clone(),
            })
    }

    /// Drop the lock for `key` unless someone holds or awaits it.
    pub fn forget(&self, key: &CharacterKey) {
        self.locks.remove_if(key, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Number of characters with a lock entry.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no lock entries exist.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
