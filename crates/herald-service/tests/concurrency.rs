//! Integration concurrency tests for the herald service.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use herald_rules::{Character, Edge};
use herald_service::{
    CharacterKey, CharacterStore, HeraldService, MemoryStore, NewCharacter, ServiceConfig,
    ServiceError, SettingsStore, StoreError, StoreResult, Versioned,
};

/// Delegates to a memory store, sleeping on every load.
struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
}

/// Delegates to a memory store, refusing the first few updates with a
/// version conflict.
struct FlakyStore {
    inner: MemoryStore,
    conflicts_left: AtomicU32,
    saves: AtomicU32,
}

#[async_trait]
impl CharacterStore for SlowStore {
    async fn load(&self, key: &CharacterKey) -> StoreResult<Versioned> {
        tokio::time::sleep(self.delay).await;
        self.inner.load(key).await
    }
    async fn save(&self, character: &Character, expected: Option<u64>) -> StoreResult<u64> {
        self.inner.save(character, expected).await
    }
    async fn delete(&self, key: &CharacterKey) -> StoreResult<()> {
        self.inner.delete(key).await
    }
    async fn list(&self, owner: &str) -> StoreResult<Vec<Character>> {
        self.inner.list(owner).await
    }
}

#[async_trait]
impl SettingsStore for SlowStore {
    async fn active(&self, owner: &str) -> StoreResult<Option<String>> {
        self.inner.active(owner).await
    }
    async fn set_active(&self, owner: &str, name: &str) -> StoreResult<()> {
        self.inner.set_active(owner, name).await
    }
    async fn clear_active(&self, owner: &str) -> StoreResult<()> {
        self.inner.clear_active(owner).await
    }
}

#[async_trait]
impl CharacterStore for FlakyStore {
    async fn load(&self, key: &CharacterKey) -> StoreResult<Versioned> {
        self.inner.load(key).await
    }
    async fn save(&self, character: &Character, expected: Option<u64>) -> StoreResult<u64> {
        if let Some(expected) = expected {
            self.saves.fetch_add(1, Ordering::SeqCst);
            let left = self.conflicts_left.load(Ordering::SeqCst);
            if left > 0 {
                self.conflicts_left.store(left - 1, Ordering::SeqCst);
                return Err(StoreError::Conflict {
                    key: CharacterKey::of(character),
                    expected,
                    found: expected + 1,
                });
            }
        }
        self.inner.save(character, expected).await
    }
    async fn delete(&self, key: &CharacterKey) -> StoreResult<()> {
        self.inner.delete(key).await
    }
    async fn list(&self, owner: &str) -> StoreResult<Vec<Character>> {
        self.inner.list(owner).await
    }
}

#[async_trait]
impl SettingsStore for FlakyStore {
    async fn active(&self, owner: &str) -> StoreResult<Option<String>> {
        self.inner.active(owner).await
    }
    async fn set_active(&self, owner: &str, name: &str) -> StoreResult<()> {
        self.inner.set_active(owner, name).await
    }
    async fn clear_active(&self, owner: &str) -> StoreResult<()> {
        self.inner.clear_active(owner).await
    }
}

fn slow_service(delay_ms: u64, timeout_ms: u64) -> Arc<HeraldService> {
    let store = Arc::new(SlowStore {
        inner: MemoryStore::new(),
        delay: Duration::from_millis(delay_ms),
    });
    let config = ServiceConfig::default().with_lock_timeout(Duration::from_millis(timeout_ms));
    Arc::new(HeraldService::new(store, config))
}

fn flaky_service(conflicts: u32, retries: u32) -> (Arc<FlakyStore>, HeraldService) {
    let store = Arc::new(FlakyStore {
        inner: MemoryStore::new(),
        conflicts_left: AtomicU32::new(conflicts),
        saves: AtomicU32::new(0),
    });
    let config = ServiceConfig::default().with_max_retries(retries);
    (store.clone(), HeraldService::new(store, config))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_on_one_character_are_serialized() {
    let svc = Arc::new(HeraldService::new(
        Arc::new(MemoryStore::new()),
        ServiceConfig::default(),
    ));
    svc.create("u1", NewCharacter::new("Ada")).await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let svc = svc.clone();
        tasks.push(tokio::spawn(async move {
            svc.earn_xp("u1", Some("Ada"), 1, &format!("session {i}"))
                .await
                .map(|u| u.version)
        }));
    }
    let mut versions = Vec::new();
    for task in tasks {
        versions.push(task.await.unwrap().unwrap());
    }
    versions.sort_unstable();
    versions.dedup();
    assert_eq!(versions.len(), 20, "every commit got its own version");

    let ada = svc.sheet("u1", Some("ada")).await.unwrap();
    assert_eq!(ada.experience().earned(), 20);
    assert_eq!(ada.experience().entries().len(), 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn held_character_reports_busy() {
    let svc = slow_service(400, 100);
    svc.create("u1", NewCharacter::new("Ada")).await.unwrap();

    let first = {
        let svc = svc.clone();
        tokio::spawn(async move { svc.add_edge("u1", Some("Ada"), Edge::Library).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let err = svc.earn_xp("u1", Some("Ada"), 1, "late").await.unwrap_err();
    assert!(matches!(err, ServiceError::Busy { ref name } if name == "ada"));
    assert!(err.is_transient());

    first.await.unwrap().unwrap();
    let ada = svc.sheet("u1", Some("Ada")).await.unwrap();
    assert!(ada.has_edge(Edge::Library));
    assert_eq!(ada.experience().earned(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_characters_do_not_wait_for_each_other() {
    let svc = slow_service(300, 100);
    svc.create("u1", NewCharacter::new("Ada")).await.unwrap();
    svc.create("u1", NewCharacter::new("Bea")).await.unwrap();
    svc.create("u2", NewCharacter::new("Ada")).await.unwrap();

    let a = {
        let svc = svc.clone();
        tokio::spawn(async move { svc.earn_xp("u1", Some("Ada"), 2, "a").await })
    };
    let b = {
        let svc = svc.clone();
        tokio::spawn(async move { svc.earn_xp("u1", Some("Bea"), 3, "b").await })
    };
    let c = {
        let svc = svc.clone();
        tokio::spawn(async move { svc.earn_xp("u2", Some("Ada"), 4, "c").await })
    };
    assert_eq!(a.await.unwrap().unwrap().value, 2);
    assert_eq!(b.await.unwrap().unwrap().value, 3);
    assert_eq!(c.await.unwrap().unwrap().value, 4);
}

#[tokio::test]
async fn version_conflict_is_retried() {
    let (store, svc) = flaky_service(2, 3);
    svc.create("u1", NewCharacter::new("Ada")).await.unwrap();
    let updated = svc.earn_xp("u1", None, 5, "session").await.unwrap();
    assert_eq!(updated.value, 5);
    assert_eq!(store.saves.load(Ordering::SeqCst), 3);

    let ada = svc.sheet("u1", None).await.unwrap();
    assert_eq!(ada.experience().earned(), 5);
    assert_eq!(ada.experience().entries().len(), 1);
}

#[tokio::test]
async fn retries_are_bounded() {
    let (store, svc) = flaky_service(10, 2);
    svc.create("u1", NewCharacter::new("Ada")).await.unwrap();
    let err = svc.earn_xp("u1", None, 5, "session").await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict { attempts: 3, .. }));
    assert!(err.is_transient());
    assert_eq!(store.saves.load(Ordering::SeqCst), 3);
    assert_eq!(svc.sheet("u1", None).await.unwrap().experience().earned(), 0);
}
