//! Storage, per-character locking and command operations for Herald.
//!
//! [`HeraldService`] is the entry point for front ends. It serializes
//! commands on the same `(owner, name)` pair with a bounded wait and lets
//! commands on different characters run in parallel. Storage is reached
//! through the async [`CharacterStore`] and [`SettingsStore`] ports; a
//! [`MemoryStore`] and a [`JsonFileStore`] are bundled.

pub mod config;
pub mod error;
pub mod locks;
pub mod service;
pub mod store;

pub use config::{ConfigError, ServiceConfig};
pub use error::{ServiceError, ServiceResult};
pub use locks::{CharacterGuard, CharacterLocks};
pub use service::{HeraldService, NewCharacter, Roster, Updated, XpPage};
pub use store::{
    CharacterKey, CharacterStore, JsonFileStore, MemoryStore, SettingsStore, StoreError,
    StoreResult, Versioned,
};
