//! Hunter: The Reckoning rules engine for Herald.
//!
//! Provides d10 pool resolution with desperation dice, health and willpower
//! damage tracks, an experience ledger, the despair/redemption cycle and the
//! [`Character`] aggregate that ties them together. Everything here is pure
//! and synchronous; storage and locking live in `herald-service`.

pub mod catalog;
pub mod despair;
pub mod dice;
pub mod error;
pub mod ledger;
pub mod resolution;
pub mod sheet;
pub mod validate;

pub use catalog::{Creed, Drive, Edge, EdgeCategory, Skill, SkillCategory, SkillTemplate};
pub use despair::{
    DespairEffect, DespairState, DespairTracker, OverreachChoice, OverreachResolution,
    PendingOverreach,
};
pub use dice::{DicePool, DiceTag, DieResult, RollResult};
pub use error::{RulesError, RulesResult};
pub use ledger::{Ledger, LedgerEntry};
pub use resolution::{DiceEngine, RollOutcome, RollRequest, SuccessTier};
pub use sheet::{
    Adjustment, Attribute, AttributeGroup, Attributes, Character, CharacterRoll, DamageKind,
    DamageTrack, DesperationSource, Healing, Improvement, Item, Note, OverreachReport, Purchase,
    RollReport, TrackKind,
};
