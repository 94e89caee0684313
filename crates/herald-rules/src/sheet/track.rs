//! Health and willpower damage tracks.
//!
//! A track has a capacity and two kinds of marks. Superficial marks that
//! no longer fit overflow into aggravated marks; aggravated marks that no
//! longer fit are discarded. At no point do the marks exceed the capacity.

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};
use crate::validate::normalize_key;

/// The two kinds of damage a track can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    /// Bruises and exhaustion; heals quickly.
    Superficial,
    /// Lasting harm.
    Aggravated,
}

impl DamageKind {
    /// Parse a damage kind, accepting "sup"/"agg" as short forms.
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_key(s).as_str() {
            "superficial" | "sup" => Some(Self::Superficial),
            "aggravated" | "agg" => Some(Self::Aggravated),
            _ => None,
        }
    }
}

impl std::fmt::Display for DamageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Superficial => write!(f, "superficial"),
            Self::Aggravated => write!(f, "aggravated"),
        }
    }
}

/// Serialized form of a track, checked on the way in.
#[derive(Deserialize)]
struct TrackRecord {
    capacity: u32,
    superficial: u32,
    aggravated: u32,
}

impl TryFrom<TrackRecord> for DamageTrack {
    type Error = RulesError;

    fn try_from(r: TrackRecord) -> Result<Self, Self::Error> {
        Self::with_marks(r.capacity, r.superficial, r.aggravated)
    }
}

/// One damage track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TrackRecord")]
pub struct DamageTrack {
    capacity: u32,
    superficial: u32,
    aggravated: u32,
}

impl DamageTrack {
    /// An undamaged track.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            superficial: 0,
            aggravated: 0,
        }
    }

    /// A track with existing marks. Fails if the marks do not fit.
    pub fn with_marks(capacity: u32, superficial: u32, aggravated: u32) -> RulesResult<Self> {
        if superficial
            .checked_add(aggravated)
            .is_none_or(|marked| marked > capacity)
        {
            return Err(RulesError::validation(
                "damage track",
                format!(
                    "{superficial} superficial and {aggravated} aggravated exceed capacity {capacity}"
                ),
            ));
        }
        Ok(Self {
            capacity,
            superficial,
            aggravated,
        })
    }

    /// Total boxes on the track.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Superficial marks.
    pub fn superficial(&self) -> u32 {
        self.superficial
    }

    /// Aggravated marks.
    pub fn aggravated(&self) -> u32 {
        self.aggravated
    }

    /// Unmarked boxes.
    pub fn remaining(&self) -> u32 {
        self.capacity - self.superficial - self.aggravated
    }

    /// Every box is marked.
    pub fn is_incapacitated(&self) -> bool {
        self.superficial + self.aggravated >= self.capacity
    }

    /// Apply damage of either kind.
    pub fn apply(&mut self, kind: DamageKind, amount: u32) {
        match kind {
            DamageKind::Superficial => self.apply_superficial(amount),
            DamageKind::Aggravated => self.apply_aggravated(amount),
        }
    }

    /// Mark superficial damage. What does not fit becomes aggravated.
    pub fn apply_superficial(&mut self, amount: u32) {
        let room = self.remaining();
        if amount <= room {
            self.superficial += amount;
            return;
        }
        self.superficial = self.capacity - self.aggravated;
        self.apply_aggravated(amount - room);
    }

    /// Mark aggravated damage, pushing superficial marks off the track.
    pub fn apply_aggravated(&mut self, amount: u32) {
        self.aggravated = self.aggravated.saturating_add(amount).min(self.capacity);
        self.superficial = self.superficial.min(self.capacity - self.aggravated);
    }

    /// Remove up to `amount` marks of one kind.
    pub fn heal(&mut self, kind: DamageKind, amount: u32) {
        match kind {
            DamageKind::Superficial => self.superficial = self.superficial.saturating_sub(amount),
            DamageKind::Aggravated => self.aggravated = self.aggravated.saturating_sub(amount),
        }
    }

    /// Clear every mark.
    pub fn heal_all(&mut self) {
        self.superficial = 0;
        self.aggravated = 0;
    }

    /// Change the capacity, keeping aggravated marks over superficial ones.
    pub fn set_capacity(&mut self, capacity: u32) {
        self.capacity = capacity;
        self.aggravated = self.aggravated.min(capacity);
        self.superficial = self.superficial.min(capacity - self.aggravated);
    }
}

impl std::fmt::Display for DamageTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} ({} superficial, {} aggravated)",
            self.remaining(),
            self.capacity,
            self.superficial,
            self.aggravated
        )
    }
}
