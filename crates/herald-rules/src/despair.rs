//! Despair and redemption.
//!
//! A hunter is either active or in despair. Failing a roll that had a
//! desperation 1 drops them into despair at once; succeeding with one
//! leaves an overreach decision pending until the player picks a side.
//! Only redemption brings a hunter back.

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};
use crate::resolution::RollOutcome;

/// Whether the hunter can draw on desperation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DespairState {
    /// Desperation dice and drive are available.
    #[default]
    Active,
    /// No desperation dice; the drive cannot be used.
    Despair,
}

impl std::fmt::Display for DespairState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Despair => write!(f, "In Despair"),
        }
    }
}

/// The player's answer to an overreach decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverreachChoice {
    /// Keep the success and raise danger by the desperation 1s.
    Overreach,
    /// Give up the success and fall into despair.
    Despair,
}

impl OverreachChoice {
    /// Parse a choice. "accept" and "reject" are accepted as aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "overreach" | "accept" => Some(Self::Overreach),
            "despair" | "reject" => Some(Self::Despair),
            _ => None,
        }
    }
}

/// An overreach decision waiting for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOverreach {
    /// Desperation 1s rolled; danger rises by this much on overreach.
    pub desperation_ones: u32,
}

/// What a roll did to the despair state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DespairEffect {
    /// Nothing changed.
    None,
    /// The roll succeeded with desperation 1s; a decision is pending.
    OverreachPending(PendingOverreach),
    /// The roll failed with desperation 1s.
    FellIntoDespair,
}

/// Outcome of settling an overreach decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverreachResolution {
    /// Success kept; raise danger by this much.
    DangerRaised(u32),
    /// Success discarded; the hunter is now in despair.
    EnteredDespair,
}

/// Serialized form of a tracker, checked on the way in.
#[derive(Deserialize)]
struct TrackerRecord {
    state: DespairState,
    #[serde(default)]
    pending: Option<PendingOverreach>,
}

impl TryFrom<TrackerRecord> for DespairTracker {
    type Error = RulesError;

    fn try_from(r: TrackerRecord) -> Result<Self, Self::Error> {
        if r.state == DespairState::Despair && r.pending.is_some() {
            return Err(RulesError::validation(
                "despair state",
                "an overreach cannot be pending while in despair",
            ));
        }
        Ok(Self {
            state: r.state,
            pending: r.pending,
        })
    }
}

/// The despair state plus any pending overreach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "TrackerRecord")]
pub struct DespairTracker {
    state: DespairState,
    pending: Option<PendingOverreach>,
}

impl DespairTracker {
    /// An active hunter with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> DespairState {
        self.state
    }

    /// Whether the hunter is in despair.
    pub fn in_despair(&self) -> bool {
        self.state == DespairState::Despair
    }

    /// The pending overreach decision, if any.
    pub fn pending(&self) -> Option<PendingOverreach> {
        self.pending
    }

    /// Whether the drive can be used for mechanics.
    pub fn drive_usable(&self) -> bool {
        !self.in_despair()
    }

    /// Desperation dice actually rolled when `requested` are asked for.
    pub fn effective_desperation(&self, requested: u32) -> u32 {
        if self.in_despair() { 0 } else { requested }
    }

    /// Apply the consequences of a finished roll.
    pub fn observe(&mut self, outcome: &RollOutcome) -> DespairEffect {
        if outcome.automatic_despair {
            self.state = DespairState::Despair;
            self.pending = None;
            DespairEffect::FellIntoDespair
        } else if outcome.overreach_eligible {
            let pending = PendingOverreach {
                desperation_ones: outcome.desperation_ones,
            };
            self.pending = Some(pending);
            DespairEffect::OverreachPending(pending)
        } else {
            DespairEffect::None
        }
    }

    /// Settle the pending overreach decision.
    pub fn resolve_overreach(&mut self, choice: OverreachChoice) -> RulesResult<OverreachResolution> {
        let pending = self
            .pending
            .take()
            .ok_or_else(|| RulesError::conflict("no overreach decision is pending"))?;
        Ok(match choice {
            OverreachChoice::Overreach => OverreachResolution::DangerRaised(pending.desperation_ones),
            OverreachChoice::Despair => {
                self.state = DespairState::Despair;
                OverreachResolution::EnteredDespair
            }
        })
    }

    /// Enter despair by command.
    pub fn enter(&mut self) -> RulesResult<()> {
        if self.in_despair() {
            return Err(RulesError::conflict("already in despair"));
        }
        self.state = DespairState::Despair;
        self.pending = None;
        Ok(())
    }

    /// Leave despair through redemption.
    pub fn redeem(&mut self) -> RulesResult<()> {
        if !self.in_despair() {
            return Err(RulesError::conflict("not in despair, nothing to redeem"));
        }
        self.state = DespairState::Active;
        Ok(())
    }
}
