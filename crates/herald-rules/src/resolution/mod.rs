//! Resolution of a Hunter dice roll.
//!
//! A roll is a regular pool plus zero or more desperation dice, compared
//! against a target number of successes:
//! - each die showing 6 or more is a success
//! - every pair of 10s adds two bonus successes (a critical)
//! - a critical with a 10 on a desperation die is messy
//! - any 1 on a desperation die forces a choice: overreach on a win,
//!   despair on a loss

pub mod engine;

pub use engine::{DiceEngine, RollRequest};

use serde::{Deserialize, Serialize};

use crate::dice::{DiceTag, RollResult, SUCCESS_THRESHOLD};

/// The fully evaluated outcome of one roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Every die rolled, tagged by pool.
    pub roll: RollResult,
    /// Successes needed to pass (difficulty plus any danger).
    pub target: u32,
    /// Dice showing 6 or more across both pools.
    pub success_count: u32,
    /// Extra successes from pairs of 10s.
    pub critical_bonus: u32,
    /// `success_count + critical_bonus`.
    pub total_successes: u32,
    /// A critical that involved at least one desperation 10.
    pub messy_critical: bool,
    /// Desperation dice showing 1.
    pub desperation_ones: u32,
    /// The roll passed with desperation 1s: the player must choose
    /// between overreach and despair.
    pub overreach_eligible: bool,
    /// The roll failed with desperation 1s: the hunter falls into despair.
    pub automatic_despair: bool,
}

impl RollOutcome {
    /// Evaluate a finished roll against `target` successes.
    pub fn evaluate(roll: RollResult, target: u32) -> Self {
        let success_count = roll.count_at_or_above(SUCCESS_THRESHOLD);
        let tens = roll.count_face(10);
        let critical_bonus = 2 * (tens / 2);
        let total_successes = success_count + critical_bonus;
        let messy_critical =
            critical_bonus > 0 && roll.count_face_by_tag(DiceTag::Desperation, 10) > 0;
        let desperation_ones = roll.count_face_by_tag(DiceTag::Desperation, 1);
        let passed = total_successes >= target;

        Self {
            roll,
            target,
            success_count,
            critical_bonus,
            total_successes,
            messy_critical,
            desperation_ones,
            overreach_eligible: desperation_ones > 0 && passed,
            automatic_despair: desperation_ones > 0 && !passed,
        }
    }

    /// Evaluate fixed faces, regular dice first.
    pub fn from_faces(regular: &[u8], desperation: &[u8], target: u32) -> Self {
        Self::evaluate(RollResult::from_faces(regular, desperation), target)
    }

    /// Whether the roll met its target.
    pub fn is_success(&self) -> bool {
        self.total_successes >= self.target
    }

    /// Successes above (or below) the target. `None` when there was no target.
    pub fn margin(&self) -> Option<i32> {
        (self.target > 0).then(|| self.total_successes as i32 - self.target as i32)
    }

    /// Faces of the regular pool.
    pub fn regular(&self) -> Vec<u8> {
        self.roll.values(DiceTag::Regular)
    }

    /// Faces of the desperation pool.
    pub fn desperation(&self) -> Vec<u8> {
        self.roll.values(DiceTag::Desperation)
    }

    /// Classify the roll by how well it went.
    pub fn tier(&self) -> SuccessTier {
        if self.total_successes == 0 {
            SuccessTier::TotalFailure
        } else if self.messy_critical {
            SuccessTier::MessyCritical
        } else if self.critical_bonus > 0 {
            SuccessTier::Critical
        } else {
            match self.total_successes {
                6.. => SuccessTier::Exceptional,
                4..=5 => SuccessTier::Complete,
                2..=3 => SuccessTier::Success,
                _ => SuccessTier::Marginal,
            }
        }
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} successes ({})",
            self.roll, self.total_successes, self.tier()
        )?;
        if let Some(margin) = self.margin() {
            write!(f, ", margin {margin:+}")?;
        }
        Ok(())
    }
}

/// How well a roll went, independent of its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuccessTier {
    /// No successes at all.
    TotalFailure,
    /// One success.
    Marginal,
    /// Two or three successes.
    Success,
    /// Four or five successes.
    Complete,
    /// Six or more successes without a critical.
    Exceptional,
    /// At least one pair of 10s.
    Critical,
    /// A critical involving a desperation die.
    MessyCritical,
}

impl std::fmt::Display for SuccessTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TotalFailure => write!(f, "Total Failure"),
            Self::Marginal => write!(f, "Marginal"),
            Self::Success => write!(f, "Success"),
            Self::Complete => write!(f, "Complete"),
            Self::Exceptional => write!(f, "Exceptional"),
            Self::Critical => write!(f, "Critical Success"),
            Self::MessyCritical => write!(f, "Messy Critical"),
        }
    }
}
