//! Ten-sided dice pools and rolling.
//!
//! Every die in a Hunter roll is a d10. Dice are tagged as either regular
//! or desperation dice so resolution can inspect the desperation pool on
//! its own.

pub mod pool;
pub mod roll;

pub use pool::DicePool;
pub use roll::{DieResult, RollResult};

use serde::{Deserialize, Serialize};

/// Number of faces on every die.
pub const DIE_SIDES: u8 = 10;

/// Lowest face that counts as a success.
pub const SUCCESS_THRESHOLD: u8 = 6;

/// Which pool a die belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiceTag {
    /// A die from the attribute + skill pool.
    #[default]
    Regular,
    /// A die added from the desperation rating.
    Desperation,
}

impl std::fmt::Display for DiceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regular => write!(f, "regular"),
            Self::Desperation => write!(f, "desperation"),
        }
    }
}
