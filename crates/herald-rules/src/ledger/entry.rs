//! Ledger entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single change to a character's experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LedgerEntry {
    /// Experience awarded.
    Earn {
        /// Points added to the earned total.
        amount: u32,
        /// Why it was awarded.
        reason: String,
        /// When it was recorded.
        timestamp: DateTime<Utc>,
    },
    /// Experience spent.
    Spend {
        /// Points added to the spent total.
        amount: u32,
        /// What it was spent on.
        reason: String,
        /// When it was recorded.
        timestamp: DateTime<Utc>,
    },
    /// Totals overwritten by an administrator.
    Correction {
        /// Earned total after the correction.
        earned: u32,
        /// Spent total after the correction.
        spent: u32,
        /// Why the totals were corrected.
        reason: String,
        /// When it was recorded.
        timestamp: DateTime<Utc>,
    },
}

impl LedgerEntry {
    /// When the entry was recorded.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Earn { timestamp, .. }
            | Self::Spend { timestamp, .. }
            | Self::Correction { timestamp, .. } => *timestamp,
        }
    }

    /// The recorded reason.
    pub fn reason(&self) -> &str {
        match self {
            Self::Earn { reason, .. }
            | Self::Spend { reason, .. }
            | Self::Correction { reason, .. } => reason,
        }
    }
}

impl std::fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Earn { amount, .. } => write!(f, "+{amount} earned")?,
            Self::Spend { amount, .. } => write!(f, "-{amount} spent")?,
            Self::Correction { earned, spent, .. } => {
                write!(f, "set to {earned} earned / {spent} spent")?
            }
        }
        if !self.reason().is_empty() {
            write!(f, ": {}", self.reason())?;
        }
        Ok(())
    }
}
