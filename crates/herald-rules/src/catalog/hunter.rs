//! Creeds and drives.

use serde::{Deserialize, Serialize};

use crate::validate::normalize_key;

/// What a hunter believes their hunt is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Creed {
    /// Build, invent and repair.
    Entrepreneurial,
    /// Confront the supernatural directly.
    Faithful,
    /// Find things out.
    Inquisitive,
    /// Fight.
    Martial,
    /// Sneak and deceive.
    Underground,
}

impl Creed {
    /// All creeds.
    pub fn all() -> &'static [Self] {
        &[
            Self::Entrepreneurial,
            Self::Faithful,
            Self::Inquisitive,
            Self::Martial,
            Self::Underground,
        ]
    }

    /// Parse a creed name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let key = normalize_key(s);
        Self::all()
            .iter()
            .copied()
            .find(|c| normalize_key(&c.to_string()) == key)
    }

    /// The field of action where this creed's desperation applies.
    pub fn field(self) -> &'static str {
        match self {
            Self::Entrepreneurial => "Building, inventing, repairing",
            Self::Faithful => "Direct conflict with the supernatural",
            Self::Inquisitive => "Gaining information",
            Self::Martial => "Physical conflict",
            Self::Underground => "Stealth and subterfuge",
        }
    }
}

impl std::fmt::Display for Creed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entrepreneurial => write!(f, "Entrepreneurial"),
            Self::Faithful => write!(f, "Faithful"),
            Self::Inquisitive => write!(f, "Inquisitive"),
            Self::Martial => write!(f, "Martial"),
            Self::Underground => write!(f, "Underground"),
        }
    }
}

/// The personal reason a hunter took up the hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Drive {
    /// Needs to know.
    Curiosity,
    /// Wants payback.
    Vengeance,
    /// Bound by a promise.
    Oath,
    /// Profits from the hunt.
    Greed,
    /// Wants to win.
    Pride,
    /// Wants what the quarry has.
    Envy,
    /// Making up for something.
    Atonement,
}

impl Drive {
    /// All drives.
    pub fn all() -> &'static [Self] {
        &[
            Self::Curiosity,
            Self::Vengeance,
            Self::Oath,
            Self::Greed,
            Self::Pride,
            Self::Envy,
            Self::Atonement,
        ]
    }

    /// Parse a drive name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let key = normalize_key(s);
        Self::all()
            .iter()
            .copied()
            .find(|d| normalize_key(&d.to_string()) == key)
    }

    /// What the hunter must do to climb out of despair.
    pub fn redemption(self) -> &'static str {
        match self {
            Self::Curiosity => "Uncover new information about your quarry",
            Self::Vengeance => "Hurt your quarry",
            Self::Oath => "Actively uphold or fulfill your oath",
            Self::Greed => "Acquire resources from enemies",
            Self::Pride => "Best your quarry in some contest",
            Self::Envy => "Ally with your quarry",
            Self::Atonement => "Protect someone from your quarry",
        }
    }
}

impl std::fmt::Display for Drive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Curiosity => write!(f, "Curiosity"),
            Self::Vengeance => write!(f, "Vengeance"),
            Self::Oath => write!(f, "Oath"),
            Self::Greed => write!(f, "Greed"),
            Self::Pride => write!(f, "Pride"),
            Self::Envy => write!(f, "Envy"),
            Self::Atonement => write!(f, "Atonement"),
        }
    }
}
