//! The nine attributes and their ratings.

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};
use crate::validate::{ATTRIBUTE_RANGE, check_range, normalize_key};

/// Physical, social or mental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeGroup {
    /// Strength, Dexterity, Stamina.
    Physical,
    /// Charisma, Manipulation, Composure.
    Social,
    /// Intelligence, Wits, Resolve.
    Mental,
}

impl std::fmt::Display for AttributeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Physical => write!(f, "Physical"),
            Self::Social => write!(f, "Social"),
            Self::Mental => write!(f, "Mental"),
        }
    }
}

/// One of the nine attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Raw physical power.
    Strength,
    /// Coordination and speed.
    Dexterity,
    /// Toughness. Feeds health.
    Stamina,
    /// Charm and presence.
    Charisma,
    /// Getting others to do what you want.
    Manipulation,
    /// Keeping calm. Feeds willpower.
    Composure,
    /// Knowledge and reasoning.
    Intelligence,
    /// Quick thinking.
    Wits,
    /// Focus and determination. Feeds willpower.
    Resolve,
}

impl Attribute {
    /// All attributes in sheet order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Strength,
            Self::Dexterity,
            Self::Stamina,
            Self::Charisma,
            Self::Manipulation,
            Self::Composure,
            Self::Intelligence,
            Self::Wits,
            Self::Resolve,
        ]
    }

    /// Parse an attribute name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let key = normalize_key(s);
        Self::all()
            .iter()
            .copied()
            .find(|a| normalize_key(a.name()) == key)
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Stamina => "Stamina",
            Self::Charisma => "Charisma",
            Self::Manipulation => "Manipulation",
            Self::Composure => "Composure",
            Self::Intelligence => "Intelligence",
            Self::Wits => "Wits",
            Self::Resolve => "Resolve",
        }
    }

    /// The group this attribute belongs to.
    pub fn group(self) -> AttributeGroup {
        match self {
            Self::Strength | Self::Dexterity | Self::Stamina => AttributeGroup::Physical,
            Self::Charisma | Self::Manipulation | Self::Composure => AttributeGroup::Social,
            Self::Intelligence | Self::Wits | Self::Resolve => AttributeGroup::Mental,
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Ratings for all nine attributes, each 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AttributesRecord")]
pub struct Attributes {
    ratings: [u8; 9],
}

/// Serialized form of [`Attributes`], checked on the way in.
#[derive(Deserialize)]
struct AttributesRecord {
    ratings: [u8; 9],
}

impl TryFrom<AttributesRecord> for Attributes {
    type Error = RulesError;

    fn try_from(r: AttributesRecord) -> Result<Self, Self::Error> {
        for (attr, rating) in Attribute::all().iter().zip(r.ratings) {
            check_range(attr.name(), rating, &ATTRIBUTE_RANGE)?;
        }
        Ok(Self { ratings: r.ratings })
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            ratings: [*ATTRIBUTE_RANGE.start(); 9],
        }
    }
}

impl Attributes {
    /// Build from explicit ratings. Any attribute not listed stays at 1.
    pub fn from_ratings(ratings: &[(Attribute, u8)]) -> RulesResult<Self> {
        let mut attrs = Self::default();
        for (attr, rating) in ratings {
            attrs.set(*attr, *rating)?;
        }
        Ok(attrs)
    }

    /// Current rating of `attr`.
    pub fn get(&self, attr: Attribute) -> u8 {
        self.ratings[attr as usize]
    }

    /// Set `attr` to `rating` (1-5).
    pub fn set(&mut self, attr: Attribute, rating: u8) -> RulesResult<()> {
        self.ratings[attr as usize] = check_range(attr.name(), rating, &ATTRIBUTE_RANGE)?;
        Ok(())
    }

    /// Health capacity: Stamina + 3.
    pub fn health(&self) -> u32 {
        u32::from(self.get(Attribute::Stamina)) + 3
    }

    /// Willpower capacity: Composure + Resolve.
    pub fn willpower(&self) -> u32 {
        u32::from(self.get(Attribute::Composure)) + u32::from(self.get(Attribute::Resolve))
    }

    /// Iterate `(attribute, rating)` in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, u8)> + '_ {
        Attribute::all().iter().map(|a| (*a, self.get(*a)))
    }
}
