//! The hunter character sheet.
//!
//! [`Character`] is the unit of consistency: every rules operation goes
//! through one of its methods, which validates first and only then
//! mutates. A rejected call leaves the character exactly as it was.

pub mod attributes;
pub mod edges;
pub mod gameplay;
pub mod inventory;
pub mod progression;
pub mod track;

pub use attributes::{Attribute, AttributeGroup, Attributes};
pub use gameplay::{
    Adjustment, CharacterRoll, DesperationSource, Healing, OverreachReport, RollReport, TrackKind,
};
pub use inventory::{Item, Note};
pub use progression::{Improvement, Purchase};
pub use track::{DamageKind, DamageTrack};

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Creed, Drive, Edge, Skill};
use crate::despair::DespairTracker;
use crate::error::{RulesError, RulesResult};
use crate::ledger::Ledger;
use crate::validate::{
    SKILL_RANGE, TENSION_RANGE, check_character_name, check_range, check_specialty_name,
    check_text,
};

/// A hunter and everything the rules track about them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CharacterRecord")]
pub struct Character {
    id: Uuid,
    owner: String,
    name: String,
    attributes: Attributes,
    skills: BTreeMap<Skill, u8>,
    specialties: BTreeMap<Skill, BTreeSet<String>>,
    health: DamageTrack,
    willpower: DamageTrack,
    desperation: u8,
    danger: u8,
    creed: Option<Creed>,
    drive: Option<Drive>,
    ambition: String,
    desire: String,
    despair: DespairTracker,
    edges: BTreeSet<Edge>,
    perks: BTreeMap<Edge, BTreeSet<String>>,
    experience: Ledger,
    items: Vec<Item>,
    notes: Vec<Note>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Character {
    /// Create a new hunter with every skill at 0 and undamaged tracks.
    pub fn create(owner: impl Into<String>, name: &str, attributes: Attributes) -> RulesResult<Self> {
        let name = check_character_name(name)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            name,
            attributes,
            skills: Skill::all().iter().map(|s| (*s, 0)).collect(),
            specialties: BTreeMap::new(),
            health: DamageTrack::new(attributes.health()),
            willpower: DamageTrack::new(attributes.willpower()),
            desperation: 0,
            danger: 0,
            creed: None,
            drive: None,
            ambition: String::new(),
            desire: String::new(),
            despair: DespairTracker::new(),
            edges: BTreeSet::new(),
            perks: BTreeMap::new(),
            experience: Ledger::new(),
            items: Vec::new(),
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Stable identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The player who owns this hunter.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute ratings.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Rating of one attribute.
    pub fn attribute(&self, attr: Attribute) -> u8 {
        self.attributes.get(attr)
    }

    /// Rating of one skill.
    pub fn skill(&self, skill: Skill) -> u8 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }

    /// Every skill with its rating, in catalog order.
    pub fn skills(&self) -> impl Iterator<Item = (Skill, u8)> + '_ {
        Skill::all().iter().map(|s| (*s, self.skill(*s)))
    }

    /// Specialties of one skill, alphabetically.
    pub fn specialties(&self, skill: Skill) -> Vec<&str> {
        self.specialties
            .get(&skill)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Every specialty as `(skill, name)`.
    pub fn all_specialties(&self) -> impl Iterator<Item = (Skill, &str)> + '_ {
        self.specialties
            .iter()
            .flat_map(|(skill, set)| set.iter().map(move |s| (*skill, s.as_str())))
    }

    /// The health track.
    pub fn health(&self) -> &DamageTrack {
        &self.health
    }

    /// The willpower track.
    pub fn willpower(&self) -> &DamageTrack {
        &self.willpower
    }

    /// Current desperation (0-10).
    pub fn desperation(&self) -> u8 {
        self.desperation
    }

    /// Current danger (0-10).
    pub fn danger(&self) -> u8 {
        self.danger
    }

    /// Creed, if chosen.
    pub fn creed(&self) -> Option<Creed> {
        self.creed
    }

    /// Drive, if chosen. Kept while in despair even though it cannot be used.
    pub fn drive(&self) -> Option<Drive> {
        self.drive
    }

    /// What the hunter must do to redeem themselves, from their drive.
    pub fn redemption(&self) -> Option<&'static str> {
        self.drive.map(Drive::redemption)
    }

    /// Long-term goal.
    pub fn ambition(&self) -> &str {
        &self.ambition
    }

    /// Short-term want.
    pub fn desire(&self) -> &str {
        &self.desire
    }

    /// Despair state and any pending overreach.
    pub fn despair(&self) -> &DespairTracker {
        &self.despair
    }

    /// Acquired edges.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    /// Whether `edge` has been acquired.
    pub fn has_edge(&self, edge: Edge) -> bool {
        self.edges.contains(&edge)
    }

    /// Acquired perks of one edge.
    pub fn perks(&self, edge: Edge) -> Vec<&str> {
        self.perks
            .get(&edge)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// The experience ledger.
    pub fn experience(&self) -> &Ledger {
        &self.experience
    }

    /// When the hunter was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the hunter was last modified.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Record a modification time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Bring both track capacities in line with the attributes.
    fn recompute_capacities(&mut self) {
        self.health.set_capacity(self.attributes.health());
        self.willpower.set_capacity(self.attributes.willpower());
    }
}

/// Serialized form of a [`Character`], checked on the way in.
#[derive(Deserialize)]
struct CharacterRecord {
    id: Uuid,
    owner: String,
    name: String,
    attributes: Attributes,
    #[serde(default)]
    skills: BTreeMap<Skill, u8>,
    #[serde(default)]
    specialties: BTreeMap<Skill, BTreeSet<String>>,
    health: DamageTrack,
    willpower: DamageTrack,
    desperation: u8,
    danger: u8,
    creed: Option<Creed>,
    drive: Option<Drive>,
    #[serde(default)]
    ambition: String,
    #[serde(default)]
    desire: String,
    #[serde(default)]
    despair: DespairTracker,
    #[serde(default)]
    edges: BTreeSet<Edge>,
    #[serde(default)]
    perks: BTreeMap<Edge, BTreeSet<String>>,
    #[serde(default)]
    experience: Ledger,
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    notes: Vec<Note>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CharacterRecord> for Character {
    type Error = RulesError;

    fn try_from(r: CharacterRecord) -> Result<Self, Self::Error> {
        let name = check_character_name(&r.name)?;
        let mut skills: BTreeMap<Skill, u8> = Skill::all().iter().map(|s| (*s, 0)).collect();
        for (skill, rating) in r.skills {
            skills.insert(skill, check_range(skill.name(), rating, &SKILL_RANGE)?);
        }
        for (skill, set) in &r.specialties {
            let rating = skills.get(skill).copied().unwrap_or(0);
            if !set.is_empty() && (rating == 0 || set.len() > usize::from(rating)) {
                return Err(RulesError::conflict(format!(
                    "{skill} has {} specialties at rating {rating}",
                    set.len()
                )));
            }
            for specialty in set {
                check_specialty_name(specialty)?;
            }
        }
        check_range("desperation", r.desperation, &TENSION_RANGE)?;
        check_range("danger", r.danger, &TENSION_RANGE)?;
        check_text("ambition", &r.ambition)?;
        check_text("desire", &r.desire)?;
        for (edge, set) in &r.perks {
            if !set.is_empty() && !r.edges.contains(edge) {
                return Err(RulesError::conflict(format!(
                    "perks recorded for {edge}, which is not acquired"
                )));
            }
            if let Some(unknown) = set.iter().find(|p| edge.perk(p).is_none()) {
                return Err(RulesError::validation(
                    "perk",
                    format!("{unknown} is not a perk of {edge}"),
                ));
            }
        }

        inventory::check_inventory(&r.items, &r.notes)?;

        let mut character = Self {
            id: r.id,
            owner: r.owner,
            name,
            attributes: r.attributes,
            skills,
            specialties: r.specialties,
            health: r.health,
            willpower: r.willpower,
            desperation: r.desperation,
            danger: r.danger,
            creed: r.creed,
            drive: r.drive,
            ambition: r.ambition,
            desire: r.desire,
            despair: r.despair,
            edges: r.edges,
            perks: r.perks,
            experience: r.experience,
            items: r.items,
            notes: r.notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        };
        character.recompute_capacities();
        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hunter() -> Character {
        let attrs = Attributes::from_ratings(&[
            (Attribute::Stamina, 3),
            (Attribute::Composure, 2),
            (Attribute::Resolve, 3),
        ])
        .unwrap();
        Character::create("owner-1", "Ada", attrs).unwrap()
    }

    #[test]
    fn create_derives_tracks() {
        let c = hunter();
        assert_eq!(c.health().capacity(), 6);
        assert_eq!(c.willpower().capacity(), 5);
        assert_eq!(c.skills().count(), 27);
        assert!(c.skills().all(|(_, r)| r == 0));
        assert_eq!(c.desperation(), 0);
        assert!(!c.despair().in_despair());
        assert_eq!(c.experience().available(), 0);
    }

    #[test]
    fn create_validates_name() {
        assert!(Character::create("o", "x", Attributes::default()).is_err());
        assert!(Character::create("o", "#tag", Attributes::default()).is_err());
        let c = Character::create("o", "  Bea  ", Attributes::default()).unwrap();
        assert_eq!(c.name(), "Bea");
    }

    #[test]
    fn redemption_follows_drive() {
        let mut c = hunter();
        assert_eq!(c.redemption(), None);
        c.set_drive(Some(Drive::Oath));
        assert_eq!(c.redemption(), Some("Actively uphold or fulfill your oath"));
    }

    #[test]
    fn serde_round_trip_preserves_state() {
        let mut c = hunter();
        c.set_skill(Skill::Firearms, 2).unwrap();
        c.add_specialty(Skill::Firearms, "Pistols").unwrap();
        c.apply_damage(TrackKind::Health, DamageKind::Superficial, 2);
        c.add_edge(Edge::Arsenal).unwrap();
        c.add_perk(Edge::Arsenal, "exotics").unwrap();
        c.earn_experience(5, "session").unwrap();
        c.add_item("Crowbar", Some("Rusty")).unwrap();
        c.add_note("Lead", "The old mill").unwrap();
        let json = serde_json::to_string(&c).unwrap();
        let back: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn deserialize_recomputes_capacity() {
        let c = hunter();
        let mut value = serde_json::to_value(&c).unwrap();
        value["health"]["capacity"] = serde_json::json!(9);
        let back: Character = serde_json::from_value(value).unwrap();
        assert_eq!(back.health().capacity(), 6);
    }

    #[test]
    fn deserialize_rejects_orphan_specialty() {
        let c = hunter();
        let mut value = serde_json::to_value(&c).unwrap();
        value["specialties"] = serde_json::json!({ "occult": ["Demons"] });
        assert!(serde_json::from_value::<Character>(value).is_err());
    }

    #[test]
    fn deserialize_rejects_perk_without_edge() {
        let c = hunter();
        let mut value = serde_json::to_value(&c).unwrap();
        value["perks"] = serde_json::json!({ "fleet": ["Armor"] });
        assert!(serde_json::from_value::<Character>(value).is_err());
    }

    #[test]
    fn deserialize_rejects_duplicate_items() {
        let c = hunter();
        let mut value = serde_json::to_value(&c).unwrap();
        value["items"] = serde_json::json!([{ "name": "Rope" }, { "name": "rope" }]);
        assert!(serde_json::from_value::<Character>(value).is_err());
    }

    #[test]
    fn older_records_without_inventory_load() {
        let c = hunter();
        let mut value = serde_json::to_value(&c).unwrap();
        let record = value.as_object_mut().unwrap();
        record.remove("items");
        record.remove("notes");
        let back: Character = serde_json::from_value(value).unwrap();
        assert!(back.items().is_empty());
        assert_eq!(back.notes().count(), 0);
    }
}
