//! Ratings, specialties and spending experience.

use serde::{Deserialize, Serialize};

use super::{Attribute, Character};
use crate::catalog::{Skill, SkillTemplate};
use crate::error::{RulesError, RulesResult};
use crate::ledger::{SPECIALTY_COST, attribute_cost, skill_cost};
use crate::validate::{ATTRIBUTE_RANGE, SKILL_RANGE, check_range, check_specialty_name};

/// Something experience can buy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Improvement {
    /// The next dot of an attribute.
    Attribute(Attribute),
    /// The next dot of a skill.
    Skill(Skill),
    /// A new specialty.
    Specialty(Skill, String),
}

impl std::fmt::Display for Improvement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attribute(a) => write!(f, "{a}"),
            Self::Skill(s) => write!(f, "{s}"),
            Self::Specialty(s, name) => write!(f, "{s} ({name})"),
        }
    }
}

/// A completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    /// What was bought.
    pub improvement: Improvement,
    /// New rating, for attributes and skills.
    pub new_rating: Option<u8>,
    /// Experience spent.
    pub cost: u32,
    /// Experience left afterwards.
    pub available: u32,
}

impl Character {
    /// Set an attribute (1-5), resizing health and willpower to match.
    pub fn set_attribute(&mut self, attr: Attribute, rating: u8) -> RulesResult<u8> {
        let old = self.attributes.get(attr);
        self.attributes.set(attr, rating)?;
        self.recompute_capacities();
        Ok(old)
    }

    /// Set a skill (0-5). Fails if the skill's specialties would no longer fit.
    pub fn set_skill(&mut self, skill: Skill, rating: u8) -> RulesResult<u8> {
        let rating = check_range(skill.name(), rating, &SKILL_RANGE)?;
        let count = self.specialty_count(skill);
        if count > 0 && (rating == 0 || count > usize::from(rating)) {
            return Err(RulesError::conflict(format!(
                "{skill} has {count} specialties; remove some before lowering it to {rating}"
            )));
        }
        Ok(self.skills.insert(skill, rating).unwrap_or(0))
    }

    /// Replace every skill rating with a template's spread.
    ///
    /// Specialties that no longer fit are dropped and returned.
    pub fn apply_skill_template(&mut self, template: SkillTemplate) -> Vec<(Skill, String)> {
        for rating in self.skills.values_mut() {
            *rating = 0;
        }
        for (skill, rating) in template.ratings() {
            self.skills.insert(skill, rating);
        }

        let mut dropped = Vec::new();
        for (skill, set) in &mut self.specialties {
            let limit = usize::from(self.skills.get(skill).copied().unwrap_or(0));
            while set.len() > limit {
                if let Some(last) = set.pop_last() {
                    dropped.push((*skill, last));
                }
            }
        }
        self.specialties.retain(|_, set| !set.is_empty());
        dropped
    }

    /// Add a specialty without spending experience.
    pub fn add_specialty(&mut self, skill: Skill, name: &str) -> RulesResult<()> {
        let name = self.check_new_specialty(skill, name)?;
        self.specialties.entry(skill).or_default().insert(name);
        Ok(())
    }

    /// Remove a specialty. Names match case-insensitively.
    pub fn remove_specialty(&mut self, skill: Skill, name: &str) -> RulesResult<String> {
        let name = name.trim();
        let found = self
            .specialties
            .get(&skill)
            .and_then(|set| set.iter().find(|s| s.eq_ignore_ascii_case(name)).cloned())
            .ok_or_else(|| RulesError::conflict(format!("{skill} has no specialty named {name}")))?;
        if let Some(set) = self.specialties.get_mut(&skill) {
            set.remove(&found);
            if set.is_empty() {
                self.specialties.remove(&skill);
            }
        }
        Ok(found)
    }

    /// Award experience. Returns what is now available.
    pub fn earn_experience(&mut self, amount: u32, reason: &str) -> RulesResult<u32> {
        self.experience.earn(amount, reason)
    }

    /// Spend experience on something outside the sheet. Returns what is left.
    pub fn spend_experience(&mut self, amount: u32, reason: &str) -> RulesResult<u32> {
        self.experience.spend(amount, reason)
    }

    /// Correct the experience totals.
    pub fn set_experience(
        &mut self,
        earned: Option<u32>,
        spent: Option<u32>,
        reason: &str,
    ) -> RulesResult<()> {
        self.experience.set(earned, spent, reason)
    }

    /// Buy an improvement at its experience cost.
    pub fn purchase(&mut self, improvement: Improvement) -> RulesResult<Purchase> {
        match improvement {
            Improvement::Attribute(attr) => {
                let next = self.attributes.get(attr).saturating_add(1);
                check_range(attr.name(), next, &ATTRIBUTE_RANGE)?;
                let cost = attribute_cost(next);
                self.experience.ensure_available(cost)?;
                self.set_attribute(attr, next)?;
                let available = self.experience.spend(cost, format!("{attr} to {next}"))?;
                Ok(Purchase {
                    improvement,
                    new_rating: Some(next),
                    cost,
                    available,
                })
            }
            Improvement::Skill(skill) => {
                let next = self.skill(skill).saturating_add(1);
                check_range(skill.name(), next, &SKILL_RANGE)?;
                let cost = skill_cost(next);
                self.experience.ensure_available(cost)?;
                self.skills.insert(skill, next);
                let available = self.experience.spend(cost, format!("{skill} to {next}"))?;
                Ok(Purchase {
                    improvement,
                    new_rating: Some(next),
                    cost,
                    available,
                })
            }
            Improvement::Specialty(skill, name) => {
                let name = self.check_new_specialty(skill, &name)?;
                self.experience.ensure_available(SPECIALTY_COST)?;
                let reason = format!("{skill} specialty: {name}");
                self.specialties.entry(skill).or_default().insert(name.clone());
                let available = self.experience.spend(SPECIALTY_COST, reason)?;
                Ok(Purchase {
                    improvement: Improvement::Specialty(skill, name),
                    new_rating: None,
                    cost: SPECIALTY_COST,
                    available,
                })
            }
        }
    }

    fn specialty_count(&self, skill: Skill) -> usize {
        self.specialties.get(&skill).map_or(0, |set| set.len())
    }

    /// Validate a specialty that is about to be added. Returns the trimmed name.
    fn check_new_specialty(&self, skill: Skill, name: &str) -> RulesResult<String> {
        let name = check_specialty_name(name)?;
        let rating = self.skill(skill);
        if rating == 0 {
            return Err(RulesError::conflict(format!(
                "{skill} needs at least one dot before it can have a specialty"
            )));
        }
        let existing = self.specialties.get(&skill);
        if existing.is_some_and(|set| set.iter().any(|s| s.eq_ignore_ascii_case(&name))) {
            return Err(RulesError::conflict(format!(
                "{skill} already has the specialty {name}"
            )));
        }
        let limit = usize::from(rating.max(1));
        if self.specialty_count(skill) >= limit {
            return Err(RulesError::conflict(format!(
                "{skill} at rating {rating} allows at most {limit} specialties"
            )));
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{Attributes, DamageKind, TrackKind};

    fn hunter() -> Character {
        Character::create("owner", "Ada", Attributes::default()).unwrap()
    }

    #[test]
    fn stamina_resizes_health() {
        let mut c = hunter();
        assert_eq!(c.health().capacity(), 4);
        assert_eq!(c.set_attribute(Attribute::Stamina, 4).unwrap(), 1);
        assert_eq!(c.health().capacity(), 7);
    }

    #[test]
    fn lowering_resolve_trims_willpower_marks() {
        let mut c = hunter();
        c.set_attribute(Attribute::Resolve, 4).unwrap();
        c.set_attribute(Attribute::Composure, 2).unwrap();
        assert_eq!(c.willpower().capacity(), 6);
        c.apply_damage(TrackKind::Willpower, DamageKind::Aggravated, 2);
        c.apply_damage(TrackKind::Willpower, DamageKind::Superficial, 3);
        c.set_attribute(Attribute::Resolve, 1).unwrap();
        let wp = c.willpower();
        assert_eq!(wp.capacity(), 3);
        assert_eq!((wp.superficial(), wp.aggravated()), (1, 2));
    }

    #[test]
    fn invalid_attribute_leaves_sheet_unchanged() {
        let mut c = hunter();
        let before = c.clone();
        assert!(c.set_attribute(Attribute::Stamina, 6).is_err());
        assert_eq!(c, before);
    }

    #[test]
    fn specialty_requires_a_dot() {
        let mut c = hunter();
        let err = c.add_specialty(Skill::Occult, "Demons").unwrap_err();
        assert!(matches!(err, RulesError::StateConflict(_)));
    }

    #[test]
    fn specialty_limit_follows_rating() {
        let mut c = hunter();
        c.set_skill(Skill::Occult, 2).unwrap();
        c.add_specialty(Skill::Occult, "Demons").unwrap();
        c.add_specialty(Skill::Occult, "Rituals").unwrap();
        assert!(c.add_specialty(Skill::Occult, "Ghosts").is_err());
        assert_eq!(c.specialties(Skill::Occult), vec!["Demons", "Rituals"]);
    }

    #[test]
    fn duplicate_specialty_rejected() {
        let mut c = hunter();
        c.set_skill(Skill::Melee, 3).unwrap();
        c.add_specialty(Skill::Melee, "Knives").unwrap();
        assert!(c.add_specialty(Skill::Melee, "knives").is_err());
    }

    #[test]
    fn remove_specialty_case_insensitive() {
        let mut c = hunter();
        c.set_skill(Skill::Melee, 1).unwrap();
        c.add_specialty(Skill::Melee, "Knives").unwrap();
        assert_eq!(c.remove_specialty(Skill::Melee, "KNIVES").unwrap(), "Knives");
        assert!(c.specialties(Skill::Melee).is_empty());
        assert!(c.remove_specialty(Skill::Melee, "Knives").is_err());
    }

    #[test]
    fn cannot_lower_skill_below_specialties() {
        let mut c = hunter();
        c.set_skill(Skill::Firearms, 2).unwrap();
        c.add_specialty(Skill::Firearms, "Rifles").unwrap();
        c.add_specialty(Skill::Firearms, "Pistols").unwrap();
        assert!(c.set_skill(Skill::Firearms, 1).is_err());
        assert!(c.set_skill(Skill::Firearms, 0).is_err());
        assert_eq!(c.skill(Skill::Firearms), 2);
        c.set_skill(Skill::Firearms, 5).unwrap();
    }

    #[test]
    fn skill_range_checked() {
        let mut c = hunter();
        assert!(c.set_skill(Skill::Brawl, 6).is_err());
        assert_eq!(c.set_skill(Skill::Brawl, 5).unwrap(), 0);
    }

    #[test]
    fn template_resets_and_drops_specialties() {
        let mut c = hunter();
        c.set_skill(Skill::Technology, 3).unwrap();
        c.add_specialty(Skill::Technology, "Hacking").unwrap();
        c.set_skill(Skill::Athletics, 1).unwrap();
        c.add_specialty(Skill::Athletics, "Running").unwrap();

        let dropped = c.apply_skill_template(SkillTemplate::Specialist);
        assert_eq!(c.skill(Skill::Athletics), 4);
        assert_eq!(c.skill(Skill::Technology), 0);
        assert_eq!(dropped, vec![(Skill::Technology, "Hacking".to_string())]);
        assert_eq!(c.specialties(Skill::Athletics), vec!["Running"]);
    }

    #[test]
    fn purchase_attribute() {
        let mut c = hunter();
        c.earn_experience(10, "session").unwrap();
        let p = c.purchase(Improvement::Attribute(Attribute::Stamina)).unwrap();
        assert_eq!(p.new_rating, Some(2));
        assert_eq!(p.cost, 8);
        assert_eq!(p.available, 2);
        assert_eq!(c.health().capacity(), 5);
    }

    #[test]
    fn purchase_skill_and_specialty() {
        let mut c = hunter();
        c.earn_experience(10, "session").unwrap();
        let p = c.purchase(Improvement::Skill(Skill::Investigation)).unwrap();
        assert_eq!((p.cost, p.available), (2, 8));
        let p = c
            .purchase(Improvement::Specialty(Skill::Investigation, " Forensics ".into()))
            .unwrap();
        assert_eq!(p.cost, 3);
        assert_eq!(
            p.improvement,
            Improvement::Specialty(Skill::Investigation, "Forensics".into())
        );
        assert_eq!(c.experience().available(), 5);
    }

    #[test]
    fn unaffordable_purchase_changes_nothing() {
        let mut c = hunter();
        c.earn_experience(7, "session").unwrap();
        let before = c.clone();
        let err = c.purchase(Improvement::Attribute(Attribute::Wits)).unwrap_err();
        assert!(matches!(
            err,
            RulesError::InsufficientResource {
                required: 8,
                available: 7,
                ..
            }
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn cannot_buy_past_maximum() {
        let mut c = hunter();
        c.earn_experience(100, "lots").unwrap();
        c.set_skill(Skill::Stealth, 5).unwrap();
        assert!(c.purchase(Improvement::Skill(Skill::Stealth)).is_err());
        assert_eq!(c.experience().available(), 100);
    }
}
