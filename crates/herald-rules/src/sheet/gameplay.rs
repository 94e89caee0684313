//! Rolling, damage, tension and despair on a character.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{Character, DamageKind, DamageTrack};
use crate::catalog::{Creed, Drive};
use crate::despair::{DespairEffect, DespairState, OverreachChoice, OverreachResolution};
use crate::error::{RulesError, RulesResult};
use crate::resolution::{DiceEngine, RollOutcome, RollRequest};
use crate::validate::{DESPERATION_DICE_RANGE, TENSION_RANGE, check_range, check_text};

/// Which damage track an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    /// Physical harm.
    Health,
    /// Mental strain.
    Willpower,
}

impl TrackKind {
    /// Parse a track name; "hp" and "wp" are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "health" | "hp" => Some(Self::Health),
            "willpower" | "wp" => Some(Self::Willpower),
            _ => None,
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Health => write!(f, "Health"),
            Self::Willpower => write!(f, "Willpower"),
        }
    }
}

/// How much to heal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Healing {
    /// Remove up to this many superficial marks.
    Superficial(u32),
    /// Remove up to this many aggravated marks.
    Aggravated(u32),
    /// Clear the track.
    All,
}

/// A change to desperation or danger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    /// Set an exact value (must be 0-10).
    Set(u8),
    /// Raise, stopping at 10.
    Add(u8),
    /// Lower, stopping at 0.
    Subtract(u8),
    /// Back to 0.
    Reset,
}

impl Adjustment {
    fn apply(self, field: &'static str, current: u8) -> RulesResult<u8> {
        let max = *TENSION_RANGE.end();
        match self {
            Self::Set(value) => check_range(field, value, &TENSION_RANGE),
            Self::Add(n) => Ok(current.saturating_add(n).min(max)),
            Self::Subtract(n) => Ok(current.saturating_sub(n)),
            Self::Reset => Ok(0),
        }
    }
}

/// Where a roll's desperation dice come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesperationSource {
    /// No desperation dice.
    #[default]
    None,
    /// As many dice as the current desperation rating.
    Rating,
    /// An explicit number of dice.
    Dice(u32),
}

/// A roll made by a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRoll {
    /// Regular dice.
    pub pool: u32,
    /// Successes needed, before danger.
    pub difficulty: u32,
    /// Desperation dice to add.
    pub desperation: DesperationSource,
    /// Add the current danger rating to the difficulty.
    pub include_danger: bool,
}

impl CharacterRoll {
    /// A plain roll with no desperation and no danger.
    pub fn new(pool: u32, difficulty: u32) -> Self {
        Self {
            pool,
            difficulty,
            desperation: DesperationSource::None,
            include_danger: false,
        }
    }

    /// Draw desperation dice from `source`.
    pub fn with_desperation(mut self, source: DesperationSource) -> Self {
        self.desperation = source;
        self
    }

    /// Raise the target by the character's danger.
    pub fn with_danger(mut self) -> Self {
        self.include_danger = true;
        self
    }
}

/// Everything a caller needs to report a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollReport {
    /// The evaluated dice.
    pub outcome: RollOutcome,
    /// What the roll did to the despair state.
    pub effect: DespairEffect,
    /// Desperation dice asked for but not rolled because of despair.
    pub suppressed_desperation: u32,
    /// Despair state after the roll.
    pub state: DespairState,
}

/// Result of settling an overreach decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverreachReport {
    /// What the decision did.
    pub resolution: OverreachResolution,
    /// Danger afterwards.
    pub danger: u8,
    /// Despair state afterwards.
    pub state: DespairState,
}

impl Character {
    /// Roll with a fresh, independently seeded RNG.
    pub fn roll(&mut self, request: &CharacterRoll) -> RulesResult<RollReport> {
        let mut rng = StdRng::from_os_rng();
        self.roll_with(request, &mut rng)
    }

    /// Roll with a caller-provided RNG.
    ///
    /// Desperation dice are dropped while in despair. A roll is refused
    /// while an earlier overreach decision is still open.
    pub fn roll_with<R: Rng>(&mut self, request: &CharacterRoll, rng: &mut R) -> RulesResult<RollReport> {
        if self.despair.pending().is_some() {
            return Err(RulesError::conflict(
                "resolve the pending overreach decision before rolling again",
            ));
        }
        let requested = match request.desperation {
            DesperationSource::None => 0,
            DesperationSource::Dice(n) => check_range("desperation dice", n, &DESPERATION_DICE_RANGE)?,
            DesperationSource::Rating => {
                if self.desperation == 0 && !self.despair.in_despair() {
                    return Err(RulesError::conflict(
                        "desperation is 0; there are no desperation dice to add",
                    ));
                }
                u32::from(self.desperation)
            }
        };
        let effective = self.despair.effective_desperation(requested);
        let danger = if request.include_danger { self.danger } else { 0 };
        let roll = RollRequest::new(request.pool, request.difficulty)
            .with_desperation(effective)
            .with_danger(danger);

        let outcome = DiceEngine::resolve_with(&roll, rng)?;
        let effect = self.despair.observe(&outcome);
        Ok(RollReport {
            outcome,
            effect,
            suppressed_desperation: requested - effective,
            state: self.despair.state(),
        })
    }

    /// Settle a pending overreach: raise danger or fall into despair.
    pub fn resolve_overreach(&mut self, choice: OverreachChoice) -> RulesResult<OverreachReport> {
        let resolution = self.despair.resolve_overreach(choice)?;
        if let OverreachResolution::DangerRaised(ones) = resolution {
            let ones = u8::try_from(ones).unwrap_or(u8::MAX);
            self.danger = Adjustment::Add(ones).apply("danger", self.danger)?;
        }
        Ok(OverreachReport {
            resolution,
            danger: self.danger,
            state: self.despair.state(),
        })
    }

    /// Mark damage on a track. Returns the track afterwards.
    pub fn apply_damage(&mut self, track: TrackKind, kind: DamageKind, amount: u32) -> DamageTrack {
        let t = self.track_mut(track);
        t.apply(kind, amount);
        *t
    }

    /// Heal a track. Returns the track afterwards.
    pub fn heal(&mut self, track: TrackKind, healing: Healing) -> DamageTrack {
        let t = self.track_mut(track);
        match healing {
            Healing::Superficial(n) => t.heal(DamageKind::Superficial, n),
            Healing::Aggravated(n) => t.heal(DamageKind::Aggravated, n),
            Healing::All => t.heal_all(),
        }
        *t
    }

    /// Change desperation. Returns the new rating.
    pub fn adjust_desperation(&mut self, change: Adjustment) -> RulesResult<u8> {
        self.desperation = change.apply("desperation", self.desperation)?;
        Ok(self.desperation)
    }

    /// Change danger. Returns the new rating.
    pub fn adjust_danger(&mut self, change: Adjustment) -> RulesResult<u8> {
        self.danger = change.apply("danger", self.danger)?;
        Ok(self.danger)
    }

    /// Fall into despair by choice or narrative.
    pub fn enter_despair(&mut self) -> RulesResult<DespairState> {
        self.despair.enter()?;
        Ok(self.despair.state())
    }

    /// Climb out of despair after fulfilling the drive's redemption.
    pub fn exit_redemption(&mut self) -> RulesResult<DespairState> {
        self.despair.redeem()?;
        Ok(self.despair.state())
    }

    /// Set or clear the creed. Returns the previous one.
    pub fn set_creed(&mut self, creed: Option<Creed>) -> Option<Creed> {
        std::mem::replace(&mut self.creed, creed)
    }

    /// Set or clear the drive. Returns the previous one.
    pub fn set_drive(&mut self, drive: Option<Drive>) -> Option<Drive> {
        std::mem::replace(&mut self.drive, drive)
    }

    /// Set the ambition (up to 200 characters).
    pub fn set_ambition(&mut self, text: &str) -> RulesResult<()> {
        self.ambition = check_text("ambition", text)?;
        Ok(())
    }

    /// Set the desire (up to 200 characters).
    pub fn set_desire(&mut self, text: &str) -> RulesResult<()> {
        self.desire = check_text("desire", text)?;
        Ok(())
    }

    fn track_mut(&mut self, track: TrackKind) -> &mut DamageTrack {
        match track {
            TrackKind::Health => &mut self.health,
            TrackKind::Willpower => &mut self.willpower,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{Attribute, Attributes};

    fn hunter() -> Character {
        let attrs = Attributes::from_ratings(&[(Attribute::Stamina, 3)]).unwrap();
        Character::create("owner", "Ada", attrs).unwrap()
    }

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn plain_roll() {
        let mut c = hunter();
        let report = c.roll_with(&CharacterRoll::new(5, 2), &mut seeded()).unwrap();
        assert_eq!(report.outcome.regular().len(), 5);
        assert!(report.outcome.desperation().is_empty());
        assert_eq!(report.suppressed_desperation, 0);
        assert_eq!(report.effect, DespairEffect::None);
    }

    #[test]
    fn rating_source_uses_desperation() {
        let mut c = hunter();
        c.adjust_desperation(Adjustment::Set(3)).unwrap();
        let req = CharacterRoll::new(4, 0).with_desperation(DesperationSource::Rating);
        let report = c.roll_with(&req, &mut seeded()).unwrap();
        assert_eq!(report.outcome.desperation().len(), 3);
    }

    #[test]
    fn rating_source_with_zero_rating_conflicts() {
        let mut c = hunter();
        let req = CharacterRoll::new(4, 1).with_desperation(DesperationSource::Rating);
        assert!(matches!(
            c.roll_with(&req, &mut seeded()),
            Err(RulesError::StateConflict(_))
        ));
    }

    #[test]
    fn despair_suppresses_desperation_dice() {
        let mut c = hunter();
        c.enter_despair().unwrap();
        let req = CharacterRoll::new(3, 1).with_desperation(DesperationSource::Dice(4));
        let report = c.roll_with(&req, &mut seeded()).unwrap();
        assert!(report.outcome.desperation().is_empty());
        assert_eq!(report.suppressed_desperation, 4);
        assert_eq!(report.state, DespairState::Despair);
    }

    #[test]
    fn danger_added_when_requested() {
        let mut c = hunter();
        c.adjust_danger(Adjustment::Set(2)).unwrap();
        let report = c
            .roll_with(&CharacterRoll::new(3, 3).with_danger(), &mut seeded())
            .unwrap();
        assert_eq!(report.outcome.target, 5);
        let report = c.roll_with(&CharacterRoll::new(3, 3), &mut seeded()).unwrap();
        assert_eq!(report.outcome.target, 3);
    }

    #[test]
    fn invalid_roll_changes_nothing() {
        let mut c = hunter();
        let before = c.clone();
        assert!(c.roll_with(&CharacterRoll::new(0, 1), &mut seeded()).is_err());
        assert!(
            c.roll_with(
                &CharacterRoll::new(3, 1).with_desperation(DesperationSource::Dice(11)),
                &mut seeded()
            )
            .is_err()
        );
        assert_eq!(c, before);
    }

    /// Roll until the seeded RNG produces an overreach, then return the character.
    fn character_with_pending_overreach() -> (Character, u32) {
        for seed in 0..10_000 {
            let mut c = hunter();
            let req = CharacterRoll::new(10, 0).with_desperation(DesperationSource::Dice(5));
            let report = c
                .roll_with(&req, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            if let DespairEffect::OverreachPending(p) = report.effect {
                return (c, p.desperation_ones);
            }
        }
        panic!("no overreach in 10000 seeded rolls");
    }

    #[test]
    fn pending_overreach_blocks_next_roll() {
        let (mut c, _) = character_with_pending_overreach();
        assert!(matches!(
            c.roll_with(&CharacterRoll::new(2, 1), &mut seeded()),
            Err(RulesError::StateConflict(_))
        ));
    }

    #[test]
    fn accepting_overreach_raises_danger() {
        let (mut c, ones) = character_with_pending_overreach();
        let report = c.resolve_overreach(OverreachChoice::Overreach).unwrap();
        assert_eq!(report.danger, ones as u8);
        assert_eq!(report.state, DespairState::Active);
        assert!(c.despair().pending().is_none());
    }

    #[test]
    fn overreach_danger_clamps_at_ten() {
        let (mut c, _) = character_with_pending_overreach();
        c.adjust_danger(Adjustment::Set(10)).unwrap();
        let report = c.resolve_overreach(OverreachChoice::Overreach).unwrap();
        assert_eq!(report.danger, 10);
    }

    #[test]
    fn rejecting_overreach_enters_despair() {
        let (mut c, _) = character_with_pending_overreach();
        let report = c.resolve_overreach(OverreachChoice::Despair).unwrap();
        assert_eq!(report.state, DespairState::Despair);
        assert_eq!(c.danger(), 0);
    }

    #[test]
    fn damage_and_heal() {
        let mut c = hunter();
        let t = c.apply_damage(TrackKind::Health, DamageKind::Superficial, 4);
        assert_eq!((t.superficial(), t.aggravated()), (4, 0));
        let t = c.apply_damage(TrackKind::Health, DamageKind::Superficial, 4);
        assert_eq!((t.superficial(), t.aggravated()), (4, 2));
        assert!(t.is_incapacitated());
        let t = c.heal(TrackKind::Health, Healing::Superficial(1));
        assert_eq!((t.superficial(), t.aggravated()), (3, 2));
        let t = c.heal(TrackKind::Health, Healing::All);
        assert_eq!((t.superficial(), t.aggravated()), (0, 0));
        assert_eq!(c.willpower().superficial(), 0);
    }

    #[test]
    fn tension_adjustments() {
        let mut c = hunter();
        assert_eq!(c.adjust_desperation(Adjustment::Add(4)).unwrap(), 4);
        assert_eq!(c.adjust_desperation(Adjustment::Add(9)).unwrap(), 10);
        assert_eq!(c.adjust_desperation(Adjustment::Subtract(12)).unwrap(), 0);
        assert!(c.adjust_danger(Adjustment::Set(11)).is_err());
        assert_eq!(c.adjust_danger(Adjustment::Set(7)).unwrap(), 7);
        assert_eq!(c.adjust_danger(Adjustment::Reset).unwrap(), 0);
    }

    #[test]
    fn despair_round_trip() {
        let mut c = hunter();
        assert!(matches!(c.exit_redemption(), Err(RulesError::StateConflict(_))));
        assert_eq!(c.enter_despair().unwrap(), DespairState::Despair);
        assert!(c.enter_despair().is_err());
        assert_eq!(c.exit_redemption().unwrap(), DespairState::Active);
    }

    #[test]
    fn drive_kept_in_despair() {
        let mut c = hunter();
        c.set_drive(Some(Drive::Greed));
        c.enter_despair().unwrap();
        assert_eq!(c.drive(), Some(Drive::Greed));
        assert!(!c.despair().drive_usable());
    }

    #[test]
    fn text_fields() {
        let mut c = hunter();
        c.set_ambition("Burn the nest").unwrap();
        assert_eq!(c.ambition(), "Burn the nest");
        assert!(c.set_desire(&"x".repeat(201)).is_err());
        assert_eq!(c.set_creed(Some(Creed::Martial)), None);
        assert_eq!(c.creed(), Some(Creed::Martial));
    }

    #[test]
    fn parse_track() {
        assert_eq!(TrackKind::parse("HP"), Some(TrackKind::Health));
        assert_eq!(TrackKind::parse("willpower"), Some(TrackKind::Willpower));
        assert_eq!(TrackKind::parse("mana"), None);
    }
}
