//! Integration scenario tests for the rules engine.

use herald_rules::{
    Attribute, Attributes, Character, CharacterRoll, DamageKind, DamageTrack, DespairEffect,
    DespairState, DesperationSource, Improvement, Ledger, RollOutcome, RulesError, Skill,
    TrackKind,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn critical_pair_without_desperation() {
    let o = RollOutcome::from_faces(&[6, 7, 10, 10, 3], &[], 2);
    assert_eq!(o.success_count, 4);
    assert_eq!(o.critical_bonus, 2);
    assert_eq!(o.total_successes, 6);
    assert_eq!(o.margin(), Some(4));
    assert!(!o.messy_critical);
}

#[test]
fn failed_desperation_roll_falls_into_despair() {
    let o = RollOutcome::from_faces(&[2, 3, 9], &[1, 10], 3);
    assert_eq!(o.success_count, 2);
    assert_eq!(o.critical_bonus, 0);
    assert_eq!(o.total_successes, 2);
    assert!(o.automatic_despair);
    assert!(!o.overreach_eligible);
}

#[test]
fn superficial_overflow_on_six_box_track() {
    let mut t = DamageTrack::new(6);
    t.apply_superficial(4);
    t.apply_superficial(4);
    assert_eq!((t.superficial(), t.aggravated()), (4, 2));
}

#[test]
fn overspending_is_rejected_without_change() {
    let mut ledger = Ledger::new();
    ledger.earn(10, "sessions").unwrap();
    ledger.spend(8, "skills").unwrap();
    let before = ledger.clone();
    let err = ledger.spend(3, "edge").unwrap_err();
    assert!(matches!(
        err,
        RulesError::InsufficientResource {
            required: 3,
            available: 2,
            ..
        }
    ));
    assert_eq!(ledger, before);
}

#[test]
fn rolls_in_despair_never_add_desperation_dice() {
    let mut c = Character::create("p1", "Morgan", Attributes::default()).unwrap();
    c.enter_despair().unwrap();
    for seed in 0..50 {
        let req = CharacterRoll::new(4, 2).with_desperation(DesperationSource::Dice(5));
        let report = c.roll_with(&req, &mut StdRng::seed_from_u64(seed)).unwrap();
        assert!(report.outcome.desperation().is_empty());
        assert_eq!(report.effect, DespairEffect::None);
        assert_eq!(report.state, DespairState::Despair);
    }
}

#[test]
fn redemption_from_active_is_a_conflict() {
    let mut c = Character::create("p1", "Morgan", Attributes::default()).unwrap();
    assert!(matches!(
        c.exit_redemption(),
        Err(RulesError::StateConflict(_))
    ));
}

#[test]
fn a_session_of_play() {
    let attrs = Attributes::from_ratings(&[
        (Attribute::Stamina, 2),
        (Attribute::Composure, 3),
        (Attribute::Resolve, 2),
    ])
    .unwrap();
    let mut c = Character::create("p1", "Morgan", attrs).unwrap();
    assert_eq!(c.health().capacity(), 5);
    assert_eq!(c.willpower().capacity(), 5);

    c.earn_experience(20, "first hunt").unwrap();
    c.purchase(Improvement::Attribute(Attribute::Stamina)).unwrap();
    assert_eq!(c.health().capacity(), 6);
    c.purchase(Improvement::Skill(Skill::Occult)).unwrap();
    c.purchase(Improvement::Specialty(Skill::Occult, "Vampires".into()))
        .unwrap();
    assert_eq!(c.experience().available(), 20 - 12 - 2 - 3);

    c.apply_damage(TrackKind::Health, DamageKind::Aggravated, 2);
    c.set_attribute(Attribute::Stamina, 1).unwrap();
    assert_eq!(c.health().capacity(), 4);
    assert_eq!(c.health().aggravated(), 2);

    let before = c.clone();
    assert!(
        c.purchase(Improvement::Specialty(Skill::Occult, "Ghosts".into()))
            .is_err()
    );
    assert_eq!(c, before);
}
