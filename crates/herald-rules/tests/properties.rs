//! Integration property-based tests for the rules engine.

use herald_rules::{
    DamageKind, DamageTrack, DiceEngine, Ledger, RollOutcome, RollRequest, RulesError,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone)]
enum TrackOp {
    Damage(DamageKind, u32),
    Heal(DamageKind, u32),
    HealAll,
    Resize(u32),
}

fn kind() -> impl Strategy<Value = DamageKind> {
    prop_oneof![Just(DamageKind::Superficial), Just(DamageKind::Aggravated)]
}

fn track_op() -> impl Strategy<Value = TrackOp> {
    prop_oneof![
        (kind(), 0u32..15).prop_map(|(k, n)| TrackOp::Damage(k, n)),
        (kind(), 0u32..15).prop_map(|(k, n)| TrackOp::Heal(k, n)),
        Just(TrackOp::HealAll),
        (1u32..=10).prop_map(TrackOp::Resize),
    ]
}

#[derive(Debug, Clone)]
enum LedgerOp {
    Earn(u32),
    Spend(u32),
    Set(Option<u32>, Option<u32>),
}

fn ledger_op() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        (0u32..50).prop_map(LedgerOp::Earn),
        (0u32..50).prop_map(LedgerOp::Spend),
        (proptest::option::of(0u32..100), proptest::option::of(0u32..100))
            .prop_map(|(e, s)| LedgerOp::Set(e, s)),
    ]
}

proptest! {
    #[test]
    fn outcome_arithmetic(
        regular in proptest::collection::vec(1u8..=10, 1..40),
        desperation in proptest::collection::vec(1u8..=10, 0..=10),
        target in 0u32..=16,
    ) {
        let o = RollOutcome::from_faces(&regular, &desperation, target);
        let tens = regular.iter().chain(&desperation).filter(|d| **d == 10).count() as u32;

        prop_assert_eq!(o.total_successes, o.success_count + o.critical_bonus);
        prop_assert_eq!(o.critical_bonus % 2, 0);
        prop_assert_eq!(o.critical_bonus / 2, tens / 2);
        prop_assert_eq!(
            o.desperation_ones,
            desperation.iter().filter(|d| **d == 1).count() as u32
        );
        if o.messy_critical {
            prop_assert!(o.critical_bonus > 0 && desperation.contains(&10));
        }
        if o.automatic_despair {
            prop_assert!(o.desperation_ones > 0 && o.total_successes < target);
        }
        if o.overreach_eligible {
            prop_assert!(o.desperation_ones > 0 && o.total_successes >= target);
        }
        prop_assert!(!(o.automatic_despair && o.overreach_eligible));
    }

    #[test]
    fn engine_respects_pool_sizes(
        pool in 1u32..=100,
        desperation in 0u32..=10,
        difficulty in 0u32..=6,
        seed in any::<u64>(),
    ) {
        let req = RollRequest::new(pool, difficulty).with_desperation(desperation);
        let o = DiceEngine::resolve_with(&req, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(o.regular().len() as u32, pool);
        prop_assert_eq!(o.desperation().len() as u32, desperation);
        prop_assert!(o.regular().iter().chain(o.desperation().iter()).all(|d| (1..=10).contains(d)));
    }

    #[test]
    fn track_never_overfills(capacity in 1u32..=10, ops in proptest::collection::vec(track_op(), 0..30)) {
        let mut t = DamageTrack::new(capacity);
        for op in ops {
            match op {
                TrackOp::Damage(k, n) => t.apply(k, n),
                TrackOp::Heal(k, n) => t.heal(k, n),
                TrackOp::HealAll => t.heal_all(),
                TrackOp::Resize(c) => t.set_capacity(c),
            }
            prop_assert!(t.superficial() + t.aggravated() <= t.capacity());
            prop_assert!(t.aggravated() <= t.capacity());
        }
        t.heal_all();
        prop_assert_eq!((t.superficial(), t.aggravated()), (0, 0));
    }

    #[test]
    fn aggravated_only_grows_under_damage(capacity in 1u32..=10, hits in proptest::collection::vec((kind(), 0u32..8), 0..20)) {
        let mut t = DamageTrack::new(capacity);
        for (k, n) in hits {
            let before = t.aggravated();
            t.apply(k, n);
            prop_assert!(t.aggravated() >= before);
        }
    }

    #[test]
    fn ledger_spent_never_exceeds_earned(ops in proptest::collection::vec(ledger_op(), 0..40)) {
        let mut ledger = Ledger::new();
        for op in ops {
            let before = ledger.clone();
            let result = match op {
                LedgerOp::Earn(n) => ledger.earn(n, "prop").map(|_| ()),
                LedgerOp::Spend(n) => ledger.spend(n, "prop").map(|_| ()),
                LedgerOp::Set(e, s) => ledger.set(e, s, "prop"),
            };
            if result.is_err() {
                prop_assert_eq!(&ledger, &before);
            }
            if let Err(RulesError::InsufficientResource { required, available, .. }) = result {
                prop_assert!(required > available);
            }
            prop_assert!(ledger.spent() <= ledger.earned());
            prop_assert_eq!(ledger.available(), ledger.earned() - ledger.spent());
        }
    }
}
