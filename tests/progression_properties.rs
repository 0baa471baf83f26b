//! Property tests for experience, level, rank and phase gating

use admirals_chronicle::chronicle::Chronicle;
use admirals_chronicle::fleet::ShipClass;
use admirals_chronicle::progression::{
    level_for_experience, AdmiralRank, ModulePhase, LEVEL_THRESHOLDS,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Gain(u64),
    Academy,
    AddShip(usize),
    Unlock(usize),
    Mastery(u32),
    Sync(u32, u64),
    FleetSize(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..3_000).prop_map(Op::Gain),
        Just(Op::Academy),
        (0usize..ShipClass::ALL.len()).prop_map(Op::AddShip),
        (0usize..ModulePhase::ALL.len()).prop_map(Op::Unlock),
        (0u32..250).prop_map(Op::Mastery),
        (0u32..12, 0u64..10_000).prop_map(|(l, e)| Op::Sync(l, e)),
        (0usize..20).prop_map(Op::FleetSize),
    ]
}

fn apply(chronicle: &mut Chronicle, op: &Op) {
    match *op {
        Op::Gain(amount) => chronicle.gain_experience(amount),
        Op::Academy => {
            chronicle.complete_academy();
        }
        Op::AddShip(i) => {
            chronicle.add_ship(ShipClass::ALL[i]);
        }
        Op::Unlock(i) => {
            chronicle.unlock_phase(ModulePhase::ALL[i]);
        }
        Op::Mastery(p) => chronicle.update_helm_mastery(p),
        Op::Sync(level, experience) => {
            chronicle.sync_from_external_progress(level, experience, &[ShipClass::Frigate])
        }
        Op::FleetSize(n) => chronicle.sync_fleet_size(n),
    }
}

fn assert_consistent(chronicle: &Chronicle) {
    assert_eq!(chronicle.level(), level_for_experience(chronicle.experience()));
    assert_eq!(chronicle.rank(), AdmiralRank::for_level(chronicle.level()));
    assert!(chronicle.is_phase_unlocked(ModulePhase::Academy));
    if chronicle.experience() >= LEVEL_THRESHOLDS[1] {
        assert!(chronicle.is_phase_unlocked(ModulePhase::Helm));
    }
    if chronicle.experience() >= LEVEL_THRESHOLDS[5] {
        assert!(chronicle.is_phase_unlocked(ModulePhase::Command));
    }
    if chronicle.experience() >= 8000 {
        assert!(chronicle.is_phase_unlocked(ModulePhase::Loom));
    }
    assert!(chronicle.helm_mastery() <= 100);
    if let Some(active) = chronicle.active_ship() {
        assert!(chronicle.ships().iter().any(|s| s.id == active.id));
    }
}

proptest! {
    #[test]
    fn level_is_monotonic(a in 0u64..20_000, b in 0u64..20_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(level_for_experience(lo) <= level_for_experience(hi));
    }

    #[test]
    fn rank_follows_level(xp in 0u64..20_000) {
        let mut chronicle = Chronicle::new();
        chronicle.gain_experience(xp);
        prop_assert_eq!(chronicle.rank(), AdmiralRank::for_level(level_for_experience(xp)));
    }

    #[test]
    fn zero_gain_is_a_pure_recompute(xp in 0u64..20_000) {
        let mut chronicle = Chronicle::new();
        chronicle.gain_experience(xp);
        let before = chronicle.snapshot();
        chronicle.gain_experience(0);
        prop_assert_eq!(chronicle.experience(), xp);
        prop_assert_eq!(chronicle.snapshot(), before);
        assert_consistent(&chronicle);
    }

    #[test]
    fn gains_are_additive(start in 0u64..5_000, a in 0u64..5_000, b in 0u64..5_000) {
        let mut chronicle = Chronicle::new();
        chronicle.gain_experience(start);
        chronicle.gain_experience(a);
        chronicle.gain_experience(b);
        prop_assert_eq!(chronicle.experience(), start + a + b);
    }

    #[test]
    fn invariants_hold_and_phases_only_grow(ops in prop::collection::vec(op(), 1..40)) {
        let mut chronicle = Chronicle::new();
        let mut experience = 0;
        let mut ship_ids = Vec::new();
        for op in &ops {
            let phases_before: Vec<ModulePhase> = chronicle.unlocked_phases().iter().collect();
            let unlocked_before: Vec<String> = chronicle
                .achievements()
                .iter()
                .filter(|a| a.unlocked)
                .map(|a| a.id.clone())
                .collect();

            apply(&mut chronicle, op);
            assert_consistent(&chronicle);

            prop_assert!(chronicle.experience() >= experience);
            experience = chronicle.experience();

            for phase in phases_before {
                prop_assert!(chronicle.is_phase_unlocked(phase));
            }
            for id in unlocked_before {
                prop_assert!(chronicle.achievement(&id).map(|a| a.unlocked).unwrap_or(false));
            }

            let ids: Vec<_> = chronicle.ships().iter().map(|s| s.id).collect();
            prop_assert!(ids.starts_with(&ship_ids));
            ship_ids = ids;
        }
    }

    #[test]
    fn snapshot_restore_preserves_state(ops in prop::collection::vec(op(), 0..20)) {
        let mut chronicle = Chronicle::new();
        for op in &ops {
            apply(&mut chronicle, op);
        }
        let restored = Chronicle::restore(chronicle.snapshot());
        prop_assert_eq!(restored.snapshot(), chronicle.snapshot());
    }
}
