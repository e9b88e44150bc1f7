//! Property-based tests for ranking, the off-course clamp and the fuel model.

use std::cmp::Ordering;

use proptest::prelude::*;
use salvo_core::components::{PartRecord, ProjectileRecord, TargetRecord};
use salvo_core::config::GuidanceConfig;
use salvo_core::types::{Position, Velocity};

use crate::decision::TargetingDecision;
use crate::geometry::GeometryCache;
use crate::ranking::{best_target_for_missile, compare_targets};

fn projectile() -> ProjectileRecord {
    ProjectileRecord {
        id: 1,
        position: Position::new(0.0, 100.0, 0.0),
        velocity: Velocity::new(0.0, 0.0, 150.0),
        time_since_launch: 5.0,
    }
}

fn air_missile(config: &GuidanceConfig) -> TargetingDecision {
    let parts = vec![
        PartRecord {
            index: 0,
            name: "variable thruster".into(),
            registers: Vec::new(),
        },
        PartRecord {
            index: 1,
            name: "fuel tank".into(),
            registers: Vec::new(),
        },
    ];
    TargetingDecision::from_parts(0, &parts, config)
}

/// Target at a bearing/elevation/distance from the test projectile.
fn placed(id: u64, bearing_deg: f64, y: f64, distance: f64) -> TargetRecord {
    let b = bearing_deg.to_radians();
    TargetRecord {
        id,
        aim_point: Position::new(distance * b.sin(), y, distance * b.cos()),
        velocity: Velocity::default(),
        player_choice: false,
        protected: false,
        priority: 1,
        score: 0.0,
        valid: true,
    }
}

fn target_strategy() -> impl Strategy<Value = TargetRecord> {
    (
        -180.0f64..180.0,
        -100.0f64..300.0,
        50.0f64..4000.0,
        any::<bool>(),
        any::<bool>(),
        0i32..4,
        0u8..4,
    )
        .prop_map(|(bearing, y, distance, player_choice, protected, priority, score)| {
            let mut t = placed(0, bearing, y, distance);
            t.player_choice = player_choice;
            t.protected = protected;
            t.priority = priority;
            t.score = f64::from(score);
            t
        })
}

fn target_lists() -> impl Strategy<Value = (Vec<TargetRecord>, Vec<TargetRecord>)> {
    prop::collection::vec(target_strategy(), 1..12)
        .prop_map(|mut targets| {
            for (i, t) in targets.iter_mut().enumerate() {
                t.id = i as u64 + 100;
            }
            targets
        })
        .prop_flat_map(|targets| (Just(targets.clone()), Just(targets).prop_shuffle()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The winner depends only on target attributes, never on list order.
    #[test]
    fn prop_best_target_is_permutation_invariant(
        (original, shuffled) in target_lists(),
        chase_unicorns in any::<bool>(),
    ) {
        let config = GuidanceConfig { chase_unicorns, ..Default::default() };
        let decision = air_missile(&config);
        let p = projectile();
        let mut cache = GeometryCache::new();
        let a = best_target_for_missile(&p, &decision, &original, &mut cache, &config)
            .map(|t| t.id);
        cache.clear();
        let b = best_target_for_missile(&p, &decision, &shuffled, &mut cache, &config)
            .map(|t| t.id);
        prop_assert_eq!(a, b);
    }

    /// Two targets beyond the clamp tie on the angle tier, so lower tiers decide.
    #[test]
    fn prop_off_course_angles_tie_beyond_clamp(
        clamp_deg in 1.0f64..80.0,
        extra_a in 1.0f64..99.0,
        extra_b in 1.0f64..99.0,
        distance_a in 100.0f64..2000.0,
        distance_b in 100.0f64..2000.0,
    ) {
        let config = GuidanceConfig { off_course_angle_deg: clamp_deg, ..Default::default() };
        let a = placed(1, clamp_deg + extra_a, 100.0, distance_a);
        let b = placed(2, clamp_deg + extra_b, 100.0, distance_b);
        let ord = compare_targets(&projectile(), &a, &b, &mut GeometryCache::new(), &config);
        let expected = distance_a.total_cmp(&distance_b).then(Ordering::Less);
        prop_assert_eq!(ord, expected);
    }

    /// Fuel never rises and never drops below zero, whatever the thrust sequence.
    #[test]
    fn prop_fuel_is_monotone_and_floored(
        steps in prop::collection::vec((0.0f64..=1.0, 0.0f64..0.5), 1..200),
        burn_rate in 0.0f64..5000.0,
    ) {
        let config = GuidanceConfig::default();
        let mut decision = air_missile(&config);
        let mut last = decision.fuel_remaining;
        for (thrust, dt) in steps {
            decision.burn(thrust, burn_rate, dt);
            prop_assert!(decision.fuel_remaining <= last);
            prop_assert!(decision.fuel_remaining >= 0.0);
            last = decision.fuel_remaining;
        }
    }
}
