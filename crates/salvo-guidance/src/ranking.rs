//! Target ranker, a total order over candidate targets.
//!
//! Ranking is an ordered chain of comparison rules, each consulted only when
//! every earlier rule ties. The whole list is sorted on every reassessment;
//! callers then scan for the first feasible entry.

use std::cmp::Ordering;

use salvo_core::components::{ProjectileRecord, TargetRecord};
use salvo_core::config::GuidanceConfig;

use crate::decision::TargetingDecision;
use crate::feasibility::can_hit;
use crate::geometry::GeometryCache;

/// Per-target values the rules compare, computed once per sort.
#[derive(Debug, Clone, Copy)]
pub struct RankKey<'a> {
    pub target: &'a TargetRecord,
    /// Angle to target, clamped at the off-course angle (radians).
    pub clamped_angle: f64,
    pub distance: f64,
}

impl<'a> RankKey<'a> {
    pub fn new(
        projectile: &ProjectileRecord,
        target: &'a TargetRecord,
        cache: &mut GeometryCache,
        off_course_angle: f64,
    ) -> Self {
        Self {
            target,
            clamped_angle: cache.angle_to_target(projectile, target).min(off_course_angle),
            distance: projectile.position.range_to(&target.aim_point),
        }
    }
}

/// One tier of the ranking chain. `Less` means `a` ranks ahead of `b`.
pub type RankRule = fn(&RankKey, &RankKey) -> Ordering;

/// The tie-break chain, most significant first.
pub const RANK_RULES: [RankRule; 6] = [
    player_choice_first,
    protected_last,
    smaller_clamped_angle,
    lower_priority,
    higher_score,
    shorter_distance,
];

fn player_choice_first(a: &RankKey, b: &RankKey) -> Ordering {
    b.target.player_choice.cmp(&a.target.player_choice)
}

fn protected_last(a: &RankKey, b: &RankKey) -> Ordering {
    a.target.protected.cmp(&b.target.protected)
}

fn smaller_clamped_angle(a: &RankKey, b: &RankKey) -> Ordering {
    a.clamped_angle.total_cmp(&b.clamped_angle)
}

fn lower_priority(a: &RankKey, b: &RankKey) -> Ordering {
    a.target.priority.cmp(&b.target.priority)
}

fn higher_score(a: &RankKey, b: &RankKey) -> Ordering {
    b.target.score.total_cmp(&a.target.score)
}

fn shorter_distance(a: &RankKey, b: &RankKey) -> Ordering {
    a.distance.total_cmp(&b.distance)
}

/// Apply the rule chain; fully tied keys fall back to target id so the
/// order never depends on input order.
pub fn compare_keys(a: &RankKey, b: &RankKey) -> Ordering {
    RANK_RULES
        .iter()
        .map(|rule| rule(a, b))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| a.target.id.cmp(&b.target.id))
}

/// Compare two targets from one projectile's point of view.
pub fn compare_targets(
    projectile: &ProjectileRecord,
    a: &TargetRecord,
    b: &TargetRecord,
    cache: &mut GeometryCache,
    config: &GuidanceConfig,
) -> Ordering {
    let clamp = config.off_course_angle();
    let ka = RankKey::new(projectile, a, cache, clamp);
    let kb = RankKey::new(projectile, b, cache, clamp);
    compare_keys(&ka, &kb)
}

/// Every target, best first.
pub fn rank_targets<'a>(
    projectile: &ProjectileRecord,
    targets: &'a [TargetRecord],
    cache: &mut GeometryCache,
    config: &GuidanceConfig,
) -> Vec<&'a TargetRecord> {
    let clamp = config.off_course_angle();
    let mut keys: Vec<RankKey<'a>> = targets
        .iter()
        .map(|t| RankKey::new(projectile, t, cache, clamp))
        .collect();
    keys.sort_by(compare_keys);
    keys.into_iter().map(|k| k.target).collect()
}

/// Highest-ranked feasible target. With `chase_unicorns`, falls back to the
/// highest-ranked target outright when nothing is feasible.
pub fn best_target_for_missile<'a>(
    projectile: &ProjectileRecord,
    decision: &TargetingDecision,
    targets: &'a [TargetRecord],
    cache: &mut GeometryCache,
    config: &GuidanceConfig,
) -> Option<&'a TargetRecord> {
    let ranked = rank_targets(projectile, targets, cache, config);
    let feasible = ranked
        .iter()
        .copied()
        .find(|t| can_hit(projectile, decision, t, cache, config));
    match feasible {
        Some(t) => Some(t),
        None if config.chase_unicorns => ranked.first().copied(),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use salvo_core::types::{Position, Velocity};

    use super::*;
    use crate::decision::Propulsion;

    fn projectile() -> ProjectileRecord {
        ProjectileRecord {
            id: 1,
            position: Position::new(0.0, 100.0, 0.0),
            velocity: Velocity::new(0.0, 0.0, 100.0),
            time_since_launch: 4.0,
        }
    }

    fn air_decision() -> TargetingDecision {
        let mut d = TargetingDecision::from_parts(0, &[], &GuidanceConfig::default());
        d.propulsion = Propulsion {
            air: true,
            water: false,
        };
        d
    }

    /// Target at `deg` off the projectile's heading, `distance` meters away, same altitude.
    fn target(id: u64, deg: f64, distance: f64) -> TargetRecord {
        let a = deg.to_radians();
        TargetRecord {
            id,
            aim_point: Position::new(distance * a.sin(), 100.0, distance * a.cos()),
            velocity: Velocity::default(),
            player_choice: false,
            protected: false,
            priority: 1,
            score: 0.0,
            valid: true,
        }
    }

    fn ranked_ids(targets: &[TargetRecord], config: &GuidanceConfig) -> Vec<u64> {
        rank_targets(&projectile(), targets, &mut GeometryCache::new(), config)
            .iter()
            .map(|t| t.id)
            .collect()
    }

    #[test]
    fn test_player_choice_beats_everything() {
        let mut chosen = target(1, 40.0, 2000.0);
        chosen.player_choice = true;
        chosen.protected = true;
        chosen.priority = 9;
        let other = target(2, 0.0, 100.0);
        assert_eq!(ranked_ids(&[other, chosen], &GuidanceConfig::default()), vec![1, 2]);
    }

    #[test]
    fn test_protected_sorts_last() {
        let mut salvage = target(1, 0.0, 100.0);
        salvage.protected = true;
        let hostile = target(2, 30.0, 900.0);
        assert_eq!(ranked_ids(&[salvage, hostile], &GuidanceConfig::default()), vec![2, 1]);
    }

    #[test]
    fn test_angle_tier_decides_inside_clamp() {
        // Both well inside a 45 degree clamp: the smaller angle wins despite distance.
        let a = target(1, 10.0, 100.0);
        let b = target(2, 5.0, 500.0);
        let config = GuidanceConfig {
            off_course_angle_deg: 45.0,
            ..Default::default()
        };
        assert_eq!(ranked_ids(&[a, b], &config), vec![2, 1]);
    }

    #[test]
    fn test_clamp_makes_angle_tier_tie_and_falls_to_distance() {
        // Both beyond a 2 degree clamp: angle ties, priority ties, score ties,
        // so the nearer target wins.
        let a = target(1, 10.0, 100.0);
        let b = target(2, 5.0, 500.0);
        let config = GuidanceConfig {
            off_course_angle_deg: 2.0,
            ..Default::default()
        };
        assert_eq!(ranked_ids(&[b, a], &config), vec![1, 2]);
    }

    #[test]
    fn test_off_course_targets_fall_through_to_priority() {
        let config = GuidanceConfig {
            off_course_angle_deg: 45.0,
            ..Default::default()
        };
        let mut behind = target(1, 180.0, 300.0);
        behind.priority = 0;
        let beam = target(2, 90.0, 300.0);
        assert_eq!(ranked_ids(&[beam, behind], &config), vec![1, 2]);
    }

    #[test]
    fn test_score_then_distance() {
        let mut high = target(1, 0.0, 900.0);
        high.score = 10.0;
        let low = target(2, 0.0, 100.0);
        let config = GuidanceConfig::default();
        assert_eq!(ranked_ids(&[low.clone(), high], &config), vec![1, 2]);

        let far = target(3, 0.0, 900.0);
        assert_eq!(ranked_ids(&[far, low], &config), vec![2, 3]);
    }

    #[test]
    fn test_full_tie_breaks_on_id() {
        let config = GuidanceConfig::default();
        assert_eq!(
            ranked_ids(&[target(7, 0.0, 100.0), target(3, 0.0, 100.0)], &config),
            vec![3, 7]
        );
    }

    #[test]
    fn test_compare_targets_agrees_with_rank() {
        let config = GuidanceConfig::default();
        let mut cache = GeometryCache::new();
        let a = target(1, 0.0, 100.0);
        let b = target(2, 30.0, 100.0);
        assert_eq!(compare_targets(&projectile(), &a, &b, &mut cache, &config), Ordering::Less);
        assert_eq!(compare_targets(&projectile(), &b, &a, &mut cache, &config), Ordering::Greater);
    }

    #[test]
    fn test_best_skips_infeasible() {
        let config = GuidanceConfig::default();
        // Best ranked, but underwater for an air-only projectile.
        let mut sub = target(1, 0.0, 100.0);
        sub.aim_point.y = -50.0;
        let boat = target(2, 20.0, 400.0);
        let targets = vec![sub, boat];
        let best = best_target_for_missile(
            &projectile(),
            &air_decision(),
            &targets,
            &mut GeometryCache::new(),
            &config,
        );
        assert_eq!(best.map(|t| t.id), Some(2));
    }

    #[test]
    fn test_best_none_or_unicorn_when_nothing_feasible() {
        let mut sub = target(1, 0.0, 100.0);
        sub.aim_point.y = -50.0;
        let far = target(2, 0.0, 10_000.0);
        let targets = vec![far, sub];

        let config = GuidanceConfig::default();
        let best = best_target_for_missile(
            &projectile(),
            &air_decision(),
            &targets,
            &mut GeometryCache::new(),
            &config,
        );
        assert!(best.is_none());

        let unicorns = GuidanceConfig {
            chase_unicorns: true,
            ..Default::default()
        };
        let best = best_target_for_missile(
            &projectile(),
            &air_decision(),
            &targets,
            &mut GeometryCache::new(),
            &unicorns,
        );
        // The distant target is dead ahead, so it outranks the off-axis submarine.
        assert_eq!(best.map(|t| t.id), Some(2), "highest ranked, feasible or not");
    }

    #[test]
    fn test_best_on_empty_list() {
        let unicorns = GuidanceConfig {
            chase_unicorns: true,
            ..Default::default()
        };
        assert!(best_target_for_missile(
            &projectile(),
            &air_decision(),
            &[],
            &mut GeometryCache::new(),
            &unicorns,
        )
        .is_none());
    }
}
