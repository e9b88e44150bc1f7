//! Geometry functions and their per-tick memoization.
//!
//! Angle-to-target and time-to-target are the two quantities the ranker,
//! the feasibility check and the steering controller all ask for. They are
//! cached per (projectile id, target id) and the cache is cleared at the top
//! of every tick because both ends have moved.

use std::collections::HashMap;

use salvo_core::components::{ProjectileRecord, TargetRecord};
use salvo_core::config::TurnModel;
use salvo_core::constants::GEOMETRY_EPSILON;
use salvo_core::types::Position;

type PairKey = (u64, u64);

/// Memoized geometry for the current tick.
#[derive(Debug, Default)]
pub struct GeometryCache {
    angles: HashMap<PairKey, f64>,
    times: HashMap<PairKey, f64>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry. Called unconditionally at the start of a tick.
    pub fn clear(&mut self) {
        self.angles.clear();
        self.times.clear();
    }

    /// Number of cached values (angles plus times).
    pub fn len(&self) -> usize {
        self.angles.len() + self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Angle between the projectile's heading and its line of sight to the target (radians).
    pub fn angle_to_target(&mut self, projectile: &ProjectileRecord, target: &TargetRecord) -> f64 {
        *self
            .angles
            .entry((projectile.id, target.id))
            .or_insert_with(|| angle_to_point(projectile, &target.aim_point))
    }

    /// Estimated seconds until the projectile reaches the target, including turn time.
    pub fn time_to_target(
        &mut self,
        projectile: &ProjectileRecord,
        target: &TargetRecord,
        model: &TurnModel,
    ) -> f64 {
        let key = (projectile.id, target.id);
        if let Some(t) = self.times.get(&key) {
            return *t;
        }
        let angle = self.angle_to_target(projectile, target);
        let t = estimate_time_to_target(projectile, &target.aim_point, angle, model);
        self.times.insert(key, t);
        t
    }
}

/// Angle between the projectile's velocity and the direction to `point`.
///
/// A projectile with no measurable speed has no heading and is treated as
/// on-course; so is a point at the projectile's own position.
pub fn angle_to_point(projectile: &ProjectileRecord, point: &Position) -> f64 {
    let heading = projectile.velocity.as_dvec3();
    let los = point.as_dvec3() - projectile.position.as_dvec3();
    if heading.length() < GEOMETRY_EPSILON || los.length() < GEOMETRY_EPSILON {
        return 0.0;
    }
    let dot = heading.normalize().dot(los.normalize());
    dot.clamp(-1.0, 1.0).acos()
}

/// Share of the turn spent not closing distance: 0 on-course, 0.5 perpendicular,
/// 1 directly retreating.
pub fn turn_fraction(angle: f64) -> f64 {
    (1.0 - angle.cos()) / 2.0
}

/// Distance over effective speed plus the time lost turning onto the target.
///
/// Effective speed is the larger of current speed and the cruise estimate, so
/// reach is not underestimated while the projectile is still accelerating.
pub fn estimate_time_to_target(
    projectile: &ProjectileRecord,
    point: &Position,
    angle: f64,
    model: &TurnModel,
) -> f64 {
    let distance = projectile.position.range_to(point);
    let speed = projectile.velocity.speed().max(model.cruise_speed);
    let travel = if speed > GEOMETRY_EPSILON {
        distance / speed
    } else {
        f64::INFINITY
    };
    let turn_rate = model.turn_rate();
    let turn = if turn_rate > GEOMETRY_EPSILON {
        angle / turn_rate * turn_fraction(angle)
    } else {
        f64::INFINITY
    };
    travel + turn
}
