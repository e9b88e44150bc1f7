//! Steering and thrust controller.
//!
//! Turns a projectile's targeting decision into an aim point, a thrust
//! fraction and, when a close pass starts opening up, a detonate order.

use salvo_core::components::{ProjectileRecord, TargetRecord};
use salvo_core::config::GuidanceConfig;
use salvo_core::constants::OVERSHOOT_LOOKAHEAD_SECS;
use salvo_core::enums::{ProximityArming, TargetingPhase};
use salvo_core::types::Position;

use crate::decision::TargetingDecision;
use crate::geometry::{angle_to_point, GeometryCache};

/// What the controller wants the host to do with one projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteerOutput {
    /// `None` means keep the last commanded heading.
    pub aim_point: Option<Position>,
    pub thrust: f64,
    pub detonate: bool,
    pub phase: TargetingPhase,
}

/// Minimum thrust plus a bonus proportional to the cosine of the angle off
/// target: full power on-course, the floor at 90 degrees or worse.
pub fn thrust_fraction(angle: f64, config: &GuidanceConfig) -> f64 {
    let bonus = (config.max_thrust - config.min_thrust) * angle.cos().max(0.0);
    (config.min_thrust + bonus).clamp(config.min_thrust, config.max_thrust)
}

/// Whether the gap to the target will be wider after the lookahead than it is now.
pub fn overshoot_detected(projectile: &ProjectileRecord, target: &TargetRecord) -> bool {
    let now = projectile.position.range_to(&target.aim_point);
    let projectile_later = projectile
        .position
        .projected(&projectile.velocity, OVERSHOOT_LOOKAHEAD_SECS);
    let target_later = target
        .aim_point
        .projected(&target.velocity, OVERSHOOT_LOOKAHEAD_SECS);
    projectile_later.range_to(&target_later) > now
}

/// Whether the overshoot check should run this tick. Fuel arming never
/// triggers for a projectile without fuel tanks.
pub fn proximity_armed(
    projectile: &ProjectileRecord,
    decision: &TargetingDecision,
    target: &TargetRecord,
    config: &GuidanceConfig,
) -> bool {
    match config.proximity_arming {
        ProximityArming::Distance { radius } => {
            projectile.position.range_to(&target.aim_point) <= radius
        }
        ProximityArming::FuelFraction { fraction } => {
            decision.fuel_fraction().is_some_and(|f| f < fraction)
        }
    }
}

/// Hold a non-water projectile at skim height until the target is steep
/// enough below it that the dive must begin.
pub fn apply_sea_skim(
    projectile: &ProjectileRecord,
    decision: &TargetingDecision,
    aim: Position,
    config: &GuidanceConfig,
) -> Position {
    if decision.propulsion.water || aim.y >= config.sea_skim_height {
        return aim;
    }
    let drop = projectile.position.y - aim.y;
    let depression = drop.atan2(projectile.position.horizontal_range_to(&aim));
    if depression < config.skim_dive_angle() {
        Position::new(aim.x, config.sea_skim_height, aim.z)
    } else {
        aim
    }
}

/// A submerged non-water projectile that would climb toward its aim point
/// must surface first: straight up, engines off.
pub fn surface_override(
    projectile: &ProjectileRecord,
    decision: &TargetingDecision,
    aim: &Position,
    config: &GuidanceConfig,
) -> Option<Position> {
    let submerged = projectile.position.y < 0.0;
    if !decision.propulsion.water && submerged && aim.y > projectile.position.y {
        Some(projectile.position.raised(config.climb_height))
    } else {
        None
    }
}

/// Compute aim, thrust and detonation for one projectile, then debit fuel.
pub fn steer(
    projectile: &ProjectileRecord,
    decision: &mut TargetingDecision,
    target: Option<&TargetRecord>,
    cache: &mut GeometryCache,
    config: &GuidanceConfig,
    dt: f64,
) -> SteerOutput {
    let mut output = match target {
        None => steer_untargeted(projectile, decision, config),
        Some(target) => steer_targeted(projectile, decision, target, cache, config),
    };

    if !decision.thrusters.is_empty() {
        decision.burn(output.thrust, config.burn_rate_per_thruster, dt);
    }

    if let Some(target) = target {
        if !decision.detonated
            && proximity_armed(projectile, decision, target, config)
            && overshoot_detected(projectile, target)
        {
            decision.detonated = true;
            output.detonate = true;
            output.phase = TargetingPhase::Detonated;
        }
    }

    decision.phase = output.phase;
    output
}

fn steer_untargeted(
    projectile: &ProjectileRecord,
    decision: &TargetingDecision,
    config: &GuidanceConfig,
) -> SteerOutput {
    if decision.propulsion.air && projectile.time_since_launch < config.climb_age {
        let aim = projectile.position.raised(config.climb_height);
        SteerOutput {
            aim_point: Some(aim),
            thrust: thrust_fraction(angle_to_point(projectile, &aim), config),
            detonate: false,
            phase: TargetingPhase::Climbing,
        }
    } else {
        SteerOutput {
            aim_point: None,
            thrust: config.min_thrust,
            detonate: false,
            phase: TargetingPhase::Coasting,
        }
    }
}

fn steer_targeted(
    projectile: &ProjectileRecord,
    decision: &TargetingDecision,
    target: &TargetRecord,
    cache: &mut GeometryCache,
    config: &GuidanceConfig,
) -> SteerOutput {
    let angle = cache.angle_to_target(projectile, target);
    let aim = apply_sea_skim(projectile, decision, target.aim_point, config);
    let phase = match decision.phase {
        TargetingPhase::Sticky => TargetingPhase::Sticky,
        _ => TargetingPhase::Targeting,
    };

    if let Some(up) = surface_override(projectile, decision, &aim, config) {
        return SteerOutput {
            aim_point: Some(up),
            thrust: 0.0,
            detonate: false,
            phase,
        };
    }

    SteerOutput {
        aim_point: Some(aim),
        thrust: thrust_fraction(angle, config),
        detonate: false,
        phase,
    }
}
