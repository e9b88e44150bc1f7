//! Feasibility estimator: can this projectile plausibly reach this target?

use salvo_core::components::{ProjectileRecord, TargetRecord};
use salvo_core::config::GuidanceConfig;

use crate::decision::TargetingDecision;
use crate::geometry::GeometryCache;

/// Why a target was ruled out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// Aim point lies in a medium the projectile cannot propel itself through.
    WrongDomain { altitude: f64 },
    /// Straight-line distance exceeds the engagement range.
    OutOfRange { distance: f64 },
    /// The projectile cannot rotate onto the target before closing.
    CannotTurn { angle: f64, reachable: f64 },
}

/// Run the domain, range and (when a turn model is configured) turning checks in order.
pub fn check_feasibility(
    projectile: &ProjectileRecord,
    decision: &TargetingDecision,
    target: &TargetRecord,
    cache: &mut GeometryCache,
    config: &GuidanceConfig,
) -> Result<(), Rejection> {
    let altitude = target.aim_point.y;
    let propulsion = decision.propulsion;
    if !propulsion.cross_domain() {
        let too_deep = !propulsion.water && altitude < -config.crossover_tolerance;
        let too_high = !propulsion.air && altitude > config.crossover_tolerance;
        if too_deep || too_high {
            return Err(Rejection::WrongDomain { altitude });
        }
    }

    let distance = projectile.position.range_to(&target.aim_point);
    if distance > config.max_range {
        return Err(Rejection::OutOfRange { distance });
    }

    if let Some(model) = &config.turn_model {
        let time = cache.time_to_target(projectile, target, model);
        let angle = cache.angle_to_target(projectile, target);
        let reachable = model.turn_rate() * time;
        if angle > reachable {
            return Err(Rejection::CannotTurn { angle, reachable });
        }
    }

    Ok(())
}

/// `true` when every feasibility rule passes. Never mutates targeting state.
pub fn can_hit(
    projectile: &ProjectileRecord,
    decision: &TargetingDecision,
    target: &TargetRecord,
    cache: &mut GeometryCache,
    config: &GuidanceConfig,
) -> bool {
    match check_feasibility(projectile, decision, target, cache, config) {
        Ok(()) => true,
        Err(rejection) => {
            if config.debug_log {
                log::debug!(
                    "projectile {} cannot hit target {}: {:?}",
                    projectile.id,
                    target.id,
                    rejection
                );
            }
            false
        }
    }
}
