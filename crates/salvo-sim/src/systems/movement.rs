//! Flight model and kinematic integration.
//!
//! Projectiles swing their velocity toward the commanded aim point at a
//! limited turn rate, and their speed relaxes toward `thrust * top_speed`.
//! Everything with a velocity then integrates `position += velocity * dt`.

use glam::{DQuat, DVec3};
use hecs::World;

use salvo_core::constants::{DT, GEOMETRY_EPSILON};
use salvo_core::types::{Position, Velocity};

use crate::components::{Detonated, ProjectileBody};

/// Physical limits of the simulated airframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightModel {
    pub top_speed: f64,
    pub acceleration: f64,
    /// Radians per second.
    pub turn_rate: f64,
}

/// Steer and throttle every live projectile.
pub fn fly(world: &mut World, model: &FlightModel) {
    for (_entity, (body, pos, vel)) in world
        .query_mut::<(&ProjectileBody, &Position, &mut Velocity)>()
        .without::<&Detonated>()
    {
        let current = vel.as_dvec3();
        let mut direction = current.try_normalize().unwrap_or(DVec3::Z);
        if let Some(aim) = body.aim {
            if let Some(desired) = (aim.as_dvec3() - pos.as_dvec3()).try_normalize() {
                direction = rotate_toward(direction, desired, model.turn_rate * DT);
            }
        }

        let target_speed = body.thrust() * model.top_speed;
        let speed = current.length();
        let step = model.acceleration * DT;
        let speed = if speed < target_speed {
            (speed + step).min(target_speed)
        } else {
            (speed - step).max(target_speed)
        };
        *vel = Velocity::from_dvec3(direction * speed);
    }
}

/// Integrate positions for all entities with a velocity.
pub fn run(world: &mut World) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        *pos = pos.projected(vel, DT);
    }
}

/// Rotate unit vector `from` toward unit vector `to` by at most `max_angle`.
pub fn rotate_toward(from: DVec3, to: DVec3, max_angle: f64) -> DVec3 {
    let angle = from.angle_between(to);
    if angle <= max_angle {
        return to;
    }
    let cross = from.cross(to);
    // Near-reversal: any axis perpendicular to the heading turns at full rate.
    let axis = if cross.length() > GEOMETRY_EPSILON {
        cross.normalize()
    } else {
        from.any_orthonormal_vector()
    };
    (DQuat::from_axis_angle(axis, max_angle) * from)
        .try_normalize()
        .unwrap_or(from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_toward_is_rate_limited() {
        let max = 10f64.to_radians();
        let turned = rotate_toward(DVec3::Z, DVec3::X, max);
        assert!((turned.angle_between(DVec3::Z) - max).abs() < 1e-9);
        assert!(turned.x > 0.0);
    }

    #[test]
    fn test_rotate_toward_snaps_when_close() {
        let to = DVec3::new(0.01, 0.0, 1.0).normalize();
        assert_eq!(rotate_toward(DVec3::Z, to, 0.5), to);
    }

    #[test]
    fn test_rotate_toward_reverses_without_nan() {
        let turned = rotate_toward(DVec3::Z, -DVec3::Z, 0.1);
        assert!(turned.is_finite());
        assert!((turned.length() - 1.0).abs() < GEOMETRY_EPSILON);
    }
}
