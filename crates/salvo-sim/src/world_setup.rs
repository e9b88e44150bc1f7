//! Entity spawn factories.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use salvo_core::components::PartRecord;
use salvo_core::constants::*;
use salvo_core::types::{Position, Velocity};

use crate::components::{ProjectileBody, TargetBody};

/// Standard missile layout: two throttleable thrusters, a tank and a warhead.
/// Thrusters start at full burn.
pub fn default_parts() -> Vec<PartRecord> {
    ["Variable Thruster", "Fuel Tank", "Warhead", "Variable Thruster"]
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let mut registers = vec![0.0; SIM_PART_REGISTERS];
            if name.contains("Thruster") {
                registers[THRUST_REGISTER] = 1.0;
            }
            PartRecord {
                index,
                name: name.to_string(),
                registers,
            }
        })
        .collect()
}

pub fn spawn_projectile(
    world: &mut World,
    body: ProjectileBody,
    position: Position,
    velocity: Velocity,
) -> hecs::Entity {
    world.spawn((body, position, velocity))
}

pub fn spawn_target(
    world: &mut World,
    body: TargetBody,
    position: Position,
    velocity: Velocity,
) -> hecs::Entity {
    world.spawn((body, position, velocity))
}

/// Launch position and velocity for one salvo round: a small random offset
/// around the launcher, heading north with a little spread.
pub fn launch_state(rng: &mut ChaCha8Rng) -> (Position, Velocity) {
    let position = Position::new(
        rng.gen_range(-20.0..20.0),
        SIM_LAUNCH_HEIGHT,
        rng.gen_range(-20.0..20.0),
    );
    let spread: f64 = rng.gen_range(-0.2..0.2);
    let velocity = Velocity::new(
        SIM_LAUNCH_SPEED * spread.sin(),
        0.0,
        SIM_LAUNCH_SPEED * spread.cos(),
    );
    (position, velocity)
}

/// A surface target north of the launcher, drifting on a random heading.
pub fn random_target(rng: &mut ChaCha8Rng, id: u64) -> (TargetBody, Position, Velocity) {
    let bearing: f64 = rng.gen_range(-1.0..1.0);
    let range: f64 = rng.gen_range(800.0..2500.0);
    let position = Position::new(range * bearing.sin(), 0.0, range * bearing.cos());

    let heading: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let speed: f64 = rng.gen_range(0.0..15.0);
    let velocity = Velocity::new(speed * heading.sin(), 0.0, speed * heading.cos());

    let body = TargetBody {
        id,
        player_choice: false,
        protected: rng.gen_bool(0.1),
        priority: rng.gen_range(0..3),
        score: rng.gen_range(0.0..100.0),
    };
    (body, position, velocity)
}
