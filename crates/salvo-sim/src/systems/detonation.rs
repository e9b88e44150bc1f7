//! Detonation effects: targets near a detonated projectile are destroyed.

use hecs::World;

use salvo_core::types::Position;

use crate::components::{Destroyed, Detonated, ProjectileBody, TargetBody};

/// Mark every target within `lethal_radius` of a detonation. Returns the
/// ids of newly destroyed targets.
pub fn run(world: &mut World, lethal_radius: f64) -> Vec<u64> {
    let blasts: Vec<Position> = world
        .query::<(&ProjectileBody, &Position, &Detonated)>()
        .iter()
        .map(|(_entity, (_body, pos, _))| *pos)
        .collect();
    if blasts.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for (entity, (body, pos)) in world
        .query::<(&TargetBody, &Position)>()
        .without::<&Destroyed>()
        .iter()
    {
        if blasts.iter().any(|b| b.range_to(pos) <= lethal_radius) {
            hits.push((entity, body.id));
        }
    }

    let mut destroyed = Vec::with_capacity(hits.len());
    for (entity, id) in hits {
        if world.insert_one(entity, Destroyed).is_ok() {
            log::info!("target {id} destroyed");
            destroyed.push(id);
        }
    }
    destroyed
}
