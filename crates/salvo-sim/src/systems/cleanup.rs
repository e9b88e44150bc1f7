//! Cleanup system: removes detonated, destroyed and out-of-bounds entities.

use hecs::{Entity, World};

use salvo_core::types::Position;

use crate::components::{Destroyed, Detonated};

/// Despawn spent entities. Uses a caller-owned buffer to avoid per-tick
/// allocation.
pub fn run(world: &mut World, world_radius: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let origin = Position::default();
    for (entity, pos) in world.query_mut::<&Position>() {
        if pos.range_to(&origin) > world_radius {
            despawn_buffer.push(entity);
        }
    }
    for (entity, _) in world.query_mut::<&Detonated>() {
        despawn_buffer.push(entity);
    }
    for (entity, _) in world.query_mut::<&Destroyed>() {
        despawn_buffer.push(entity);
    }

    despawn_buffer.sort();
    despawn_buffer.dedup();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
