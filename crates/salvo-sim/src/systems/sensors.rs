//! Sensor system: reports the world to guidance as a [`TickInput`].

use std::collections::BTreeMap;

use hecs::World;

use salvo_core::components::{
    ControlChannel, ProjectileRecord, ProjectileReport, SensorGroup, TargetRecord,
};
use salvo_core::state::TickInput;
use salvo_core::types::{Position, SimTime, Velocity};

use crate::components::{Detonated, ProjectileBody, TargetBody};

/// One sensor group sees every live target; projectiles are grouped by
/// channel. Both are ordered by id so the report does not depend on
/// archetype iteration order.
pub fn build_tick_input(world: &World, time: SimTime) -> TickInput {
    let mut targets: Vec<TargetRecord> = world
        .query::<(&TargetBody, &Position, &Velocity)>()
        .iter()
        .map(|(_entity, (body, pos, vel))| TargetRecord {
            id: body.id,
            aim_point: *pos,
            velocity: *vel,
            player_choice: body.player_choice,
            protected: body.protected,
            priority: body.priority,
            score: body.score,
            valid: true,
        })
        .collect();
    targets.sort_by_key(|t| t.id);

    let mut channels: BTreeMap<u32, Vec<ProjectileReport>> = BTreeMap::new();
    for (_entity, (body, pos, vel)) in world
        .query::<(&ProjectileBody, &Position, &Velocity)>()
        .without::<&Detonated>()
        .iter()
    {
        channels.entry(body.channel).or_default().push(ProjectileReport {
            projectile: ProjectileRecord {
                id: body.id,
                position: *pos,
                velocity: *vel,
                time_since_launch: time.elapsed_secs - body.launched_at,
            },
            parts: body.parts.clone(),
        });
    }

    TickInput {
        time,
        sensor_groups: vec![SensorGroup { targets }],
        channels: channels
            .into_iter()
            .map(|(id, mut projectiles)| {
                projectiles.sort_by_key(|r| r.projectile.id);
                ControlChannel { id, projectiles }
            })
            .collect(),
    }
}
