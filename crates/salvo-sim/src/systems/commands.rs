//! Applies guidance commands to the world.

use std::collections::HashMap;

use hecs::{Entity, World};

use salvo_core::commands::HostCommand;

use crate::components::{Detonated, ProjectileBody};
use crate::engine::SimStats;

/// Apply commands in issue order. Commands for projectiles that no longer
/// exist are dropped with a warning.
pub fn apply(world: &mut World, commands: &[HostCommand], stats: &mut SimStats) {
    let index: HashMap<u64, Entity> = world
        .query::<&ProjectileBody>()
        .iter()
        .map(|(entity, body)| (body.id, entity))
        .collect();

    let mut detonate = Vec::new();
    for command in commands {
        let entity = match command.projectile() {
            Some(id) => match index.get(&id) {
                Some(&entity) => Some(entity),
                None => {
                    log::warn!("command for unknown projectile {id} dropped");
                    continue;
                }
            },
            None => None,
        };

        match (command, entity) {
            (HostCommand::SetAimPoint { position, .. }, Some(entity)) => {
                if let Ok(mut body) = world.get::<&mut ProjectileBody>(entity) {
                    body.aim = Some(*position);
                }
            }
            (
                HostCommand::SetActuatorRegister {
                    part,
                    register,
                    value,
                    projectile,
                    ..
                },
                Some(entity),
            ) => {
                if let Ok(mut body) = world.get::<&mut ProjectileBody>(entity) {
                    if !body.set_register(*part, *register, *value) {
                        log::warn!(
                            "projectile {projectile} has no register {register} on part {part}"
                        );
                    }
                }
            }
            (HostCommand::Detonate { .. }, Some(entity)) => detonate.push(entity),
            (HostCommand::Log { message }, _) => {
                log::debug!("{message}");
                stats.log_lines += 1;
            }
            (HostCommand::LogHud { message }, _) => {
                log::info!("[hud] {message}");
                stats.hud.push(message.clone());
            }
            _ => {}
        }
    }

    for entity in detonate {
        if world.insert_one(entity, Detonated).is_ok() {
            stats.detonations += 1;
        }
    }
}
