//! Guidance engine: the tick scheduler that drives every other component.
//!
//! `GuidanceEngine` owns all state that persists between ticks (targeting
//! decisions) and all state that must not (geometry cache, target list).
//! The host calls `tick` once per simulation step with a fresh snapshot and
//! applies the returned commands; nothing runs between calls.

use salvo_core::commands::HostCommand;
use salvo_core::components::{ProjectileRecord, TargetRecord};
use salvo_core::config::{ConfigError, GuidanceConfig};
use salvo_core::constants::{DT, THRUST_REGISTER};
use salvo_core::state::TickInput;

use crate::decision::{DecisionTable, Reassessment, TargetingDecision};
use crate::geometry::GeometryCache;
use crate::scanner::scan_targets;
use crate::steering::steer;

/// The guidance engine. Owns all cross-tick targeting state.
#[derive(Debug)]
pub struct GuidanceEngine {
    config: GuidanceConfig,
    cache: GeometryCache,
    decisions: DecisionTable,
    targets: Vec<TargetRecord>,
    ticks_run: u64,
    last_steer_secs: Option<f64>,
}

impl GuidanceEngine {
    /// Create an engine with an already validated config.
    pub fn new(config: GuidanceConfig) -> Self {
        Self {
            config,
            cache: GeometryCache::new(),
            decisions: DecisionTable::new(),
            targets: Vec::new(),
            ticks_run: 0,
            last_steer_secs: None,
        }
    }

    /// Validate `config` and create an engine with it.
    pub fn with_config(config: GuidanceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &GuidanceConfig {
        &self.config
    }

    /// Targets scanned on the most recent tick.
    pub fn targets(&self) -> &[TargetRecord] {
        &self.targets
    }

    /// Targeting state for a projectile reported on the most recent tick.
    pub fn decision(&self, projectile: u64) -> Option<&TargetingDecision> {
        self.decisions.get(projectile)
    }

    /// Number of projectiles currently tracked.
    pub fn tracked(&self) -> usize {
        self.decisions.len()
    }

    /// Run one tick and return the commands for the host, in issue order.
    pub fn tick(&mut self, input: &TickInput) -> Vec<HostCommand> {
        let mut commands = Vec::new();
        let now = input.time.elapsed_secs;

        self.cache.clear();
        scan_targets(&input.sensor_groups, &mut self.targets);

        let interval = u64::from(self.config.steer_interval_ticks.max(1));
        let steer_now = self.ticks_run % interval == 0;
        self.ticks_run += 1;
        let dt = match self.last_steer_secs {
            Some(last) => (now - last).max(0.0),
            None => interval as f64 * DT,
        };

        let Self {
            config,
            cache,
            decisions,
            targets,
            ..
        } = self;

        for channel in &input.channels {
            for report in &channel.projectiles {
                let projectile = &report.projectile;
                let decision = decisions.observe(channel.id, report, config);
                if !projectile.is_usable() {
                    log::warn!("projectile {} reported non-finite state; skipped", projectile.id);
                    continue;
                }
                if !steer_now || decision.detonated {
                    continue;
                }
                guide_projectile(
                    channel.id,
                    projectile,
                    decision,
                    targets,
                    cache,
                    config,
                    dt,
                    &mut commands,
                );
            }
        }

        for id in decisions.reconcile() {
            log::debug!("projectile {id} no longer reported; state dropped");
            if config.debug_log {
                commands.push(HostCommand::Log {
                    message: format!("lost projectile {id}"),
                });
            }
        }

        if steer_now {
            self.last_steer_secs = Some(now);
        }
        commands
    }
}

/// Reassess (when due), steer, and translate the result into host commands.
#[allow(clippy::too_many_arguments)]
fn guide_projectile(
    channel: u32,
    projectile: &ProjectileRecord,
    decision: &mut TargetingDecision,
    targets: &[TargetRecord],
    cache: &mut GeometryCache,
    config: &GuidanceConfig,
    dt: f64,
    commands: &mut Vec<HostCommand>,
) {
    let target_vanished = decision
        .current_target
        .is_some_and(|id| !targets.iter().any(|t| t.id == id));
    if target_vanished
        || decision.due_for_reassessment(projectile.time_since_launch, config.reassign_interval)
    {
        let previous = decision.current_target;
        let outcome = decision.reassess(projectile, targets, cache, config);
        if config.debug_log {
            let changed = match outcome {
                Reassessment::Kept(_) => false,
                Reassessment::Chosen(id) => previous != Some(id),
                Reassessment::Cleared => previous.is_some(),
            };
            if changed {
                commands.push(HostCommand::Log {
                    message: format!(
                        "projectile {} target {:?} -> {:?}",
                        projectile.id, previous, decision.current_target
                    ),
                });
            }
        }
    }

    let target = decision
        .current_target
        .and_then(|id| targets.iter().find(|t| t.id == id));
    let output = steer(projectile, decision, target, cache, config, dt);

    if let Some(position) = output.aim_point {
        commands.push(HostCommand::SetAimPoint {
            channel,
            projectile: projectile.id,
            position,
        });
    }
    for &part in &decision.thrusters {
        commands.push(HostCommand::SetActuatorRegister {
            channel,
            projectile: projectile.id,
            part,
            register: THRUST_REGISTER,
            value: output.thrust,
        });
    }
    if output.detonate {
        let target_id = target.map(|t| t.id).unwrap_or_default();
        log::info!("projectile {} detonating on overshoot of target {target_id}", projectile.id);
        commands.push(HostCommand::Detonate {
            channel,
            projectile: projectile.id,
        });
        if config.hud_log {
            commands.push(HostCommand::LogHud {
                message: format!("Projectile {} detonated near target {target_id}", projectile.id),
            });
        }
    }
}
