//! Targeting state machine: the per-projectile record the engine owns.
//!
//! A `TargetingDecision` is created the first time a projectile id is seen,
//! reassessed on an interval of the projectile's own flight time, and
//! dropped at end-of-tick reconciliation once the host stops reporting it.

use std::collections::{HashMap, HashSet};

use salvo_core::components::{PartRecord, ProjectileRecord, ProjectileReport, TargetRecord};
use salvo_core::config::GuidanceConfig;
use salvo_core::enums::{PartKind, TargetingPhase};

use crate::feasibility::can_hit;
use crate::geometry::GeometryCache;
use crate::ranking::best_target_for_missile;

/// Which media the projectile can propel itself through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Propulsion {
    pub air: bool,
    pub water: bool,
}

impl Propulsion {
    pub fn cross_domain(&self) -> bool {
        self.air && self.water
    }
}

/// Outcome of one reassessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reassessment {
    /// Sticky mode kept the current target without ranking.
    Kept(u64),
    /// Ranking picked a target (possibly the same one).
    Chosen(u64),
    /// Nothing worth pursuing.
    Cleared,
}

/// Persistent targeting state for one projectile.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetingDecision {
    /// Control channel the projectile was last reported on.
    pub channel: u32,
    pub current_target: Option<u64>,
    /// Flight time of the last reassessment.
    pub last_reassessed: Option<f64>,
    pub propulsion: Propulsion,
    pub fuel_capacity: f64,
    /// Fuel per second at the last commanded thrust.
    pub burn_rate: f64,
    pub fuel_remaining: f64,
    /// Part handles of the variable thrusters.
    pub thrusters: Vec<usize>,
    pub phase: TargetingPhase,
    /// A detonate command has been sent.
    pub detonated: bool,
}

impl TargetingDecision {
    /// Classify propulsion and size the fuel model from the part list.
    pub fn from_parts(channel: u32, parts: &[PartRecord], config: &GuidanceConfig) -> Self {
        let mut propulsion = Propulsion::default();
        let mut thrusters = Vec::new();
        let mut tanks = 0usize;
        for part in parts {
            let kind = part.kind();
            propulsion.air |= kind.is_air_propulsion();
            propulsion.water |= kind.is_water_propulsion();
            match kind {
                PartKind::VariableThruster => thrusters.push(part.index),
                PartKind::FuelTank => tanks += 1,
                _ => {}
            }
        }
        let fuel_capacity = tanks as f64 * config.fuel_tank_capacity;
        Self {
            channel,
            current_target: None,
            last_reassessed: None,
            propulsion,
            fuel_capacity,
            burn_rate: 0.0,
            fuel_remaining: fuel_capacity,
            thrusters,
            phase: TargetingPhase::Unassigned,
            detonated: false,
        }
    }

    /// Whether `interval` seconds of flight time have passed since the last reassessment.
    ///
    /// A flight time earlier than the last reassessment means the host reset
    /// the clock, so the projectile is due again.
    pub fn due_for_reassessment(&self, flight_time: f64, interval: f64) -> bool {
        match self.last_reassessed {
            None => true,
            Some(last) => flight_time < last || flight_time - last >= interval,
        }
    }

    /// Fuel remaining as a fraction of capacity, `None` without tanks.
    pub fn fuel_fraction(&self) -> Option<f64> {
        if self.fuel_capacity > 0.0 {
            Some(self.fuel_remaining / self.fuel_capacity)
        } else {
            None
        }
    }

    /// Update the burn estimate for `thrust` and debit `dt` seconds of it.
    pub fn burn(&mut self, thrust: f64, burn_rate_per_thruster: f64, dt: f64) {
        self.burn_rate = thrust.max(0.0) * self.thrusters.len() as f64 * burn_rate_per_thruster;
        self.fuel_remaining = (self.fuel_remaining - self.burn_rate * dt).max(0.0);
    }

    /// Pick (or keep) a target. Records the reassessment time unconditionally.
    pub fn reassess(
        &mut self,
        projectile: &ProjectileRecord,
        targets: &[TargetRecord],
        cache: &mut GeometryCache,
        config: &GuidanceConfig,
    ) -> Reassessment {
        self.last_reassessed = Some(projectile.time_since_launch);

        if config.sticky_targeting {
            if let Some(current) = self.current_target {
                let still_good = targets
                    .iter()
                    .find(|t| t.id == current)
                    .is_some_and(|t| can_hit(projectile, self, t, cache, config));
                if still_good {
                    self.phase = TargetingPhase::Sticky;
                    return Reassessment::Kept(current);
                }
            }
        }

        let best = best_target_for_missile(projectile, self, targets, cache, config).map(|t| t.id);
        if best != self.current_target {
            log::debug!(
                "projectile {} retargeted {:?} -> {:?}",
                projectile.id,
                self.current_target,
                best
            );
        }
        self.current_target = best;
        match best {
            Some(id) => {
                self.phase = TargetingPhase::Targeting;
                Reassessment::Chosen(id)
            }
            None => {
                self.phase = TargetingPhase::Reassessing;
                Reassessment::Cleared
            }
        }
    }
}

/// All live decisions, keyed by projectile id, with per-tick reconciliation.
#[derive(Debug, Default)]
pub struct DecisionTable {
    decisions: HashMap<u64, TargetingDecision>,
    seen: HashSet<u64>,
}

impl DecisionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a projectile as present this tick, creating its decision on first sighting.
    pub fn observe(
        &mut self,
        channel: u32,
        report: &ProjectileReport,
        config: &GuidanceConfig,
    ) -> &mut TargetingDecision {
        let id = report.projectile.id;
        self.seen.insert(id);
        let decision = self.decisions.entry(id).or_insert_with(|| {
            log::debug!("tracking new projectile {id} on channel {channel}");
            TargetingDecision::from_parts(channel, &report.parts, config)
        });
        decision.channel = channel;
        decision
    }

    pub fn get(&self, id: u64) -> Option<&TargetingDecision> {
        self.decisions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Discard every decision not observed since the last reconciliation.
    /// Returns the ids that were dropped.
    pub fn reconcile(&mut self) -> Vec<u64> {
        let seen = std::mem::take(&mut self.seen);
        let mut dropped: Vec<u64> = self
            .decisions
            .keys()
            .filter(|id| !seen.contains(id))
            .copied()
            .collect();
        dropped.sort_unstable();
        self.decisions.retain(|id, _| seen.contains(id));
        dropped
    }
}
