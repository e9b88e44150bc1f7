//! One-shot calibration flight.
//!
//! Flies a single projectile straight until it settles at cruise speed, then
//! keeps commanding an aim point directly behind it so it turns as hard as it
//! can. The peak speed and peak heading change per second become the
//! [`CalibrationReport`] an operator copies into the turn-model tunables.

use std::collections::HashSet;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use salvo_core::commands::HostCommand;
use salvo_core::components::{ControlChannel, ProjectileReport};
use salvo_core::constants::GEOMETRY_EPSILON;
use salvo_core::state::TickInput;
use salvo_core::types::{Position, Velocity};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Seconds of straight flight before the reversal starts.
    pub settle_secs: f64,
    /// Distance of the commanded aim point from the projectile.
    pub aim_distance: f64,
    pub hud_log: bool,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            settle_secs: 3.0,
            aim_distance: 500.0,
            hud_log: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub projectile: u64,
    /// Peak speed seen before the reversal, metres per second.
    pub cruise_speed: f64,
    /// Peak heading change during the reversal, degrees per second.
    pub turn_rate_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationPhase {
    /// No projectile tracked yet.
    Waiting,
    Settling,
    Reversing,
    /// A report has been produced.
    Done,
}

#[derive(Debug, Clone)]
struct Tracked {
    channel: u32,
    id: u64,
    last_velocity: Velocity,
    last_secs: f64,
    peak_speed: f64,
    peak_turn_rate: f64,
    reversing: bool,
}

impl Tracked {
    fn report(&self) -> CalibrationReport {
        CalibrationReport {
            projectile: self.id,
            cruise_speed: self.peak_speed,
            turn_rate_deg: self.peak_turn_rate.to_degrees(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Calibrator {
    config: CalibrationConfig,
    tracked: Option<Tracked>,
    report: Option<CalibrationReport>,
    /// Excess projectiles already sent a detonate.
    detonated: HashSet<u64>,
}

impl Calibrator {
    pub fn new(config: CalibrationConfig) -> Self {
        Self {
            config,
            tracked: None,
            report: None,
            detonated: HashSet::new(),
        }
    }

    pub fn phase(&self) -> CalibrationPhase {
        match &self.tracked {
            Some(t) if t.reversing => CalibrationPhase::Reversing,
            Some(_) => CalibrationPhase::Settling,
            None if self.report.is_some() => CalibrationPhase::Done,
            None => CalibrationPhase::Waiting,
        }
    }

    /// Last completed report.
    pub fn report(&self) -> Option<&CalibrationReport> {
        self.report.as_ref()
    }

    /// Figures measured so far for the projectile in flight.
    pub fn measurement(&self) -> Option<CalibrationReport> {
        self.tracked.as_ref().map(Tracked::report)
    }

    /// Run one calibration tick and return the commands for the host.
    ///
    /// The projectile already being measured keeps its place while it is
    /// reported; only when nothing is tracked does the first reported one
    /// not already sent a detonate take over. Every other projectile is
    /// excess and is detonated once.
    pub fn update(&mut self, input: &TickInput) -> Vec<HostCommand> {
        let mut commands = Vec::new();
        let now = input.time.elapsed_secs;

        let live: Vec<(u32, &ProjectileReport)> = input
            .channels
            .iter()
            .flat_map(|c: &ControlChannel| c.projectiles.iter().map(move |r| (c.id, r)))
            .collect();
        let kept = self
            .tracked
            .as_ref()
            .and_then(|t| live.iter().position(|(_, r)| r.projectile.id == t.id))
            .or_else(|| {
                live.iter().position(|(_, r)| !self.detonated.contains(&r.projectile.id))
            });

        self.detonated.retain(|id| live.iter().any(|(_, r)| r.projectile.id == *id));
        if input.projectile_count() > 1 {
            let mut extras = 0;
            for (i, (channel, report)) in live.iter().enumerate() {
                if Some(i) == kept {
                    continue;
                }
                extras += 1;
                if self.detonated.insert(report.projectile.id) {
                    commands.push(HostCommand::Detonate {
                        channel: *channel,
                        projectile: report.projectile.id,
                    });
                }
            }
            let message = format!(
                "Calibration needs a single projectile: {} extra detonated",
                extras
            );
            log::warn!("{}", message);
            commands.push(HostCommand::LogHud { message });
        }

        let first = kept.map(|i| live[i]);
        let same = match (&self.tracked, first) {
            (Some(t), Some((_, r))) => t.id == r.projectile.id,
            _ => false,
        };
        if !same {
            if let Some(done) = self.tracked.take() {
                self.finish(&done, &mut commands);
            }
            if let Some((channel, report)) = first {
                self.start(channel, report, now);
            }
        }

        if let (Some(tracked), Some((_, report))) = (self.tracked.as_mut(), first) {
            observe(tracked, report, now, self.config.settle_secs);
            if let Some(aim) = aim_point(tracked, report, self.config.aim_distance) {
                commands.push(HostCommand::SetAimPoint {
                    channel: tracked.channel,
                    projectile: tracked.id,
                    position: aim,
                });
            }
        }

        commands
    }

    fn start(&mut self, channel: u32, report: &ProjectileReport, now: f64) {
        log::debug!("calibrating projectile {}", report.projectile.id);
        self.tracked = Some(Tracked {
            channel,
            id: report.projectile.id,
            last_velocity: report.projectile.velocity,
            last_secs: now,
            peak_speed: report.projectile.velocity.speed(),
            peak_turn_rate: 0.0,
            reversing: false,
        });
    }

    fn finish(&mut self, tracked: &Tracked, commands: &mut Vec<HostCommand>) {
        let report = tracked.report();
        let message = format!(
            "Calibration: cruise speed {:.1} m/s, turn rate {:.1} deg/s",
            report.cruise_speed, report.turn_rate_deg
        );
        log::info!("{}", message);
        if self.config.hud_log {
            commands.push(HostCommand::LogHud { message });
        }
        self.report = Some(report);
    }
}

fn observe(tracked: &mut Tracked, report: &ProjectileReport, now: f64, settle_secs: f64) {
    let velocity = report.projectile.velocity;
    let dt = now - tracked.last_secs;

    if tracked.reversing {
        let before = tracked.last_velocity.as_dvec3();
        let after = velocity.as_dvec3();
        if dt > 0.0 && before.length() > GEOMETRY_EPSILON && after.length() > GEOMETRY_EPSILON {
            let rate = before.angle_between(after) / dt;
            tracked.peak_turn_rate = tracked.peak_turn_rate.max(rate);
        }
    } else {
        tracked.peak_speed = tracked.peak_speed.max(velocity.speed());
        if report.projectile.time_since_launch >= settle_secs {
            tracked.reversing = true;
        }
    }

    tracked.last_velocity = velocity;
    tracked.last_secs = now;
}

/// Straight ahead while settling, directly behind while reversing.
fn aim_point(tracked: &Tracked, report: &ProjectileReport, distance: f64) -> Option<Position> {
    let heading = report.projectile.velocity.as_dvec3().try_normalize()?;
    let offset: DVec3 = if tracked.reversing {
        -heading * distance
    } else {
        heading * distance
    };
    Some(Position::from_dvec3(report.projectile.position.as_dvec3() + offset))
}
