//! Host-reported records.
//!
//! Records are plain data structs with no behavior beyond validity checks.
//! They are rebuilt by the host every tick and never mutated by the engine.

use serde::{Deserialize, Serialize};

use crate::enums::PartKind;
use crate::types::{Position, Velocity};

/// A sensor-reported candidate target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRecord {
    pub id: u64,
    /// World position of the designated aim point.
    pub aim_point: Position,
    pub velocity: Velocity,
    /// Marked by the controlling player as the chosen target.
    pub player_choice: bool,
    /// Protected or salvage; ranked last.
    pub protected: bool,
    /// Sensor doctrine priority. Lower is more important.
    pub priority: i32,
    pub score: f64,
    pub valid: bool,
}

impl TargetRecord {
    /// Valid according to the sensor and carrying finite numbers.
    pub fn is_usable(&self) -> bool {
        self.valid
            && self.aim_point.is_finite()
            && self.velocity.is_finite()
            && self.score.is_finite()
    }
}

/// A live projectile as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileRecord {
    pub id: u64,
    pub position: Position,
    pub velocity: Velocity,
    /// Seconds since launch.
    pub time_since_launch: f64,
}

impl ProjectileRecord {
    pub fn is_usable(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.time_since_launch.is_finite()
    }
}

/// One structural part of a projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRecord {
    /// Host handle used to address the part's registers.
    pub index: usize,
    pub name: String,
    #[serde(default)]
    pub registers: Vec<f64>,
}

impl PartRecord {
    pub fn kind(&self) -> PartKind {
        PartKind::from_name(&self.name)
    }
}

/// A projectile together with its part list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileReport {
    pub projectile: ProjectileRecord,
    #[serde(default)]
    pub parts: Vec<PartRecord>,
}

/// One sensor group's view of the valid targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorGroup {
    pub targets: Vec<TargetRecord>,
}

/// One projectile-control channel (a launcher transceiver).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlChannel {
    pub id: u32,
    pub projectiles: Vec<ProjectileReport>,
}
