//! Commands issued to the host.
//!
//! The host applies them in order after the engine returns from a tick.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// All outbound actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    /// Steer a projectile toward a world-space point.
    SetAimPoint {
        channel: u32,
        projectile: u64,
        position: Position,
    },
    /// Write a value into a part register (thrust fraction on thrusters).
    SetActuatorRegister {
        channel: u32,
        projectile: u64,
        part: usize,
        register: usize,
        value: f64,
    },
    /// Self-destruct a projectile now.
    Detonate { channel: u32, projectile: u64 },
    /// Diagnostic log line.
    Log { message: String },
    /// Operator-visible HUD line.
    LogHud { message: String },
}

impl HostCommand {
    /// Projectile this command addresses, if any.
    pub fn projectile(&self) -> Option<u64> {
        match self {
            HostCommand::SetAimPoint { projectile, .. }
            | HostCommand::SetActuatorRegister { projectile, .. }
            | HostCommand::Detonate { projectile, .. } => Some(*projectile),
            HostCommand::Log { .. } | HostCommand::LogHud { .. } => None,
        }
    }
}
