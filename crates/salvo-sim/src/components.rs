//! Simulation-only components. Positions and velocities reuse the core types.

use serde::{Deserialize, Serialize};

use salvo_core::components::PartRecord;
use salvo_core::constants::THRUST_REGISTER;
use salvo_core::enums::PartKind;
use salvo_core::types::Position;

/// A flying projectile and its controllable parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileBody {
    pub id: u64,
    pub channel: u32,
    /// Simulation seconds at launch.
    pub launched_at: f64,
    pub parts: Vec<PartRecord>,
    /// Last aim point commanded by guidance.
    pub aim: Option<Position>,
}

impl ProjectileBody {
    /// Mean thrust register across throttleable thrusters, in `[0, 1]`.
    pub fn thrust(&self) -> f64 {
        let values: Vec<f64> = self
            .parts
            .iter()
            .filter(|p| p.kind() == PartKind::VariableThruster)
            .filter_map(|p| p.registers.get(THRUST_REGISTER).copied())
            .collect();
        if values.is_empty() {
            return 0.0;
        }
        (values.iter().sum::<f64>() / values.len() as f64).clamp(0.0, 1.0)
    }

    /// Write a register on the part with host handle `part`. Unknown parts
    /// and registers are ignored.
    pub fn set_register(&mut self, part: usize, register: usize, value: f64) -> bool {
        let Some(slot) = self
            .parts
            .iter_mut()
            .find(|p| p.index == part)
            .and_then(|p| p.registers.get_mut(register))
        else {
            return false;
        };
        *slot = value;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetBody {
    pub id: u64,
    pub player_choice: bool,
    pub protected: bool,
    pub priority: i32,
    pub score: f64,
}

/// Marker: the projectile has self-destructed this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detonated;

/// Marker: the target was inside a detonation's lethal radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destroyed;
