//! Tick input snapshot: everything the host reports for one tick.

use serde::{Deserialize, Serialize};

use crate::components::{ControlChannel, SensorGroup};
use crate::types::SimTime;

/// Immutable host state for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub time: SimTime,
    pub sensor_groups: Vec<SensorGroup>,
    pub channels: Vec<ControlChannel>,
}

impl TickInput {
    /// Total number of projectiles reported across all channels.
    pub fn projectile_count(&self) -> usize {
        self.channels.iter().map(|c| c.projectiles.len()).sum()
    }
}
