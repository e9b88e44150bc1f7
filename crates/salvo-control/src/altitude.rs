//! Altitude hold. Balances lift to keep a projectile at a set height.

use crate::pd::{PdController, PdGains};

/// Default gains: about full lift for a 20m shortfall, damped by vertical speed.
pub const DEFAULT_ALTITUDE_GAINS: PdGains = PdGains { kp: 0.05, kd: 0.02 };

#[derive(Debug, Clone, PartialEq)]
pub struct AltitudeHold {
    pub target_altitude: f64,
    /// Lift output that exactly balances weight.
    pub hover_output: f64,
    controller: PdController,
}

impl AltitudeHold {
    pub fn new(target_altitude: f64, hover_output: f64) -> Self {
        Self::with_gains(target_altitude, hover_output, DEFAULT_ALTITUDE_GAINS)
    }

    pub fn with_gains(target_altitude: f64, hover_output: f64, gains: PdGains) -> Self {
        Self {
            target_altitude,
            hover_output,
            controller: PdController::new(gains),
        }
    }

    /// Lift output in `[0, 1]` for the current altitude.
    pub fn update(&mut self, altitude: f64, dt: f64) -> f64 {
        let correction = self.controller.update(self.target_altitude - altitude, dt);
        (self.hover_output + correction).clamp(0.0, 1.0)
    }
}
