//! Cruise control: forward propulsion toward a set speed.

use crate::pd::{PdController, PdGains};

pub const DEFAULT_CRUISE_GAINS: PdGains = PdGains { kp: 0.02, kd: 0.005 };

#[derive(Debug, Clone, PartialEq)]
pub struct CruiseControl {
    pub target_speed: f64,
    controller: PdController,
    output: f64,
}

impl CruiseControl {
    pub fn new(target_speed: f64) -> Self {
        Self::with_gains(target_speed, DEFAULT_CRUISE_GAINS)
    }

    pub fn with_gains(target_speed: f64, gains: PdGains) -> Self {
        Self {
            target_speed,
            controller: PdController::new(gains),
            output: 0.0,
        }
    }

    /// Propulsion output in `[0, 1]`. The PD term adjusts the previous output,
    /// so a steady speed holds a steady throttle.
    pub fn update(&mut self, speed: f64, dt: f64) -> f64 {
        let adjust = self.controller.update(self.target_speed - speed, dt);
        self.output = (self.output + adjust * dt).clamp(0.0, 1.0);
        self.output
    }

    pub fn output(&self) -> f64 {
        self.output
    }
}
