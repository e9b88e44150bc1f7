//! Proportional-derivative controller shared by the actuator loops.

use serde::{Deserialize, Serialize};

/// PD gains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PdGains {
    pub kp: f64,
    pub kd: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdController {
    pub gains: PdGains,
    last_error: Option<f64>,
}

impl PdController {
    pub fn new(gains: PdGains) -> Self {
        Self {
            gains,
            last_error: None,
        }
    }

    /// Controller output for `error` after `dt` seconds. The derivative term
    /// is zero on the first sample and whenever `dt` is not positive.
    pub fn update(&mut self, error: f64, dt: f64) -> f64 {
        let derivative = match self.last_error {
            Some(last) if dt > 0.0 => (error - last) / dt,
            _ => 0.0,
        };
        self.last_error = Some(error);
        self.gains.kp * error + self.gains.kd * derivative
    }

    pub fn reset(&mut self) {
        self.last_error = None;
    }
}
