//! Guidance tunables.
//!
//! Every behavior of the engine is parameterized here. Angles are stored in
//! degrees for the operator and read back in radians through accessors.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::ProximityArming;

/// Errors raised while loading or validating a [`GuidanceConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tunable `{name}` out of range: {value}")]
    OutOfRange { name: &'static str, value: f64 },

    #[error("min_thrust ({min}) exceeds max_thrust ({max})")]
    InvertedThrustBounds { min: f64, max: f64 },
}

/// Empirical turning performance, measured with the calibration mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnModel {
    /// Sustained turn rate (degrees per second).
    pub turn_rate_deg: f64,
    /// Cruise speed estimate (m/s).
    pub cruise_speed: f64,
}

impl TurnModel {
    pub fn turn_rate(&self) -> f64 {
        self.turn_rate_deg.to_radians()
    }
}

impl Default for TurnModel {
    fn default() -> Self {
        Self {
            turn_rate_deg: DEFAULT_TURN_RATE_DEG,
            cruise_speed: DEFAULT_CRUISE_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    pub min_thrust: f64,
    pub max_thrust: f64,
    /// Height band around sea level open to both domains (meters).
    pub crossover_tolerance: f64,
    pub max_range: f64,
    pub sea_skim_height: f64,
    pub skim_dive_angle_deg: f64,
    pub climb_age: f64,
    pub climb_height: f64,
    pub sticky_targeting: bool,
    pub off_course_angle_deg: f64,
    pub chase_unicorns: bool,
    /// Flight seconds between reassessments.
    pub reassign_interval: f64,
    pub steer_interval_ticks: u32,
    /// Present for turn-rate-aware guidance; `None` disables the turning check.
    pub turn_model: Option<TurnModel>,
    pub proximity_arming: ProximityArming,
    pub fuel_tank_capacity: f64,
    pub burn_rate_per_thruster: f64,
    pub debug_log: bool,
    pub hud_log: bool,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            min_thrust: DEFAULT_MIN_THRUST,
            max_thrust: DEFAULT_MAX_THRUST,
            crossover_tolerance: DEFAULT_CROSSOVER_TOLERANCE,
            max_range: DEFAULT_MAX_RANGE,
            sea_skim_height: DEFAULT_SEA_SKIM_HEIGHT,
            skim_dive_angle_deg: DEFAULT_SKIM_DIVE_ANGLE_DEG,
            climb_age: DEFAULT_CLIMB_AGE,
            climb_height: DEFAULT_CLIMB_HEIGHT,
            sticky_targeting: true,
            off_course_angle_deg: DEFAULT_OFF_COURSE_ANGLE_DEG,
            chase_unicorns: false,
            reassign_interval: DEFAULT_REASSIGN_INTERVAL,
            steer_interval_ticks: DEFAULT_STEER_INTERVAL_TICKS,
            turn_model: None,
            proximity_arming: ProximityArming::default(),
            fuel_tank_capacity: DEFAULT_FUEL_TANK_CAPACITY,
            burn_rate_per_thruster: DEFAULT_BURN_RATE_PER_THRUSTER,
            debug_log: false,
            hud_log: true,
        }
    }
}

impl GuidanceConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GuidanceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn off_course_angle(&self) -> f64 {
        self.off_course_angle_deg.to_radians()
    }

    pub fn skim_dive_angle(&self) -> f64 {
        self.skim_dive_angle_deg.to_radians()
    }

    /// Check every tunable against its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval("min_thrust", self.min_thrust)?;
        unit_interval("max_thrust", self.max_thrust)?;
        if self.min_thrust > self.max_thrust {
            return Err(ConfigError::InvertedThrustBounds {
                min: self.min_thrust,
                max: self.max_thrust,
            });
        }
        non_negative("crossover_tolerance", self.crossover_tolerance)?;
        positive("max_range", self.max_range)?;
        non_negative("sea_skim_height", self.sea_skim_height)?;
        angle("skim_dive_angle_deg", self.skim_dive_angle_deg, 90.0)?;
        non_negative("climb_age", self.climb_age)?;
        non_negative("climb_height", self.climb_height)?;
        angle("off_course_angle_deg", self.off_course_angle_deg, 180.0)?;
        non_negative("reassign_interval", self.reassign_interval)?;
        if self.steer_interval_ticks == 0 {
            return Err(ConfigError::OutOfRange {
                name: "steer_interval_ticks",
                value: 0.0,
            });
        }
        if let Some(model) = &self.turn_model {
            positive("turn_model.turn_rate_deg", model.turn_rate_deg)?;
            non_negative("turn_model.cruise_speed", model.cruise_speed)?;
        }
        match self.proximity_arming {
            ProximityArming::Distance { radius } => {
                non_negative("proximity_arming.radius", radius)?
            }
            ProximityArming::FuelFraction { fraction } => {
                unit_interval("proximity_arming.fraction", fraction)?
            }
        }
        non_negative("fuel_tank_capacity", self.fuel_tank_capacity)?;
        non_negative("burn_rate_per_thruster", self.burn_rate_per_thruster)?;
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value })
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value })
    }
}

fn angle(name: &'static str, value: f64, max_deg: f64) -> Result<(), ConfigError> {
    if (0.0..=max_deg).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value })
    }
}
