//! Enumeration types used throughout the guidance controller.

use serde::{Deserialize, Serialize};

/// Structural role of a projectile part, classified from the host's part name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    /// Throttleable air thruster. Thrust is commanded through a register.
    VariableThruster,
    /// Fixed-burn air thruster.
    ShortRangeThruster,
    /// Water propeller.
    Propeller,
    /// Fuel storage.
    FuelTank,
    Other,
}

impl PartKind {
    /// Classify a host part name. Matching is case-insensitive on a substring,
    /// so decorated names like "Missile Variable Thruster" still match.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.contains("variable thruster") {
            PartKind::VariableThruster
        } else if name.contains("short range thruster") {
            PartKind::ShortRangeThruster
        } else if name.contains("propeller") {
            PartKind::Propeller
        } else if name.contains("fuel tank") {
            PartKind::FuelTank
        } else {
            PartKind::Other
        }
    }

    pub fn is_air_propulsion(&self) -> bool {
        matches!(self, PartKind::VariableThruster | PartKind::ShortRangeThruster)
    }

    pub fn is_water_propulsion(&self) -> bool {
        matches!(self, PartKind::Propeller)
    }
}

/// Condition that arms the overshoot/proximity detonation check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum ProximityArming {
    /// Armed once the projectile is within `radius` meters of its target.
    Distance { radius: f64 },
    /// Armed once estimated fuel drops below `fraction` of capacity.
    FuelFraction { fraction: f64 },
}

impl ProximityArming {
    /// Fuel-aware arming at the default abort fraction.
    pub fn fuel_abort() -> Self {
        ProximityArming::FuelFraction {
            fraction: crate::constants::DEFAULT_FUEL_ABORT_FRACTION,
        }
    }
}

impl Default for ProximityArming {
    fn default() -> Self {
        ProximityArming::Distance {
            radius: crate::constants::DEFAULT_PROXIMITY_RADIUS,
        }
    }
}

/// Per-projectile targeting phase, recorded for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetingPhase {
    /// First sighting; no reassessment yet.
    #[default]
    Unassigned,
    /// Steering onto a freshly ranked target.
    Targeting,
    /// Kept the previous target without re-ranking.
    Sticky,
    /// Ranking ran this tick but nothing was chosen yet.
    Reassessing,
    /// No target; holding last heading.
    Coasting,
    /// No target; climbing to ease a later turn.
    Climbing,
    /// Detonate command sent.
    Detonated,
}
