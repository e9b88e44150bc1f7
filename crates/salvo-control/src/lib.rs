//! Independent control loops and the calibration mode for SALVO.
//!
//! These run beside the guidance engine but never inform it: altitude
//! hold and cruise control are single-projectile PD actuators, and the
//! calibrator measures the turn rate and cruise speed an operator copies
//! into the guidance tunables by hand.

pub mod altitude;
pub mod calibration;
pub mod pd;
pub mod propulsion;

pub use salvo_core as core;

#[cfg(test)]
mod tests;
