//! Host simulation for SALVO.
//!
//! Owns a hecs ECS world of projectiles and targets, reports it to the
//! guidance engine each tick and applies the returned commands. Headless
//! and seeded, so identical configs replay identically.

pub mod components;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::{HostSimulation, SimConfig, SimStats};
pub use salvo_core as core;
