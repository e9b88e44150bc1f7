//! Target selection and guidance engine for SALVO.
//!
//! Runs once per host tick: refreshes the target list, reconciles
//! per-projectile targeting state, ranks and checks candidate targets,
//! and emits aim, thrust and detonate commands. Completely headless;
//! the host is reached only through `TickInput` and `HostCommand`.

pub mod decision;
pub mod engine;
pub mod feasibility;
pub mod geometry;
pub mod ranking;
pub mod scanner;
pub mod steering;

pub use engine::GuidanceEngine;
pub use salvo_core as core;

#[cfg(test)]
mod proptest_ranking;
