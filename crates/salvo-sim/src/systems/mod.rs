//! ECS systems run by the host simulation each tick.
//!
//! Systems are free functions over `&World` or `&mut World`; all state lives
//! in components.

pub mod cleanup;
pub mod commands;
pub mod detonation;
pub mod movement;
pub mod sensors;
