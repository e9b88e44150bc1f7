//! Core types and definitions for the SALVO guidance controller.
//!
//! This crate defines the vocabulary shared across all other crates:
//! host records, tick snapshots, host commands, tunables and constants.
//! It has no dependency on any host runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
