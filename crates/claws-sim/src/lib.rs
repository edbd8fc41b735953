//! Simulation engine for Claws on the Course.
//!
//! Owns the hecs ECS world inside a [`RunContext`], runs systems once per
//! frame, and produces `GameStateSnapshot`s for the presentation layer.

pub mod context;
pub mod engine;
pub mod projectile;
pub mod systems;
pub mod timers;
pub mod world_setup;

pub use claws_core as core;
pub use context::RunContext;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
