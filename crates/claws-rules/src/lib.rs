//! Game rules for Claws on the Course.
//!
//! Pure functions and small state holders for run time, difficulty,
//! spawn math, experience and leveling, the upgrade catalog, and the run
//! lifecycle state machine. No ECS dependency — operates on plain data.

pub mod clock;
pub mod difficulty;
pub mod fsm;
pub mod leveling;
pub mod offer;
pub mod upgrades;
pub mod vitals;

pub use claws_core as core;
