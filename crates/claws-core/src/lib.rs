//! Core types and definitions for the Claws on the Course simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, constants, and the
//! runtime tuning configuration. It has no dependency on any ECS or
//! presentation framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
