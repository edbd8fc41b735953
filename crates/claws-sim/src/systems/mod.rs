//! ECS systems that operate on the run each frame.
//!
//! Systems are plain functions over `&mut RunContext` (or `&RunContext`
//! for read-only work). They do not own state.
//!
//! Frame order: timers, player movement, enemy movement, projectile
//! advance/impact/death, contact damage, pickups and progression, cleanup.

pub mod cleanup;
pub mod combat;
pub mod contact;
pub mod movement;
pub mod pickups;
pub mod progression;
pub mod projectiles;
pub mod snapshot;
pub mod spawner;
pub mod targeting;
