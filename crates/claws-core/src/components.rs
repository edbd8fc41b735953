//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems and in `claws-rules`, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Live player stats. Single instance per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Pixels per second along each held axis.
    pub move_speed: f64,
    pub max_hp: f64,
    /// Always within `[0, max_hp]`.
    pub hp: f64,
    /// Damage per disc, read at impact time.
    pub damage: f64,
    /// Milliseconds between throws.
    pub fire_rate_ms: f64,
    pub xp_multiplier: f64,
    /// Starts at 1.
    pub level: u32,
    /// Below `xp_to_level` once the level-up loop settles.
    pub xp: f64,
    pub xp_to_level: f64,
    pub disc_tier: DiscTier,
}

/// Enemy-side values that upgrades may mutate for the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTunables {
    /// Multiplier on every enemy's effective speed.
    pub speed_scale: f64,
}

impl Default for EnemyTunables {
    fn default() -> Self {
        Self { speed_scale: 1.0 }
    }
}

/// Crayfish state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub archetype: EnemyArchetype,
    pub max_hp: f64,
    /// Always within `[0, max_hp]`.
    pub hp: f64,
    pub base_speed: f64,
    /// Difficulty-scaled speed captured at spawn.
    pub effective_speed: f64,
    pub xp_value: f64,
    /// Cleared exactly once, when death is resolved.
    pub alive: bool,
    /// Hit-flash tint currently shown.
    pub flashing: bool,
}

/// Loot on the ground.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub value: f64,
}

/// Marks the player entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Collision radius used for overlap checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub radius: f64,
}

/// Monotonic creation index. Breaks targeting ties in favor of the
/// earliest spawn, independent of storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);
