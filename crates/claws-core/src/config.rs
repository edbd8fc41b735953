//! Runtime gameplay tuning.
//!
//! [`Tuning`] carries the base values of the world, the player, enemies,
//! spawning, combat, loot and the xp threshold. Curve slopes, caps and
//! floors (difficulty growth, sprinter factors, the chase-speed floor, disc
//! speeds, the xp curve, the fire-rate floor, the xp-multiplier cap and the
//! enemy speed-scale floor) stay compile-time values in
//! [`crate::constants`].
//!
//! A TOML document may override any subset of fields; missing keys fall
//! back to the compile-time defaults, so a minimal file can override just
//! the values you care about:
//!
//! ```toml
//! spawn_base_delay_ms = 800.0
//! sprinter_chance = 0.5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Failure to load or validate a tuning document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("`{field}` must be a probability in [0, 1], got {value}")]
    NotProbability { field: &'static str, value: f64 },
    #[error("spawn floor {floor} ms exceeds base delay {base} ms")]
    SpawnFloorAboveBase { floor: f64, base: f64 },
}

/// Runtime-tunable gameplay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // ── World ────────────────────────────────────────────────────────────────
    pub world_width: f64,
    pub world_height: f64,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_start_x: f64,
    pub player_start_y: f64,
    pub player_move_speed: f64,
    pub player_max_hp: f64,
    pub player_damage: f64,
    pub player_fire_rate_ms: f64,
    pub player_xp_multiplier: f64,
    pub player_radius: f64,

    // ── Spawning ─────────────────────────────────────────────────────────────
    pub spawn_base_delay_ms: f64,
    pub spawn_floor_delay_ms: f64,
    pub sprinter_chance: f64,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_base_hp: f64,
    pub enemy_base_speed: f64,
    pub enemy_radius: f64,
    pub walker_xp_value: f64,
    pub sprinter_xp_value: f64,

    // ── Combat ───────────────────────────────────────────────────────────────
    pub impact_threshold: f64,
    pub hit_flash_ms: f64,
    pub contact_damage: f64,
    pub contact_cooldown_ms: f64,

    // ── Loot ─────────────────────────────────────────────────────────────────
    pub health_drop_chance: f64,
    pub health_pickup_value: f64,
    pub pickup_radius: f64,

    // ── Progression ──────────────────────────────────────────────────────────
    pub base_xp_to_level: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            player_start_x: PLAYER_START_X,
            player_start_y: PLAYER_START_Y,
            player_move_speed: PLAYER_MOVE_SPEED,
            player_max_hp: PLAYER_MAX_HP,
            player_damage: PLAYER_DAMAGE,
            player_fire_rate_ms: PLAYER_FIRE_RATE_MS,
            player_xp_multiplier: PLAYER_XP_MULTIPLIER,
            player_radius: PLAYER_RADIUS,

            spawn_base_delay_ms: SPAWN_BASE_DELAY_MS,
            spawn_floor_delay_ms: SPAWN_FLOOR_DELAY_MS,
            sprinter_chance: SPRINTER_CHANCE,

            enemy_base_hp: ENEMY_BASE_HP,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_radius: ENEMY_RADIUS,
            walker_xp_value: WALKER_XP_VALUE,
            sprinter_xp_value: SPRINTER_XP_VALUE,

            impact_threshold: IMPACT_THRESHOLD,
            hit_flash_ms: HIT_FLASH_MS,
            contact_damage: CONTACT_DAMAGE,
            contact_cooldown_ms: CONTACT_COOLDOWN_MS,

            health_drop_chance: HEALTH_DROP_CHANCE,
            health_pickup_value: HEALTH_PICKUP_VALUE,
            pickup_radius: PICKUP_RADIUS,

            base_xp_to_level: BASE_XP_TO_LEVEL,
        }
    }
}

impl Tuning {
    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = toml::from_str(text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a TOML tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Every field with its TOML key.
    pub(crate) fn fields(&self) -> [(&'static str, f64); 26] {
        [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("player_start_x", self.player_start_x),
            ("player_start_y", self.player_start_y),
            ("player_move_speed", self.player_move_speed),
            ("player_max_hp", self.player_max_hp),
            ("player_damage", self.player_damage),
            ("player_fire_rate_ms", self.player_fire_rate_ms),
            ("player_xp_multiplier", self.player_xp_multiplier),
            ("player_radius", self.player_radius),
            ("spawn_base_delay_ms", self.spawn_base_delay_ms),
            ("spawn_floor_delay_ms", self.spawn_floor_delay_ms),
            ("sprinter_chance", self.sprinter_chance),
            ("enemy_base_hp", self.enemy_base_hp),
            ("enemy_base_speed", self.enemy_base_speed),
            ("enemy_radius", self.enemy_radius),
            ("walker_xp_value", self.walker_xp_value),
            ("sprinter_xp_value", self.sprinter_xp_value),
            ("impact_threshold", self.impact_threshold),
            ("hit_flash_ms", self.hit_flash_ms),
            ("contact_damage", self.contact_damage),
            ("contact_cooldown_ms", self.contact_cooldown_ms),
            ("health_drop_chance", self.health_drop_chance),
            ("health_pickup_value", self.health_pickup_value),
            ("pickup_radius", self.pickup_radius),
            ("base_xp_to_level", self.base_xp_to_level),
        ]
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("player_move_speed", self.player_move_speed),
            ("player_max_hp", self.player_max_hp),
            ("player_fire_rate_ms", self.player_fire_rate_ms),
            ("player_xp_multiplier", self.player_xp_multiplier),
            ("spawn_base_delay_ms", self.spawn_base_delay_ms),
            ("spawn_floor_delay_ms", self.spawn_floor_delay_ms),
            ("enemy_base_hp", self.enemy_base_hp),
            ("enemy_base_speed", self.enemy_base_speed),
            ("impact_threshold", self.impact_threshold),
            ("base_xp_to_level", self.base_xp_to_level),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("player_radius", self.player_radius),
            ("enemy_radius", self.enemy_radius),
            ("pickup_radius", self.pickup_radius),
            ("player_damage", self.player_damage),
            ("walker_xp_value", self.walker_xp_value),
            ("sprinter_xp_value", self.sprinter_xp_value),
            ("hit_flash_ms", self.hit_flash_ms),
            ("contact_damage", self.contact_damage),
            ("contact_cooldown_ms", self.contact_cooldown_ms),
            ("health_pickup_value", self.health_pickup_value),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let probabilities = [
            ("sprinter_chance", self.sprinter_chance),
            ("health_drop_chance", self.health_drop_chance),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotProbability { field, value });
            }
        }

        if self.spawn_floor_delay_ms > self.spawn_base_delay_ms {
            return Err(ConfigError::SpawnFloorAboveBase {
                floor: self.spawn_floor_delay_ms,
                base: self.spawn_base_delay_ms,
            });
        }

        Ok(())
    }
}
