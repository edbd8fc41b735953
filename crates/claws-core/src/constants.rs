//! Simulation constants and tuning defaults.
//!
//! `config::Tuning::default()` reads from here; these remain the
//! authoritative defaults.

/// Frame rate the engine is stepped at by default (Hz).
pub const FRAME_RATE: u32 = 60;

/// Milliseconds per frame at the default frame rate.
pub const FRAME_MS: f64 = 1000.0 / FRAME_RATE as f64;

/// Milliseconds per minute of run time.
pub const MS_PER_MINUTE: f64 = 60_000.0;

// --- World bounds ---

pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 600.0;

// --- Player ---

pub const PLAYER_START_X: f64 = 400.0;
pub const PLAYER_START_Y: f64 = 300.0;
pub const PLAYER_MOVE_SPEED: f64 = 200.0;
pub const PLAYER_MAX_HP: f64 = 100.0;
pub const PLAYER_DAMAGE: f64 = 10.0;
/// Milliseconds between disc throws.
pub const PLAYER_FIRE_RATE_MS: f64 = 800.0;
pub const PLAYER_XP_MULTIPLIER: f64 = 1.0;
/// Half-extent of the 40x40 player body.
pub const PLAYER_RADIUS: f64 = 20.0;

// --- Difficulty ---

/// Difficulty multiplier gained per elapsed minute.
pub const DIFFICULTY_PER_MINUTE: f64 = 0.12;

/// Fraction of the base spawn delay removed per elapsed minute.
pub const SPAWN_DELAY_SHRINK_PER_MINUTE: f64 = 0.1;

/// Fraction of extra difficulty applied to enemy speed.
pub const SPEED_DIFFICULTY_FACTOR: f64 = 0.4;

// --- Spawning ---

pub const SPAWN_BASE_DELAY_MS: f64 = 1000.0;
pub const SPAWN_FLOOR_DELAY_MS: f64 = 250.0;

// --- Enemies ---

pub const ENEMY_BASE_HP: f64 = 30.0;
pub const ENEMY_BASE_SPEED: f64 = 60.0;
pub const ENEMY_RADIUS: f64 = 16.0;
pub const WALKER_XP_VALUE: f64 = 2.0;
pub const SPRINTER_XP_VALUE: f64 = 1.0;
pub const SPRINTER_CHANCE: f64 = 0.3;
/// Sprinter hp as a fraction of base hp (never difficulty-scaled).
pub const SPRINTER_HP_FACTOR: f64 = 0.6;
pub const SPRINTER_SPEED_FACTOR: f64 = 1.5;
/// Minimum motion speed as a fraction of base speed.
pub const ENEMY_MIN_SPEED_FACTOR: f64 = 0.5;

// --- Combat ---

/// Default disc speed (pixels per second).
pub const PROJECTILE_SPEED: f64 = 400.0;
/// Distance below which a disc connects with its target.
pub const IMPACT_THRESHOLD: f64 = 5.0;
pub const HIT_FLASH_MS: f64 = 50.0;
pub const CONTACT_DAMAGE: f64 = 10.0;
pub const CONTACT_COOLDOWN_MS: f64 = 300.0;

// --- Loot ---

pub const HEALTH_DROP_CHANCE: f64 = 0.2;
pub const HEALTH_PICKUP_VALUE: f64 = 10.0;
pub const PICKUP_RADIUS: f64 = 12.0;

// --- Progression ---

pub const BASE_XP_TO_LEVEL: f64 = 10.0;
/// Growth of the level threshold per elapsed minute.
pub const XP_CURVE_PER_MINUTE: f64 = 0.33;
/// Number of options presented per upgrade episode.
pub const UPGRADE_OFFER_SIZE: usize = 3;
pub const FIRE_RATE_FLOOR_MS: f64 = 200.0;
pub const XP_MULTIPLIER_CAP: f64 = 2.5;
pub const ENEMY_SPEED_SCALE_FLOOR: f64 = 0.3;

// --- Presentation ---

/// Camera shake requested when the player takes contact damage.
pub const HURT_SHAKE_MS: f64 = 100.0;
pub const HURT_SHAKE_INTENSITY: f64 = 0.01;
