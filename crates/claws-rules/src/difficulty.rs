//! Spawn scheduling math and difficulty-scaled enemy stats.

use rand::Rng;

use claws_core::config::Tuning;
use claws_core::constants::*;
use claws_core::enums::EnemyArchetype;
use claws_core::types::Position;

/// Stats for a freshly spawned enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub archetype: EnemyArchetype,
    pub max_hp: f64,
    pub base_speed: f64,
    pub effective_speed: f64,
    pub xp_value: f64,
}

/// Delay until the next spawn: shrinks linearly with run time, bounded to
/// `[floor_ms, base_ms]`.
pub fn spawn_interval_ms(elapsed_minutes: f64, base_ms: f64, floor_ms: f64) -> f64 {
    let shrunk = base_ms * (1.0 - elapsed_minutes * SPAWN_DELAY_SHRINK_PER_MINUTE);
    shrunk.min(base_ms).max(floor_ms)
}

/// Bernoulli archetype roll.
pub fn roll_archetype<R: Rng + ?Sized>(rng: &mut R, sprinter_chance: f64) -> EnemyArchetype {
    if rng.gen_bool(sprinter_chance.clamp(0.0, 1.0)) {
        EnemyArchetype::Sprinter
    } else {
        EnemyArchetype::Walker
    }
}

/// Uniform point on one of the four world edges: side first, then the
/// free coordinate along that side.
pub fn edge_spawn_position<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Position {
    match rng.gen_range(0..4) {
        0 => Position::new(rng.gen_range(0.0..=width), 0.0),
        1 => Position::new(rng.gen_range(0.0..=width), height),
        2 => Position::new(0.0, rng.gen_range(0.0..=height)),
        _ => Position::new(width, rng.gen_range(0.0..=height)),
    }
}

/// Scale base enemy stats by the current difficulty multiplier.
///
/// Walkers get `floor(base_hp * difficulty)`. Sprinters always get
/// `floor(base_hp * 0.6)` regardless of difficulty, and 1.5x speed on top
/// of the scaled speed.
pub fn scale_enemy(archetype: EnemyArchetype, difficulty: f64, tuning: &Tuning) -> EnemyStats {
    let base_speed = tuning.enemy_base_speed;
    let scaled_speed = base_speed * (1.0 + (difficulty - 1.0) * SPEED_DIFFICULTY_FACTOR);

    let (max_hp, effective_speed, xp_value) = match archetype {
        EnemyArchetype::Walker => (
            (tuning.enemy_base_hp * difficulty).floor(),
            scaled_speed,
            tuning.walker_xp_value,
        ),
        EnemyArchetype::Sprinter => (
            (tuning.enemy_base_hp * SPRINTER_HP_FACTOR).floor(),
            scaled_speed * SPRINTER_SPEED_FACTOR,
            tuning.sprinter_xp_value,
        ),
    };

    EnemyStats {
        archetype,
        max_hp: max_hp.max(1.0),
        base_speed,
        effective_speed,
        xp_value,
    }
}

/// Speed an enemy actually moves at. Never below half its base speed,
/// whatever upgrades have done to `speed_scale`.
pub fn motion_speed(effective_speed: f64, base_speed: f64, speed_scale: f64) -> f64 {
    (effective_speed * speed_scale).max(base_speed * ENEMY_MIN_SPEED_FACTOR)
}
