//! Entity spawn factories.
//!
//! Creates the player, enemies, discs, and pickups with their component
//! bundles.

use hecs::{Entity, World};

use claws_core::components::*;
use claws_core::config::Tuning;
use claws_core::enums::PickupKind;
use claws_core::types::{Position, Velocity};
use claws_rules::difficulty::EnemyStats;

use crate::projectile::Projectile;

/// Spawn the player at the configured start position.
pub fn spawn_player(world: &mut World, tuning: &Tuning) -> Entity {
    world.spawn((
        Player,
        Position::new(tuning.player_start_x, tuning.player_start_y)
            .clamped(tuning.world_width, tuning.world_height),
        Velocity::zero(),
        Body {
            radius: tuning.player_radius,
        },
    ))
}

/// Spawn an enemy with pre-scaled stats at full hp.
pub fn spawn_enemy(
    world: &mut World,
    stats: &EnemyStats,
    position: Position,
    order: SpawnOrder,
    radius: f64,
) -> Entity {
    let enemy = Enemy {
        archetype: stats.archetype,
        max_hp: stats.max_hp,
        hp: stats.max_hp,
        base_speed: stats.base_speed,
        effective_speed: stats.effective_speed,
        xp_value: stats.xp_value,
        alive: true,
        flashing: false,
    };
    world.spawn((enemy, position, Velocity::zero(), Body { radius }, order))
}

/// Spawn a disc at rest; the projectile system steers it from the next
/// frame on.
pub fn spawn_projectile(world: &mut World, position: Position, projectile: Projectile) -> Entity {
    world.spawn((projectile, position, Velocity::zero()))
}

pub fn spawn_pickup(
    world: &mut World,
    kind: PickupKind,
    value: f64,
    position: Position,
    radius: f64,
) -> Entity {
    world.spawn((Pickup { kind, value }, position, Body { radius }))
}
