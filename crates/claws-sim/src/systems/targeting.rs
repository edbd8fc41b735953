//! Fire control — picks the nearest living enemy and throws a disc at it.

use hecs::{Entity, World};
use tracing::debug;

use claws_core::components::{Enemy, SpawnOrder};
use claws_core::events::GameEvent;
use claws_core::types::Position;
use claws_rules::leveling::disc_profile;

use crate::context::RunContext;
use crate::projectile::Projectile;
use crate::world_setup;

/// Nearest living enemy to `origin`.
///
/// Candidates are scanned in spawn order and only a strictly smaller
/// distance replaces the current pick, so exact ties go to the earliest
/// spawn.
pub fn nearest_living_enemy(world: &World, origin: &Position) -> Option<Entity> {
    let mut candidates: Vec<(SpawnOrder, Entity, f64)> = world
        .query::<(&Enemy, &Position, &SpawnOrder)>()
        .iter()
        .filter(|(_, (enemy, _, _))| enemy.alive)
        .map(|(entity, (_, pos, order))| (*order, entity, origin.distance_to(pos)))
        .collect();
    candidates.sort_by_key(|(order, _, _)| *order);

    let mut best: Option<(Entity, f64)> = None;
    for (_, entity, distance) in candidates {
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((entity, distance)),
        }
    }
    best.map(|(entity, _)| entity)
}

/// Fire-timer callback. No-op while dead or when nothing is alive.
pub fn fire(ctx: &mut RunContext) -> Option<Entity> {
    if ctx.fsm.is_dead() {
        return None;
    }

    let origin = ctx.player_position();
    let target = nearest_living_enemy(&ctx.world, &origin)?;

    let tier = ctx.stats.disc_tier;
    let projectile = Projectile {
        target,
        speed: disc_profile(tier).speed,
        tier,
    };
    let disc = world_setup::spawn_projectile(&mut ctx.world, origin, projectile);

    let id = disc.to_bits().get();
    let target_id = target.to_bits().get();
    debug!(id, target = target_id, ?tier, "disc thrown");
    ctx.events.push(GameEvent::DiscThrown {
        id,
        target: target_id,
        tier,
    });
    Some(disc)
}
