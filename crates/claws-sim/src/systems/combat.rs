//! Damage, death resolution, and loot.

use hecs::Entity;
use rand::Rng;
use tracing::debug;

use claws_core::components::Enemy;
use claws_core::config::Tuning;
use claws_core::enums::PickupKind;
use claws_core::events::GameEvent;
use claws_core::types::Position;
use claws_rules::vitals;

use crate::context::RunContext;
use crate::timers::TimerEvent;
use crate::world_setup;

/// Outcome of a single hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// Target was missing or already dead; nothing happened.
    Ignored,
    Damaged,
    Killed,
}

/// Apply `damage` to a living enemy, flash it, and resolve its death if
/// the hit drops it to 0.
pub fn apply_hit<R: Rng + ?Sized>(
    ctx: &mut RunContext,
    rng: &mut R,
    tuning: &Tuning,
    target: Entity,
    damage: f64,
) -> HitResult {
    let lethal = match ctx.world.get::<&mut Enemy>(target) {
        Ok(mut enemy) if enemy.alive => {
            let lethal = vitals::damage_enemy(&mut enemy, damage);
            enemy.flashing = true;
            lethal
        }
        _ => return HitResult::Ignored,
    };

    ctx.events.push(GameEvent::HitFlash {
        id: target.to_bits().get(),
    });
    ctx.scheduler
        .schedule_once(tuning.hit_flash_ms, TimerEvent::ClearHitFlash(target));

    if lethal && resolve_death(ctx, rng, tuning, target) {
        HitResult::Killed
    } else {
        HitResult::Damaged
    }
}

/// Mark an enemy dead, count the kill, queue its removal, and drop loot at
/// the position it died at.
///
/// Runs at most once per enemy: returns false if the enemy is missing,
/// still has hp, or was already resolved.
pub fn resolve_death<R: Rng + ?Sized>(
    ctx: &mut RunContext,
    rng: &mut R,
    tuning: &Tuning,
    target: Entity,
) -> bool {
    let (position, xp_value) = match ctx.world.query_one_mut::<(&mut Enemy, &Position)>(target) {
        Ok((enemy, pos)) if enemy.alive && enemy.hp <= 0.0 => {
            enemy.alive = false;
            (*pos, enemy.xp_value)
        }
        _ => return false,
    };

    ctx.kills += 1;
    ctx.despawn_buffer.push(target);

    let id = target.to_bits().get();
    debug!(id, kills = ctx.kills, "enemy killed");
    ctx.events.push(GameEvent::EnemyKilled { id, position });

    drop_loot(ctx, rng, tuning, position, xp_value);
    true
}

/// Loot roll: a health pickup with the configured chance, otherwise an XP
/// orb worth the enemy's xp value.
fn drop_loot<R: Rng + ?Sized>(
    ctx: &mut RunContext,
    rng: &mut R,
    tuning: &Tuning,
    position: Position,
    xp_value: f64,
) {
    let (kind, value) = if rng.gen_bool(tuning.health_drop_chance.clamp(0.0, 1.0)) {
        (PickupKind::Health, tuning.health_pickup_value)
    } else {
        (PickupKind::Xp, xp_value)
    };

    let pickup =
        world_setup::spawn_pickup(&mut ctx.world, kind, value, position, tuning.pickup_radius);
    ctx.events.push(GameEvent::PickupSpawned {
        id: pickup.to_bits().get(),
        kind,
        position,
    });
}

/// Hit-flash clear callback. Ignores enemies that have since died.
pub fn clear_hit_flash(ctx: &mut RunContext, target: Entity) {
    if let Ok(mut enemy) = ctx.world.get::<&mut Enemy>(target) {
        if enemy.alive {
            enemy.flashing = false;
            ctx.events.push(GameEvent::HitFlashCleared {
                id: target.to_bits().get(),
            });
        }
    }
}
