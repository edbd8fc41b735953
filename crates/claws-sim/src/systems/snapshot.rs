//! Snapshot system: reads the run and builds a complete GameStateSnapshot.
//!
//! This system is read-only — it never modifies the world.

use hecs::World;

use claws_core::components::*;
use claws_core::enums::HealthBand;
use claws_core::events::GameEvent;
use claws_core::state::*;
use claws_core::types::{Position, SimTime, Velocity};
use claws_rules::upgrades;

use crate::context::RunContext;
use crate::projectile::Projectile;

/// Build a snapshot for the current tick. `run` is `None` at the main menu.
pub fn build_snapshot(
    time: &SimTime,
    run: Option<&RunContext>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let Some(ctx) = run else {
        return GameStateSnapshot {
            time: *time,
            events,
            ..Default::default()
        };
    };

    GameStateSnapshot {
        time: *time,
        run_state: Some(ctx.state()),
        player: Some(PlayerView {
            position: ctx.player_position(),
            stats: ctx.stats,
        }),
        enemies: build_enemies(&ctx.world),
        projectiles: build_projectiles(&ctx.world),
        pickups: build_pickups(&ctx.world),
        offer: build_offer(ctx),
        hud: build_hud(ctx),
        events,
    }
}

/// Living enemies in spawn order.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<(SpawnOrder, EnemyView)> = world
        .query::<(&Enemy, &Position, &Velocity, &SpawnOrder)>()
        .iter()
        .filter(|(_, (enemy, _, _, _))| enemy.alive)
        .map(|(entity, (enemy, pos, vel, order))| {
            (
                *order,
                EnemyView {
                    id: entity.to_bits().get(),
                    archetype: enemy.archetype,
                    position: *pos,
                    velocity: *vel,
                    hp: enemy.hp,
                    max_hp: enemy.max_hp,
                    flashing: enemy.flashing,
                },
            )
        })
        .collect();
    enemies.sort_by_key(|(order, _)| *order);
    enemies.into_iter().map(|(_, view)| view).collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut discs: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(entity, (disc, pos))| ProjectileView {
            id: entity.to_bits().get(),
            position: *pos,
            target: disc.target.to_bits().get(),
            tier: disc.tier,
        })
        .collect();
    discs.sort_by_key(|d| d.id);
    discs
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<PickupView> = world
        .query::<(&Pickup, &Position)>()
        .iter()
        .map(|(entity, (pickup, pos))| PickupView {
            id: entity.to_bits().get(),
            kind: pickup.kind,
            position: *pos,
            value: pickup.value,
        })
        .collect();
    pickups.sort_by_key(|p| p.id);
    pickups
}

fn build_offer(ctx: &RunContext) -> Option<OfferView> {
    let offer = ctx.offer.as_ref()?;
    let options = offer
        .options()
        .iter()
        .map(|&key| {
            let option = upgrades::option(key);
            UpgradeOptionView {
                key,
                label: option.label.to_string(),
                description: option.description.to_string(),
                pick_count: ctx.picks.get(key),
            }
        })
        .collect();
    Some(OfferView {
        options,
        cursor: offer.cursor(),
    })
}

fn build_hud(ctx: &RunContext) -> HudView {
    let stats = &ctx.stats;
    let hp_fraction = if ctx.fsm.is_dead() || stats.max_hp <= 0.0 {
        0.0
    } else {
        (stats.hp / stats.max_hp).clamp(0.0, 1.0)
    };
    let xp_fraction = if stats.xp_to_level > 0.0 {
        (stats.xp / stats.xp_to_level).clamp(0.0, 1.0)
    } else {
        0.0
    };

    HudView {
        kills: ctx.kills,
        hp_fraction,
        health_band: HealthBand::from_fraction(hp_fraction),
        xp_fraction,
        level: stats.level,
        timer: ctx.clock.display(),
    }
}
