//! Pickup collection — XP orbs and health pickups under the player.

use hecs::Entity;
use rand::Rng;
use tracing::debug;

use claws_core::components::Pickup;
use claws_core::config::Tuning;
use claws_core::enums::PickupKind;
use claws_core::events::GameEvent;
use claws_core::types::Position;
use claws_rules::{leveling, vitals};

use crate::context::RunContext;
use crate::systems::progression;

/// Collect every pickup the player overlaps, then run the level-up loop.
pub fn run<R: Rng + ?Sized>(ctx: &mut RunContext, rng: &mut R, tuning: &Tuning) {
    if !ctx.fsm.simulation_runs() {
        return;
    }

    let player_pos = ctx.player_position();
    let reach = tuning.player_radius + tuning.pickup_radius;
    let touched: Vec<(Entity, Pickup)> = ctx
        .world
        .query::<(&Pickup, &Position)>()
        .iter()
        .filter(|(_, (_, pos))| player_pos.distance_to(pos) < reach)
        .map(|(entity, (pickup, _))| (entity, *pickup))
        .collect();

    for (entity, pickup) in touched {
        collect(ctx, entity, pickup);
    }

    progression::check_level_up(ctx, rng, tuning);
}

/// Apply one pickup and remove it from the world.
pub fn collect(ctx: &mut RunContext, entity: Entity, pickup: Pickup) {
    let value = match pickup.kind {
        PickupKind::Xp => leveling::collect_xp(&mut ctx.stats, pickup.value),
        PickupKind::Health => {
            let before = ctx.stats.hp;
            vitals::heal_player(&mut ctx.stats, pickup.value);
            ctx.stats.hp - before
        }
    };

    let _ = ctx.world.despawn(entity);

    let id = entity.to_bits().get();
    debug!(id, kind = ?pickup.kind, value, "pickup collected");
    ctx.events.push(GameEvent::PickupCollected {
        id,
        kind: pickup.kind,
        value,
    });
}
