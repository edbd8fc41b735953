//! Cleanup system: removes queued entities and discs that left the world.

use claws_core::config::Tuning;
use claws_core::types::Position;

use crate::context::RunContext;
use crate::projectile::Projectile;

/// Margin beyond the world edge before a stray disc is dropped.
const OOB_MARGIN: f64 = 100.0;

pub fn run(ctx: &mut RunContext, tuning: &Tuning) {
    for (entity, (_disc, pos)) in ctx.world.query_mut::<(&Projectile, &Position)>() {
        let outside = pos.x < -OOB_MARGIN
            || pos.y < -OOB_MARGIN
            || pos.x > tuning.world_width + OOB_MARGIN
            || pos.y > tuning.world_height + OOB_MARGIN;
        if outside {
            ctx.despawn_buffer.push(entity);
        }
    }

    for entity in ctx.despawn_buffer.drain(..) {
        let _ = ctx.world.despawn(entity);
    }
}
