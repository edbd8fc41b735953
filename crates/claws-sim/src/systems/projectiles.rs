//! Projectile advance — retargets every disc, resolves impacts, and
//! destroys discs whose target is gone.

use hecs::Entity;
use rand::Rng;
use tracing::trace;

use claws_core::components::Enemy;
use claws_core::config::Tuning;
use claws_core::types::{Position, Velocity};

use crate::context::RunContext;
use crate::projectile::Projectile;
use crate::systems::combat;

/// What happened to one disc this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscOutcome {
    /// Target despawned or already dead; disc destroyed, no damage.
    TargetLost,
    /// Disc connected and was destroyed.
    Impact,
    /// Disc still in flight, velocity updated.
    Steering,
}

/// Advance every live disc once.
pub fn run<R: Rng + ?Sized>(ctx: &mut RunContext, rng: &mut R, tuning: &Tuning) {
    let discs: Vec<(Entity, Position, Projectile)> = ctx
        .world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(entity, (projectile, pos))| (entity, *pos, *projectile))
        .collect();

    for (disc, position, projectile) in discs {
        let outcome = advance(ctx, rng, tuning, disc, position, &projectile);
        trace!(id = disc.to_bits().get(), ?outcome, "disc advanced");
    }

    // Dead enemies and spent discs leave the world together, after every
    // disc has observed this frame's deaths.
    for entity in ctx.despawn_buffer.drain(..) {
        let _ = ctx.world.despawn(entity);
    }
}

fn advance<R: Rng + ?Sized>(
    ctx: &mut RunContext,
    rng: &mut R,
    tuning: &Tuning,
    disc: Entity,
    position: Position,
    projectile: &Projectile,
) -> DiscOutcome {
    let target_pos = {
        let Ok((enemy, pos)) = ctx
            .world
            .query_one_mut::<(&Enemy, &Position)>(projectile.target)
        else {
            ctx.despawn_buffer.push(disc);
            return DiscOutcome::TargetLost;
        };
        if !enemy.alive {
            ctx.despawn_buffer.push(disc);
            return DiscOutcome::TargetLost;
        }
        *pos
    };

    let to_target = position.delta_to(&target_pos);
    let distance = to_target.length();

    if distance < tuning.impact_threshold {
        // Damage is read from live stats, not snapshotted at throw time.
        let damage = ctx.stats.damage;
        combat::apply_hit(ctx, rng, tuning, projectile.target, damage);
        ctx.despawn_buffer.push(disc);
        return DiscOutcome::Impact;
    }

    let velocity = Velocity::from_vec(to_target / distance * projectile.speed);
    if let Ok(mut vel) = ctx.world.get::<&mut Velocity>(disc) {
        *vel = velocity;
    }
    DiscOutcome::Steering
}
