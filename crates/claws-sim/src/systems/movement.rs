//! Kinematic integration.
//!
//! Player velocity follows held axes; enemies chase the player; discs keep
//! the velocity the projectile system gave them last frame. Position
//! advances by `velocity * dt`.

use glam::DVec2;
use hecs::Entity;

use claws_core::components::Enemy;
use claws_core::config::Tuning;
use claws_core::types::{Position, Velocity};
use claws_rules::difficulty::motion_speed;

use crate::context::RunContext;
use crate::projectile::Projectile;

/// Move the player along held axes, clamped to world bounds. Axes are not
/// normalized, so diagonals are faster.
pub fn move_player(ctx: &mut RunContext, tuning: &Tuning, dt_secs: f64) {
    let speed = ctx.stats.move_speed;
    let axes = DVec2::new(
        ctx.movement.x.clamp(-1, 1) as f64,
        ctx.movement.y.clamp(-1, 1) as f64,
    );
    if let Ok((pos, vel)) = ctx
        .world
        .query_one_mut::<(&mut Position, &mut Velocity)>(ctx.player)
    {
        *vel = Velocity::from_vec(axes * speed);
        *pos = Position::from_vec(pos.as_vec() + vel.as_vec() * dt_secs)
            .clamped(tuning.world_width, tuning.world_height);
    }
}

/// Steer every living enemy straight at the player and move it.
pub fn move_enemies(ctx: &mut RunContext, dt_secs: f64) {
    let target = ctx.player_position();
    let speed_scale = ctx.enemy_tunables.speed_scale;

    for (_entity, (enemy, pos, vel)) in
        ctx.world
            .query_mut::<(&Enemy, &mut Position, &mut Velocity)>()
    {
        if !enemy.alive {
            *vel = Velocity::zero();
            continue;
        }
        let to_player = pos.delta_to(&target);
        let dir = to_player.normalize_or_zero();
        let speed = motion_speed(enemy.effective_speed, enemy.base_speed, speed_scale);
        // Do not step past the player.
        let step = (speed * dt_secs).min(to_player.length());
        *vel = Velocity::from_vec(dir * speed);
        *pos = Position::from_vec(pos.as_vec() + dir * step);
    }
}

/// Integrate disc positions. A disc never steps past its target, so a
/// long frame lands it on the target instead of overshooting.
pub fn move_projectiles(ctx: &mut RunContext, dt_secs: f64) {
    let aims: Vec<(Entity, Option<Position>)> = ctx
        .world
        .query::<&Projectile>()
        .iter()
        .map(|(disc, projectile)| {
            let target = ctx.world.get::<&Position>(projectile.target).ok().map(|p| *p);
            (disc, target)
        })
        .collect();

    for (disc, target) in aims {
        let Ok((pos, vel)) = ctx
            .world
            .query_one_mut::<(&mut Position, &Velocity)>(disc)
        else {
            continue;
        };
        let step = vel.as_vec() * dt_secs;
        *pos = match target {
            Some(target) if step.length() >= pos.distance_to(&target) => target,
            _ => Position::from_vec(pos.as_vec() + step),
        };
    }
}

/// Stop every enemy where it stands.
pub fn halt_enemies(ctx: &mut RunContext) {
    for (_entity, (_enemy, vel)) in ctx.world.query_mut::<(&Enemy, &mut Velocity)>() {
        *vel = Velocity::zero();
    }
}
