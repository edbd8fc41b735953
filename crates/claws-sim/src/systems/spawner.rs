//! Spawn scheduling — one enemy per spawn tick, scaled by difficulty.

use hecs::Entity;
use rand::Rng;
use tracing::debug;

use claws_core::config::Tuning;
use claws_core::events::GameEvent;
use claws_rules::difficulty;

use crate::context::RunContext;
use crate::timers::TimerEvent;
use crate::world_setup;

/// Arm the next spawn with an interval computed from the current run time.
pub fn arm_spawn_timer(ctx: &mut RunContext, tuning: &Tuning) {
    if let Some(old) = ctx.spawn_timer.take() {
        ctx.scheduler.cancel(old);
    }
    if ctx.fsm.is_dead() {
        return;
    }
    let interval = difficulty::spawn_interval_ms(
        ctx.clock.elapsed_minutes(),
        tuning.spawn_base_delay_ms,
        tuning.spawn_floor_delay_ms,
    );
    let handle = ctx.scheduler.schedule_once(interval, TimerEvent::SpawnEnemy);
    if !ctx.fsm.simulation_runs() {
        ctx.scheduler.pause(handle);
    }
    ctx.spawn_timer = Some(handle);
}

/// Spawn-timer callback: create one enemy, then re-arm.
pub fn on_spawn_timer<R: Rng + ?Sized>(ctx: &mut RunContext, rng: &mut R, tuning: &Tuning) {
    if ctx.fsm.is_dead() {
        return;
    }
    spawn_enemy(ctx, rng, tuning);
    arm_spawn_timer(ctx, tuning);
}

/// Create one enemy at a random world-edge position.
pub fn spawn_enemy<R: Rng + ?Sized>(ctx: &mut RunContext, rng: &mut R, tuning: &Tuning) -> Entity {
    let archetype = difficulty::roll_archetype(rng, tuning.sprinter_chance);
    let position = difficulty::edge_spawn_position(rng, tuning.world_width, tuning.world_height);
    let stats = difficulty::scale_enemy(archetype, ctx.clock.difficulty_multiplier(), tuning);
    let order = ctx.next_spawn_order();

    let entity =
        world_setup::spawn_enemy(&mut ctx.world, &stats, position, order, tuning.enemy_radius);

    let id = entity.to_bits().get();
    debug!(id, ?archetype, hp = stats.max_hp, speed = stats.effective_speed, "enemy spawned");
    ctx.events.push(GameEvent::EnemySpawned {
        id,
        archetype,
        position,
    });
    entity
}
