//! Player contact damage and death.

use tracing::info;

use claws_core::components::Enemy;
use claws_core::config::Tuning;
use claws_core::constants::{HURT_SHAKE_INTENSITY, HURT_SHAKE_MS};
use claws_core::events::GameEvent;
use claws_core::types::Position;
use claws_rules::fsm::RunInput;
use claws_rules::vitals;

use crate::context::RunContext;
use crate::systems::movement;

/// Gate for contact damage: at most one hit per cooldown window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactCooldown {
    last_hit_ms: Option<f64>,
}

impl ContactCooldown {
    /// Record a hit at `now_ms` unless one landed less than `cooldown_ms`
    /// ago. Returns whether the hit counts.
    pub fn try_hit(&mut self, now_ms: f64, cooldown_ms: f64) -> bool {
        match self.last_hit_ms {
            Some(last) if now_ms - last < cooldown_ms => false,
            _ => {
                self.last_hit_ms = Some(now_ms);
                true
            }
        }
    }
}

/// Check player/enemy overlaps and apply contact damage.
pub fn run(ctx: &mut RunContext, tuning: &Tuning) {
    if !ctx.fsm.simulation_runs() {
        return;
    }

    let player_pos = ctx.player_position();
    let reach = tuning.player_radius + tuning.enemy_radius;
    let overlaps = ctx
        .world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (enemy, pos))| enemy.alive && player_pos.distance_to(pos) < reach)
        .count();

    let now_ms = ctx.clock.elapsed_ms();
    for _ in 0..overlaps {
        apply_contact_damage(ctx, tuning, now_ms);
    }
}

/// One overlap callback at run time `now_ms`. Returns whether damage was
/// applied.
pub fn apply_contact_damage(ctx: &mut RunContext, tuning: &Tuning, now_ms: f64) -> bool {
    if ctx.fsm.is_dead() {
        return false;
    }
    if !ctx.contact.try_hit(now_ms, tuning.contact_cooldown_ms) {
        return false;
    }

    let lethal = vitals::damage_player(&mut ctx.stats, tuning.contact_damage);
    ctx.events.push(GameEvent::PlayerHurt {
        damage: tuning.contact_damage,
        shake_ms: HURT_SHAKE_MS,
        shake_intensity: HURT_SHAKE_INTENSITY,
    });

    if lethal {
        kill_player(ctx);
    }
    true
}

/// Enter `Dead`: cancel spawning and firing for good and freeze enemies.
pub fn kill_player(ctx: &mut RunContext) {
    if ctx.fsm.handle(RunInput::PlayerDied).is_none() {
        return;
    }
    ctx.cancel_gameplay_timers();
    ctx.offer = None;
    movement::halt_enemies(ctx);
    info!(
        kills = ctx.kills,
        level = ctx.stats.level,
        elapsed = %ctx.clock.display(),
        "player died"
    );
    ctx.events.push(GameEvent::PlayerDied { kills: ctx.kills });
}
