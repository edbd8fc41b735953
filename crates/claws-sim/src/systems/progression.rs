//! Level-ups and upgrade episodes.
//!
//! Each level gained opens one episode. The next level-up is evaluated
//! only after the player confirms a choice, so several levels from one
//! large XP gain resolve one at a time.

use rand::Rng;
use tracing::{debug, info};

use claws_core::config::Tuning;
use claws_core::enums::RunState;
use claws_core::events::GameEvent;
use claws_rules::fsm::RunInput;
use claws_rules::leveling;
use claws_rules::offer::UpgradeOffer;
use claws_rules::upgrades;

use crate::context::RunContext;

/// Run one iteration of the level-up loop if the threshold is met and no
/// episode is open. Returns whether an episode was opened.
pub fn check_level_up<R: Rng + ?Sized>(ctx: &mut RunContext, rng: &mut R, tuning: &Tuning) -> bool {
    if ctx.offer.is_some() || ctx.state() != RunState::Playing {
        return false;
    }

    let Some(gain) = leveling::level_up_once(
        &mut ctx.stats,
        tuning.base_xp_to_level,
        ctx.clock.elapsed_minutes(),
    ) else {
        return false;
    };

    info!(
        level = gain.level,
        xp = ctx.stats.xp,
        xp_to_level = ctx.stats.xp_to_level,
        "level gained"
    );
    ctx.events.push(GameEvent::LevelUp { level: gain.level });

    if let Some(tier) = gain.evolved_to {
        info!(?tier, "disc evolved");
        ctx.events.push(GameEvent::DiscEvolved { tier });
    }

    open_episode(ctx, rng);
    true
}

fn open_episode<R: Rng + ?Sized>(ctx: &mut RunContext, rng: &mut R) {
    let offer = UpgradeOffer::sample(upgrades::catalog(), rng);
    ctx.events.push(GameEvent::UpgradeOffered {
        options: offer.options().to_vec(),
    });
    ctx.fsm.handle(RunInput::UpgradeOffered);
    ctx.pause_gameplay_timers();
    ctx.offer = Some(offer);
}

pub fn cursor_up(ctx: &mut RunContext) {
    if let Some(offer) = ctx.offer.as_mut() {
        offer.move_up();
    }
}

pub fn cursor_down(ctx: &mut RunContext) {
    if let Some(offer) = ctx.offer.as_mut() {
        offer.move_down();
    }
}

/// Apply the highlighted upgrade, close the episode, and evaluate the next
/// level-up. Returns false if there was nothing to confirm.
pub fn confirm<R: Rng + ?Sized>(ctx: &mut RunContext, rng: &mut R, tuning: &Tuning) -> bool {
    if ctx.state() != RunState::SelectingUpgrade {
        debug!(state = ?ctx.state(), "confirm ignored");
        return false;
    }
    let Some(key) = ctx.offer.as_ref().and_then(UpgradeOffer::selected) else {
        return false;
    };

    let count = ctx.picks.get(key);
    let fire_rate_before = ctx.stats.fire_rate_ms;
    let (stats, tunables) = upgrades::apply(key, ctx.stats, ctx.enemy_tunables, count);
    ctx.stats = stats;
    ctx.enemy_tunables = tunables;
    let pick_count = ctx.picks.record(key);

    if ctx.stats.fire_rate_ms != fire_rate_before {
        ctx.reschedule_fire_timer();
    }

    info!(?key, pick_count, "upgrade chosen");
    ctx.events.push(GameEvent::UpgradeChosen { key, pick_count });

    ctx.offer = None;
    ctx.fsm.handle(RunInput::UpgradeConfirmed);
    ctx.resume_gameplay_timers();

    check_level_up(ctx, rng, tuning);
    true
}
