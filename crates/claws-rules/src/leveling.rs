//! Experience, the level curve, and disc-tier unlocks.

use claws_core::components::PlayerStats;
use claws_core::config::Tuning;
use claws_core::constants::{PROJECTILE_SPEED, XP_CURVE_PER_MINUTE};
use claws_core::enums::DiscTier;

/// Per-tier disc parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscProfile {
    pub tier: DiscTier,
    /// Lowest player level that equips this tier.
    pub unlock_level: u32,
    /// Projectile speed (pixels per second), fixed at throw time.
    pub speed: f64,
}

const DISC_TIERS: [DiscProfile; 4] = [
    DiscProfile {
        tier: DiscTier::Putter,
        unlock_level: 1,
        speed: PROJECTILE_SPEED,
    },
    DiscProfile {
        tier: DiscTier::Midrange,
        unlock_level: 3,
        speed: 450.0,
    },
    DiscProfile {
        tier: DiscTier::FairwayDriver,
        unlock_level: 5,
        speed: 500.0,
    },
    DiscProfile {
        tier: DiscTier::DistanceDriver,
        unlock_level: 8,
        speed: 560.0,
    },
];

pub fn disc_profile(tier: DiscTier) -> &'static DiscProfile {
    &DISC_TIERS[tier.index()]
}

/// Highest tier whose unlock level is at most `level`.
pub fn tier_for_level(level: u32) -> DiscTier {
    DISC_TIERS
        .iter()
        .rev()
        .find(|p| p.unlock_level <= level)
        .map(|p| p.tier)
        .unwrap_or_default()
}

/// Level threshold at the given run time: `floor(base * (1 + minutes * 0.33))`.
pub fn xp_to_level(base: f64, elapsed_minutes: f64) -> f64 {
    (base * (1.0 + elapsed_minutes * XP_CURVE_PER_MINUTE))
        .floor()
        .max(1.0)
}

/// Fresh level-1 stats.
pub fn starting_stats(tuning: &Tuning) -> PlayerStats {
    PlayerStats {
        move_speed: tuning.player_move_speed,
        max_hp: tuning.player_max_hp,
        hp: tuning.player_max_hp,
        damage: tuning.player_damage,
        fire_rate_ms: tuning.player_fire_rate_ms,
        xp_multiplier: tuning.player_xp_multiplier,
        level: 1,
        xp: 0.0,
        xp_to_level: xp_to_level(tuning.base_xp_to_level, 0.0),
        disc_tier: tier_for_level(1),
    }
}

/// Credit an XP orb, scaled by the player's multiplier. Returns the amount
/// gained.
pub fn collect_xp(stats: &mut PlayerStats, orb_value: f64) -> f64 {
    let gained = orb_value.max(0.0) * stats.xp_multiplier;
    stats.xp += gained;
    gained
}

/// Outcome of one pass of the level-up loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelGain {
    pub level: u32,
    /// Set when the equipped disc changed.
    pub evolved_to: Option<DiscTier>,
}

/// Run a single iteration of the level-up loop, if the threshold is met.
///
/// Callers open one upgrade episode per `Some` and must resolve it before
/// calling again; the next threshold uses the run time at that point.
pub fn level_up_once(
    stats: &mut PlayerStats,
    base_xp_to_level: f64,
    elapsed_minutes: f64,
) -> Option<LevelGain> {
    if stats.xp < stats.xp_to_level {
        return None;
    }

    stats.xp -= stats.xp_to_level;
    stats.level += 1;

    let tier = tier_for_level(stats.level);
    let evolved_to = (tier != stats.disc_tier).then_some(tier);
    stats.disc_tier = tier;

    stats.xp_to_level = xp_to_level(base_xp_to_level, elapsed_minutes);

    Some(LevelGain {
        level: stats.level,
        evolved_to,
    })
}
