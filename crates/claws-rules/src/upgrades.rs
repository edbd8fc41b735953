//! Upgrade catalog and effects.
//!
//! Each option is a pure transform of player stats and enemy tunables.
//! Some effects taper with their own pick-count; the rest apply a fixed or
//! capped increment every time.

use std::collections::HashMap;

use claws_core::components::{EnemyTunables, PlayerStats};
use claws_core::constants::*;
use claws_core::enums::UpgradeKey;

/// Static description of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeOption {
    pub key: UpgradeKey,
    pub label: &'static str,
    pub description: &'static str,
}

const CATALOG: [UpgradeOption; 6] = [
    UpgradeOption {
        key: UpgradeKey::MoveSpeed,
        label: "Swift Feet",
        description: "Move faster",
    },
    UpgradeOption {
        key: UpgradeKey::Damage,
        label: "Sharper Edges",
        description: "Discs hit harder",
    },
    UpgradeOption {
        key: UpgradeKey::MaxHp,
        label: "Endurance",
        description: "+20 max HP and heal 20",
    },
    UpgradeOption {
        key: UpgradeKey::FireRate,
        label: "Quick Release",
        description: "Throw discs more often",
    },
    UpgradeOption {
        key: UpgradeKey::XpMultiplier,
        label: "Course Knowledge",
        description: "+15% XP gained",
    },
    UpgradeOption {
        key: UpgradeKey::MuddyFairway,
        label: "Muddy Fairway",
        description: "Crayfish move 10% slower",
    },
];

/// The full static catalog, in display order.
pub fn catalog() -> &'static [UpgradeOption] {
    &CATALOG
}

/// Catalog entry for a key.
pub fn option(key: UpgradeKey) -> &'static UpgradeOption {
    let index = match key {
        UpgradeKey::MoveSpeed => 0,
        UpgradeKey::Damage => 1,
        UpgradeKey::MaxHp => 2,
        UpgradeKey::FireRate => 3,
        UpgradeKey::XpMultiplier => 4,
        UpgradeKey::MuddyFairway => 5,
    };
    &CATALOG[index]
}

/// Apply one pick of `key`. `pick_count` is how many times the key was
/// chosen before this pick.
pub fn apply(
    key: UpgradeKey,
    stats: PlayerStats,
    tunables: EnemyTunables,
    pick_count: u32,
) -> (PlayerStats, EnemyTunables) {
    let mut stats = stats;
    let mut tunables = tunables;

    match key {
        UpgradeKey::MoveSpeed => {
            stats.move_speed += if pick_count < 4 { 20.0 } else { 8.0 };
        }
        UpgradeKey::Damage => {
            stats.damage += match pick_count {
                0..=2 => 5.0,
                3..=5 => 3.0,
                _ => 1.0,
            };
        }
        UpgradeKey::MaxHp => {
            stats.max_hp += 20.0;
            stats.hp = (stats.hp + 20.0).min(stats.max_hp);
        }
        UpgradeKey::FireRate => {
            if stats.fire_rate_ms > FIRE_RATE_FLOOR_MS {
                stats.fire_rate_ms = (stats.fire_rate_ms - 75.0).max(FIRE_RATE_FLOOR_MS);
            }
        }
        UpgradeKey::XpMultiplier => {
            if stats.xp_multiplier < XP_MULTIPLIER_CAP {
                stats.xp_multiplier = (stats.xp_multiplier + 0.15).min(XP_MULTIPLIER_CAP);
            }
        }
        UpgradeKey::MuddyFairway => {
            if tunables.speed_scale > ENEMY_SPEED_SCALE_FLOOR {
                tunables.speed_scale = (tunables.speed_scale * 0.9).max(ENEMY_SPEED_SCALE_FLOOR);
            }
        }
    }

    (stats, tunables)
}

/// Times each upgrade has been chosen this run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickCounts {
    counts: HashMap<UpgradeKey, u32>,
}

impl PickCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: UpgradeKey) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Count one more pick of `key`, returning the new total.
    pub fn record(&mut self, key: UpgradeKey) -> u32 {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }
}
