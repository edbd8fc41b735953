//! Hit point bookkeeping. Every mutation clamps into `[0, max_hp]`.

use claws_core::components::{Enemy, PlayerStats};

/// Subtract `amount` from player hp. Returns true if the player is now at 0.
pub fn damage_player(stats: &mut PlayerStats, amount: f64) -> bool {
    stats.hp = (stats.hp - amount.max(0.0)).clamp(0.0, stats.max_hp);
    stats.hp <= 0.0
}

/// Restore up to `amount` hp, never past max.
pub fn heal_player(stats: &mut PlayerStats, amount: f64) {
    stats.hp = (stats.hp + amount.max(0.0)).clamp(0.0, stats.max_hp);
}

/// Subtract `amount` from enemy hp. Returns true if the hit left it at 0.
pub fn damage_enemy(enemy: &mut Enemy, amount: f64) -> bool {
    enemy.hp = (enemy.hp - amount.max(0.0)).clamp(0.0, enemy.max_hp);
    enemy.hp <= 0.0
}
