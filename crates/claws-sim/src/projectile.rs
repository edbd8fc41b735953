//! Disc projectile data.
//!
//! Lives here rather than in `claws-core` because it holds a hecs handle.

use hecs::Entity;

use claws_core::enums::DiscTier;

/// A thrown disc homing on one enemy.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    /// Weak, generation-checked reference. The disc never owns its target;
    /// a despawned or dead target means the disc is lost.
    pub target: Entity,
    /// Pixels per second, fixed at throw time.
    pub speed: f64,
    pub tier: DiscTier,
}
