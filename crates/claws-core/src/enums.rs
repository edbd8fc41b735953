//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy stat/behavior profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyArchetype {
    /// Baseline crayfish: full difficulty-scaled hp, base speed.
    #[default]
    Walker,
    /// Fast, fragile crayfish: reduced hp, 1.5x speed.
    Sprinter,
}

/// Loot dropped on enemy death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupKind {
    /// Experience orb.
    Xp,
    /// Health pickup.
    Health,
}

/// Run lifecycle state. Exactly one holds while a run exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    /// Gameplay systems run; the run clock advances.
    #[default]
    Playing,
    /// An upgrade episode is open; simulation and timers are paused.
    SelectingUpgrade,
    /// Externally paused.
    Paused,
    /// Player died. Terminal until an explicit restart.
    Dead,
}

/// Permanent run upgrades offered on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKey {
    MoveSpeed,
    Damage,
    MaxHp,
    FireRate,
    XpMultiplier,
    MuddyFairway,
}

impl UpgradeKey {
    /// Every key in catalog order.
    pub const ALL: [UpgradeKey; 6] = [
        UpgradeKey::MoveSpeed,
        UpgradeKey::Damage,
        UpgradeKey::MaxHp,
        UpgradeKey::FireRate,
        UpgradeKey::XpMultiplier,
        UpgradeKey::MuddyFairway,
    ];
}

/// Disc equipment tier, evolving with player level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DiscTier {
    #[default]
    Putter,
    Midrange,
    FairwayDriver,
    DistanceDriver,
}

impl DiscTier {
    /// Every tier in unlock order.
    pub const ALL: [DiscTier; 4] = [
        DiscTier::Putter,
        DiscTier::Midrange,
        DiscTier::FairwayDriver,
        DiscTier::DistanceDriver,
    ];

    /// Position in the unlock table.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Health bar color band for the HUD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthBand {
    /// Above 60% hp.
    #[default]
    Healthy,
    /// Above 30% hp.
    Wounded,
    /// 30% hp or below.
    Critical,
}

impl HealthBand {
    /// Band for a hp fraction in `[0, 1]`.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction > 0.6 {
            HealthBand::Healthy
        } else if fraction > 0.3 {
            HealthBand::Wounded
        } else {
            HealthBand::Critical
        }
    }
}
