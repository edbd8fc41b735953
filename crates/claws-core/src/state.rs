//! Game state snapshot — the complete visible state handed to the
//! presentation layer after each tick.

use serde::{Deserialize, Serialize};

use crate::components::PlayerStats;
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    /// `None` while at the main menu.
    pub run_state: Option<RunState>,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
    /// Open upgrade episode, if any.
    pub offer: Option<OfferView>,
    pub hud: HudView,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub stats: PlayerStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub archetype: EnemyArchetype,
    pub position: Position,
    pub velocity: Velocity,
    pub hp: f64,
    pub max_hp: f64,
    pub flashing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub position: Position,
    pub target: u64,
    pub tier: DiscTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub id: u64,
    pub kind: PickupKind,
    pub position: Position,
    pub value: f64,
}

/// Upgrade choice menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferView {
    pub options: Vec<UpgradeOptionView>,
    /// Index of the highlighted option.
    pub cursor: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeOptionView {
    pub key: UpgradeKey,
    pub label: String,
    pub description: String,
    /// Times this key has been chosen this run.
    pub pick_count: u32,
}

/// Heads-up display values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub kills: u32,
    /// hp / max_hp clamped to `[0, 1]`; zero once dead.
    pub hp_fraction: f64,
    pub health_band: HealthBand,
    /// xp / xp_to_level clamped to `[0, 1]`.
    pub xp_fraction: f64,
    pub level: u32,
    /// Active run time as `m:ss`.
    pub timer: String,
}
