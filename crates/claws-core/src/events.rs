//! Events emitted by the simulation for the presentation layer.
//!
//! The core never reads these back. They describe sprite creation and
//! destruction, tints, camera shake, and audio cues.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// One presentation side effect produced during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new run began (fresh start or restart).
    RunStarted,
    EnemySpawned {
        id: u64,
        archetype: EnemyArchetype,
        position: Position,
    },
    /// A disc left the player toward `target`.
    DiscThrown { id: u64, target: u64, tier: DiscTier },
    /// Tint an enemy after a hit.
    HitFlash { id: u64 },
    /// Clear the hit tint.
    HitFlashCleared { id: u64 },
    EnemyKilled { id: u64, position: Position },
    PickupSpawned {
        id: u64,
        kind: PickupKind,
        position: Position,
    },
    PickupCollected { id: u64, kind: PickupKind, value: f64 },
    /// Player took contact damage; shake the camera.
    PlayerHurt {
        damage: f64,
        shake_ms: f64,
        shake_intensity: f64,
    },
    LevelUp { level: u32 },
    UpgradeOffered { options: Vec<UpgradeKey> },
    UpgradeChosen { key: UpgradeKey, pick_count: u32 },
    DiscEvolved { tier: DiscTier },
    PlayerDied { kills: u32 },
}
