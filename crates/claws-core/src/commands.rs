//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.
//! Discrete actions (menu navigation, confirm, pause) are edge-triggered:
//! one command per key press. Movement is level-triggered: the latest
//! `SetMovement` holds until replaced.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Run lifecycle ---
    /// Start a new run from the main menu.
    StartRun,
    /// Discard the dead run and start a fresh one.
    Restart,
    /// Leave a paused or finished run for the main menu.
    ExitToMenu,

    // --- Movement ---
    /// Held movement axes, each in {-1, 0, 1}. y = -1 is up.
    SetMovement { x: i8, y: i8 },

    // --- Upgrade menu ---
    /// Move the selection cursor up (wraps).
    MenuUp,
    /// Move the selection cursor down (wraps).
    MenuDown,
    /// Apply the selected upgrade. Also resumes from pause.
    Confirm,

    // --- Pause ---
    /// Pause if running, resume if paused.
    TogglePause,
    /// Pause the run.
    Pause,
    /// Resume a paused run.
    Resume,
}
