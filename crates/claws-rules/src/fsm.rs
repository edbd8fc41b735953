//! Run lifecycle state machine.
//!
//! Decides, once per frame, which systems are admissible. Invalid inputs
//! for the current state are no-ops, never errors.

use claws_core::enums::RunState;

/// Something that may move the run to a different state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunInput {
    /// A level-up opened an upgrade episode.
    UpgradeOffered,
    /// The player confirmed a choice, closing the episode.
    UpgradeConfirmed,
    /// Player hp reached 0.
    PlayerDied,
    /// External pause request.
    Pause,
    /// External resume request.
    Resume,
    /// External restart request.
    Restart,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStateMachine {
    state: RunState,
    /// State to return to when leaving `Paused`.
    resume_to: Option<RunState>,
}

impl RunStateMachine {
    /// A fresh run starts in `Playing`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Feed one input. Returns the new state if a transition happened.
    pub fn handle(&mut self, input: RunInput) -> Option<RunState> {
        let next = match (self.state, input) {
            (RunState::Playing, RunInput::UpgradeOffered) => RunState::SelectingUpgrade,
            (RunState::SelectingUpgrade, RunInput::UpgradeConfirmed) => RunState::Playing,
            (RunState::Playing, RunInput::PlayerDied) => RunState::Dead,
            (RunState::Playing | RunState::SelectingUpgrade, RunInput::Pause) => {
                self.resume_to = Some(self.state);
                RunState::Paused
            }
            (RunState::Paused, RunInput::Resume) => {
                self.resume_to.take().unwrap_or(RunState::Playing)
            }
            (RunState::Dead, RunInput::Restart) => {
                self.resume_to = None;
                RunState::Playing
            }
            _ => return None,
        };
        self.state = next;
        Some(next)
    }

    /// Movement, combat, spawning and firing run only while `Playing`.
    pub fn simulation_runs(&self) -> bool {
        self.state == RunState::Playing
    }

    /// Scene-time effects (hit-flash clears) keep running unless paused.
    pub fn scene_clock_runs(&self) -> bool {
        self.state != RunState::Paused
    }

    pub fn is_dead(&self) -> bool {
        self.state == RunState::Dead
    }
}
