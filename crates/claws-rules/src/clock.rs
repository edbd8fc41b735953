//! Active run time and the difficulty scalar derived from it.

use claws_core::constants::{DIFFICULTY_PER_MINUTE, MS_PER_MINUTE};
use claws_core::enums::RunState;

/// Accumulated active run time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunClock {
    elapsed_ms: f64,
}

impl RunClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `delta_ms`, but only while the run is `Playing`.
    pub fn advance(&mut self, delta_ms: f64, state: RunState) {
        if state == RunState::Playing && delta_ms > 0.0 {
            self.elapsed_ms += delta_ms;
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn elapsed_minutes(&self) -> f64 {
        self.elapsed_ms / MS_PER_MINUTE
    }

    /// `1 + minutes * 0.12`. Continuous, strictly increasing, uncapped.
    pub fn difficulty_multiplier(&self) -> f64 {
        1.0 + self.elapsed_minutes() * DIFFICULTY_PER_MINUTE
    }

    /// Elapsed time formatted as `m:ss` for the HUD.
    pub fn display(&self) -> String {
        let total_secs = (self.elapsed_ms / 1000.0).floor() as u64;
        format!("{}:{:02}", total_secs / 60, total_secs % 60)
    }
}
