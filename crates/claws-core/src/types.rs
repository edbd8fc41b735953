//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in world space (pixels). Origin is the top-left corner,
/// y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in world space (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames stepped while a run was unpaused.
    pub tick: u64,
    /// Wall-equivalent milliseconds covered by those frames.
    pub elapsed_ms: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_vec().distance(other.as_vec())
    }

    /// Vector from this position to `other`.
    pub fn delta_to(&self, other: &Position) -> DVec2 {
        other.as_vec() - self.as_vec()
    }

    /// Clamp into the rectangle `[0, width] x [0, height]`.
    pub fn clamped(&self, width: f64, height: f64) -> Self {
        Self {
            x: self.x.clamp(0.0, width),
            y: self.y.clamp(0.0, height),
        }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Speed magnitude (pixels per second).
    pub fn speed(&self) -> f64 {
        self.as_vec().length()
    }
}

impl SimTime {
    /// Advance by one frame of `frame_ms` milliseconds.
    pub fn advance(&mut self, frame_ms: f64) {
        self.tick += 1;
        self.elapsed_ms += frame_ms;
    }
}
