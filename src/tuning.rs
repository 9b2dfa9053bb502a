//! Data-driven game balance
//!
//! Every number that shapes how the game plays lives here so a run can be
//! replayed or rebalanced from a JSON file without touching the simulation.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rejected tuning values
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// A field failed validation
    Invalid { field: &'static str, reason: &'static str },
    /// The JSON could not be parsed
    Parse(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
            TuningError::Parse(msg) => write!(f, "unreadable tuning: {msg}"),
        }
    }
}

impl std::error::Error for TuningError {}

/// Balance constants for physics, scrolling and pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to vertical velocity each tick
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is upward)
    pub jump_velocity: f32,
    /// Vertical offset of the ground
    pub ground_y: f32,
    /// Scroll speed of level index 0
    pub base_speed: f32,
    /// Scroll speed added per level index
    pub speed_step: f32,
    /// Scroll distance required before a level may complete
    pub completion_distance: f32,
    /// Horizontal offset the player is reset to on every level load
    pub player_start_x: f32,
    /// Simulation ticks per second
    pub tick_hz: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            ground_y: GROUND_Y,
            base_speed: LEVEL_SPEED_BASE,
            speed_step: LEVEL_SPEED_STEP,
            completion_distance: COMPLETION_DISTANCE,
            player_start_x: PLAYER_START_X,
            tick_hz: TICK_HZ,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.gravity > 0.0) {
            return invalid("gravity", "must be positive");
        }
        if !(self.jump_velocity < 0.0) {
            return invalid("jump_velocity", "must be negative (upward)");
        }
        // Scroll offset must keep decreasing on every level
        if !(self.base_speed > 0.0) {
            return invalid("base_speed", "must be positive");
        }
        if !(self.speed_step >= 0.0) {
            return invalid("speed_step", "must not be negative");
        }
        if !(self.completion_distance >= 0.0) {
            return invalid("completion_distance", "must not be negative");
        }
        if !self.ground_y.is_finite() || !self.player_start_x.is_finite() {
            return invalid("ground_y", "positions must be finite");
        }
        if self.tick_hz == 0 {
            return invalid("tick_hz", "must be at least 1");
        }
        Ok(())
    }

    /// Scroll speed for a level: linear difficulty scaling
    pub fn speed_for_level(&self, level_index: usize) -> f32 {
        self.base_speed + level_index as f32 * self.speed_step
    }

    /// Length of one simulation tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_hz as f64)
    }
}
