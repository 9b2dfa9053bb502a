//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`; nothing is global.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every level in the catalog was cleared
    Won,
    /// The player hit a spike
    Lost,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start, instructions shown
    Idle,
    /// Tick loop active
    Running,
    /// Run over, end-of-run message shown
    Ended(Outcome),
}

/// Things that happened during a tick, drained by the front end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A level was loaded (0-based index)
    LevelStarted { level: usize },
    Jumped,
    Landed,
    /// All spikes of a level scrolled past
    LevelCleared { level: usize },
    /// The player hit a spike
    Crashed { level: usize },
    /// The catalog is exhausted
    Won,
}

/// The player square
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Horizontal offset of the left edge
    pub x: f32,
    /// Vertical offset from the ground (negative is above it)
    pub y: f32,
    /// Vertical velocity (negative is upward)
    pub vel_y: f32,
    /// Set while in the air; blocks further jumps
    pub airborne: bool,
}

impl Player {
    /// Standing on the ground at the level start offset
    pub fn grounded(tuning: &Tuning) -> Self {
        Self {
            x: tuning.player_start_x,
            y: tuning.ground_y,
            vel_y: 0.0,
            airborne: false,
        }
    }

    /// Height above the ground (zero when standing)
    pub fn height(&self, tuning: &Tuning) -> f32 {
        tuning.ground_y - self.y
    }
}

/// A spike, positioned by its offset from the level start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub x: f32,
}

/// Complete run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current level index (0-based)
    pub level_index: usize,
    /// Score of the run so far
    pub score: u64,
    /// Horizontal translation of the level container (never increases)
    pub scroll_offset: f32,
    /// Pixels scrolled per tick on this level
    pub scroll_speed: f32,
    pub player: Player,
    /// Spikes of the active level, in scroll order
    pub hazards: Vec<Hazard>,
    pub phase: GamePhase,
    /// Simulation tick counter for this run
    pub time_ticks: u64,
    /// Events raised since the front end last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Idle state shown before the first run
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            level_index: 0,
            score: 0,
            scroll_offset: 0.0,
            scroll_speed: tuning.speed_for_level(0),
            player: Player::grounded(tuning),
            hazards: Vec::new(),
            phase: GamePhase::Idle,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Outcome of the run, once it has ended
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Horizontal distance covered on the current level
    pub fn distance(&self) -> f32 {
        -self.scroll_offset
    }
}
