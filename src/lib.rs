//! Geometry Jumper - a side-scrolling spike-jumping game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, scrolling, collisions, game state)
//! - `session`: Run lifecycle, scoring and high score bookkeeping
//! - `clock`: Injectable time source and fixed-step scheduler
//! - `renderer`: WebGPU rendering pipeline
//! - `persistence`: Key-value scalar stores (LocalStorage, JSON file, memory)
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod clock;
pub mod highscores;
pub mod levels;
pub mod persistence;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScore;
pub use levels::{Level, LevelCatalog};
pub use session::{RunReport, Session};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (60 Hz, one tick per browser frame)
    pub const TICK_HZ: u32 = 60;
    /// Maximum substeps per pump to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport dimensions (level space, y grows downward)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 400.0;
    /// Viewport y of the ground line
    pub const GROUND_LINE: f32 = 340.0;

    /// Player square edge length
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Player left edge, fixed for the whole level
    pub const PLAYER_START_X: f32 = 100.0;

    /// Vertical offset of the ground (negative offsets are above it)
    pub const GROUND_Y: f32 = 0.0;
    /// Upward impulse applied on jump (pixels/tick)
    pub const JUMP_VELOCITY: f32 = -15.0;
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 1.0;

    /// Scroll speed of the first level (pixels/tick)
    pub const LEVEL_SPEED_BASE: f32 = 4.0;
    /// Extra scroll speed per level index
    pub const LEVEL_SPEED_STEP: f32 = 0.5;
    /// Scroll distance that must be covered before a level can complete
    pub const COMPLETION_DISTANCE: f32 = 3000.0;

    /// Spike bounding box
    pub const SPIKE_WIDTH: f32 = 30.0;
    pub const SPIKE_HEIGHT: f32 = 30.0;

    /// Score awarded per completed level index
    pub const POINTS_PER_LEVEL: u64 = 1000;
    /// Pixels scrolled per distance point
    pub const DISTANCE_PER_POINT: f32 = 10.0;
}
