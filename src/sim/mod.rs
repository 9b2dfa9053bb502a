//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Spikes iterated in scroll order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod loader;
pub mod physics;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Verdict, crashes};
pub use geometry::{Aabb, Layout, SceneGeometry};
pub use loader::{LevelLoad, load_level};
pub use state::{GameEvent, GamePhase, GameState, Hazard, Outcome, Player};
pub use tick::{TickInput, score_for, tick};
