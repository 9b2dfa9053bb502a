//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision;
use super::geometry::SceneGeometry;
use super::loader::{LevelLoad, load_level};
use super::physics;
use super::state::{GameEvent, GamePhase, GameState, Outcome};
use crate::consts::{DISTANCE_PER_POINT, POINTS_PER_LEVEL};
use crate::levels::LevelCatalog;
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/click/tap), consumed by the next tick
    pub jump: bool,
}

/// Score for a level index and scroll offset: level bonus plus distance
pub fn score_for(level_index: usize, scroll_offset: f32) -> u64 {
    let distance = (-scroll_offset).max(0.0) as f64 / DISTANCE_PER_POINT as f64;
    (level_index as u64 * POINTS_PER_LEVEL) + distance.floor() as u64
}

/// Advance the game state by one fixed timestep
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    catalog: &LevelCatalog,
    tuning: &Tuning,
    geometry: &impl SceneGeometry,
) {
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    if input.jump && !state.player.airborne {
        state.player = physics::jump(state.player, tuning);
        state.events.push(GameEvent::Jumped);
    }

    // Gravity and ground clamp
    let was_airborne = state.player.airborne;
    state.player = physics::integrate(state.player, tuning);
    if was_airborne && !state.player.airborne {
        state.events.push(GameEvent::Landed);
    }

    // Scroll the level container
    state.scroll_offset = physics::scroll(state.scroll_offset, state.scroll_speed);
    state.score = score_for(state.level_index, state.scroll_offset);

    let verdict = collision::check(state, geometry, tuning);

    if verdict.level_clear {
        let cleared = state.level_index;
        state.events.push(GameEvent::LevelCleared { level: cleared });
        log::info!("Level {} cleared (score {})", cleared + 1, state.score);

        if load_level(state, catalog, tuning, cleared + 1) == LevelLoad::CatalogExhausted {
            state.phase = GamePhase::Ended(Outcome::Won);
            state.events.push(GameEvent::Won);
            log::info!("All {} levels cleared", catalog.len());
        }
        return;
    }

    if verdict.crashed {
        state.phase = GamePhase::Ended(Outcome::Lost);
        state.events.push(GameEvent::Crashed {
            level: state.level_index,
        });
        log::info!(
            "Crashed on level {} after {} ticks",
            state.level_index + 1,
            state.time_ticks
        );
    }
}
