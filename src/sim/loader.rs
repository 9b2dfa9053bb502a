//! Level loading

use super::state::{GameEvent, GameState, Hazard, Player};
use crate::levels::LevelCatalog;
use crate::tuning::Tuning;

/// What happened when a level was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelLoad {
    /// The level is now active
    Loaded,
    /// The index is past the end of the catalog: the game is beaten
    CatalogExhausted,
}

/// Replace the active level with `level_index`.
///
/// Past the end of the catalog nothing is touched and `CatalogExhausted` is
/// returned; ending the run is the caller's job.
pub fn load_level(
    state: &mut GameState,
    catalog: &LevelCatalog,
    tuning: &Tuning,
    level_index: usize,
) -> LevelLoad {
    let Some(level) = catalog.get(level_index) else {
        return LevelLoad::CatalogExhausted;
    };

    state.level_index = level_index;
    state.scroll_speed = tuning.speed_for_level(level_index);
    state.hazards.clear();
    state
        .hazards
        .extend(level.hazards().iter().map(|&x| Hazard { x }));
    state.scroll_offset = 0.0;
    state.player = Player::grounded(tuning);
    state.events.push(GameEvent::LevelStarted { level: level_index });

    log::info!(
        "Level {} loaded: {} spikes, speed {:.1}",
        level_index + 1,
        state.hazards.len(),
        state.scroll_speed
    );

    LevelLoad::Loaded
}
