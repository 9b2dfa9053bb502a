//! Collision and level progress checks
//!
//! Runs after the physics step, on viewport-space boxes supplied by a
//! `SceneGeometry`.

use super::geometry::{Aabb, SceneGeometry};
use super::state::GameState;
use crate::tuning::Tuning;

/// Result of checking one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verdict {
    /// The player overlaps a spike
    pub crashed: bool,
    /// Every spike is off screen and the completion distance is covered
    pub level_clear: bool,
}

/// True if the player box hits the spike box: horizontal overlap with the
/// player's bottom edge below the spike's top edge
#[inline]
pub fn crashes(player: &Aabb, hazard: &Aabb) -> bool {
    player.overlaps_x(hazard) && player.bottom() > hazard.top() && player.top() < hazard.bottom()
}

/// True once a spike has scrolled fully past the left screen edge
#[inline]
pub fn scrolled_past(hazard: &Aabb, viewport_left: f32) -> bool {
    hazard.right() <= viewport_left
}

/// Test the player against every spike of the active level.
///
/// The completion distance is a fixed threshold from tuning and does not depend
/// on where the last spike of the level sits.
pub fn check(state: &GameState, geometry: &impl SceneGeometry, tuning: &Tuning) -> Verdict {
    let player = geometry.player_bounds(state);
    let viewport_left = geometry.viewport_left();

    let mut verdict = Verdict::default();
    let mut all_passed = true;

    for hazard in &state.hazards {
        let bounds = geometry.hazard_bounds(state, hazard);
        if !scrolled_past(&bounds, viewport_left) {
            all_passed = false;
        }
        if crashes(&player, &bounds) {
            verdict.crashed = true;
        }
    }

    verdict.level_clear = all_passed && state.scroll_offset < -tuning.completion_distance;
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Layout;
    use crate::sim::state::Hazard;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Geometry with fixed boxes, no layout involved
    struct FixedGeometry {
        player: Aabb,
        hazard: Aabb,
    }

    impl SceneGeometry for FixedGeometry {
        fn player_bounds(&self, _state: &GameState) -> Aabb {
            self.player
        }

        fn hazard_bounds(&self, _state: &GameState, _hazard: &Hazard) -> Aabb {
            self.hazard
        }
    }

    fn state_with_one_hazard() -> GameState {
        let mut state = GameState::new(&Tuning::default());
        state.hazards.push(Hazard { x: 0.0 });
        state
    }

    #[test]
    fn test_overlap_crashes() {
        let player = Aabb::from_origin_size(100.0, 300.0, 40.0, 40.0);
        let spike = Aabb::from_origin_size(120.0, 310.0, 30.0, 30.0);
        assert!(crashes(&player, &spike));
    }

    #[test]
    fn test_player_above_spike_is_clear() {
        let player = Aabb::from_origin_size(100.0, 250.0, 40.0, 40.0);
        let spike = Aabb::from_origin_size(120.0, 310.0, 30.0, 30.0);
        assert!(!crashes(&player, &spike));

        // Bottom exactly on the spike's top edge
        let resting = Aabb::from_origin_size(100.0, 270.0, 40.0, 40.0);
        assert!(!crashes(&resting, &spike));
    }

    #[test]
    fn test_horizontally_apart_is_clear() {
        let player = Aabb::from_origin_size(100.0, 300.0, 40.0, 40.0);
        let ahead = Aabb::from_origin_size(140.0, 310.0, 30.0, 30.0);
        let behind = Aabb::from_origin_size(70.0, 310.0, 30.0, 30.0);
        assert!(!crashes(&player, &ahead));
        assert!(!crashes(&player, &behind));
    }

    #[test]
    fn test_check_uses_injected_geometry() {
        let tuning = Tuning::default();
        let state = state_with_one_hazard();
        let geometry = FixedGeometry {
            player: Aabb::from_origin_size(0.0, 0.0, 10.0, 10.0),
            hazard: Aabb::from_origin_size(5.0, 5.0, 10.0, 10.0),
        };
        let verdict = check(&state, &geometry, &tuning);
        assert!(verdict.crashed);
        assert!(!verdict.level_clear);
    }

    #[test]
    fn test_level_clear_needs_distance_and_spikes_gone() {
        let tuning = Tuning::default();
        let mut state = state_with_one_hazard();
        let geometry = FixedGeometry {
            player: Aabb::from_origin_size(100.0, 0.0, 10.0, 10.0),
            hazard: Aabb::from_origin_size(-50.0, 0.0, 30.0, 10.0),
        };

        // Spike off screen but distance not covered yet
        state.scroll_offset = -tuning.completion_distance;
        assert!(!check(&state, &geometry, &tuning).level_clear);

        state.scroll_offset = -tuning.completion_distance - 1.0;
        assert!(check(&state, &geometry, &tuning).level_clear);

        // Distance covered but a spike still visible
        let visible = FixedGeometry {
            hazard: Aabb::from_origin_size(-10.0, 0.0, 30.0, 10.0),
            ..geometry
        };
        assert!(!check(&state, &visible, &tuning).level_clear);
    }

    #[test]
    fn test_layout_spike_under_player_crashes() {
        let tuning = Tuning::default();
        let layout = Layout::default();
        let mut state = GameState::new(&tuning);
        // Place a spike so its container position lands under the player
        state.hazards.push(Hazard { x: 110.0 - layout.level_origin_x });
        assert!(check(&state, &layout, &tuning).crashed);

        // Same spike, player high in the air
        state.player.y = -(layout.hazard_size.y + 1.0);
        state.player.airborne = true;
        assert!(!check(&state, &layout, &tuning).crashed);
    }

    proptest! {
        #[test]
        fn crash_iff_overlap_on_both_axes(
            px in -200.0f32..200.0, py in -200.0f32..200.0,
            hx in -200.0f32..200.0, hy in -200.0f32..200.0,
            pw in 1.0f32..80.0, ph in 1.0f32..80.0,
            hw in 1.0f32..80.0, hh in 1.0f32..80.0,
        ) {
            let player = Aabb::new(Vec2::new(px, py), Vec2::new(px + pw, py + ph));
            let hazard = Aabb::new(Vec2::new(hx, hy), Vec2::new(hx + hw, hy + hh));
            let expected = player.overlaps_x(&hazard) && player.overlaps_y(&hazard);
            prop_assert_eq!(crashes(&player, &hazard), expected);
            // Symmetric for boxes
            prop_assert_eq!(crashes(&player, &hazard), crashes(&hazard, &player));
        }

        #[test]
        fn vertically_clear_never_crashes(gap in 0.0f32..100.0, dx in -30.0f32..30.0) {
            let hazard = Aabb::from_origin_size(100.0, 300.0, 30.0, 30.0);
            let player = Aabb::from_origin_size(100.0 + dx, 300.0 - 40.0 - gap, 40.0, 40.0);
            prop_assert!(!crashes(&player, &hazard));
        }
    }
}
