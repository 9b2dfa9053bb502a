//! Viewport geometry
//!
//! Collision works on on-screen bounding boxes. `SceneGeometry` is the query
//! seam between the simulation and whatever lays the scene out; `Layout` is
//! the analytic implementation used by the game and the renderer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameState, Hazard};
use crate::consts::*;

/// Axis-aligned bounding box in viewport space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from its left/top corner and size
    pub fn from_origin_size(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Open-interval overlap on the x axis (touching edges do not count)
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// Open-interval overlap on the y axis
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.top() < other.bottom() && self.bottom() > other.top()
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Source of on-screen bounding boxes for the player and spikes
pub trait SceneGeometry {
    /// Player box in viewport space
    fn player_bounds(&self, state: &GameState) -> Aabb;

    /// Spike box in viewport space
    fn hazard_bounds(&self, state: &GameState, hazard: &Hazard) -> Aabb;

    /// Viewport x of the left screen edge
    fn viewport_left(&self) -> f32 {
        0.0
    }
}

/// Fixed viewport layout
///
/// Spikes sit on the ground line inside a level container whose origin starts
/// at `level_origin_x` and is translated by the scroll offset. The player stays
/// at its own horizontal offset in the viewport and is not translated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub viewport: Vec2,
    /// Viewport y of the ground line
    pub ground_line: f32,
    pub player_size: f32,
    pub hazard_size: Vec2,
    /// Viewport x of the level container before any scrolling
    pub level_origin_x: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            ground_line: GROUND_LINE,
            player_size: PLAYER_SIZE,
            hazard_size: Vec2::new(SPIKE_WIDTH, SPIKE_HEIGHT),
            level_origin_x: VIEWPORT_WIDTH,
        }
    }
}

impl Layout {
    /// Viewport x of the level container: the single scroll transform
    #[inline]
    pub fn container_x(&self, scroll_offset: f32) -> f32 {
        self.level_origin_x + scroll_offset
    }
}

impl SceneGeometry for Layout {
    fn player_bounds(&self, state: &GameState) -> Aabb {
        // player.y is relative to the ground, negative above it
        let bottom = self.ground_line + state.player.y;
        Aabb::from_origin_size(
            state.player.x,
            bottom - self.player_size,
            self.player_size,
            self.player_size,
        )
    }

    fn hazard_bounds(&self, state: &GameState, hazard: &Hazard) -> Aabb {
        Aabb::from_origin_size(
            self.container_x(state.scroll_offset) + hazard.x,
            self.ground_line - self.hazard_size.y,
            self.hazard_size.x,
            self.hazard_size.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_aabb_edges() {
        let b = Aabb::from_origin_size(10.0, 20.0, 30.0, 40.0);
        assert_eq!(b.left(), 10.0);
        assert_eq!(b.right(), 40.0);
        assert_eq!(b.top(), 20.0);
        assert_eq!(b.bottom(), 60.0);
        assert_eq!(b.width(), 30.0);
        assert_eq!(b.height(), 40.0);
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::from_origin_size(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_origin_size(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps_x(&b));
        let c = a.translated(Vec2::new(5.0, 0.0));
        assert!(a.overlaps_x(&c));
    }

    #[test]
    fn test_layout_player_stands_on_ground_line() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning);
        let layout = Layout::default();

        let player = layout.player_bounds(&state);
        assert_eq!(player.bottom(), GROUND_LINE);
        assert_eq!(player.left(), PLAYER_START_X);
        assert_eq!(player.width(), PLAYER_SIZE);
    }

    #[test]
    fn test_layout_hazards_follow_scroll() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let layout = Layout::default();
        let hazard = Hazard { x: 300.0 };

        let before = layout.hazard_bounds(&state, &hazard);
        assert_eq!(before.left(), VIEWPORT_WIDTH + 300.0);
        assert_eq!(before.bottom(), GROUND_LINE);

        state.scroll_offset = -250.0;
        let after = layout.hazard_bounds(&state, &hazard);
        assert_eq!(after.left(), before.left() - 250.0);

        // The player is not part of the scrolled container
        assert_eq!(layout.player_bounds(&state).left(), PLAYER_START_X);
    }
}
