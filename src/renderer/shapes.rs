//! Shape generation for 2D primitives
//!
//! Everything is produced in viewport space (the same space as `Layout`), so
//! the scene can be built and inspected without a GPU.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::vertex::{Vertex, colors};
use crate::sim::{Aabb, GamePhase, GameState, Layout, Outcome, SceneGeometry};

/// Stars scroll at this fraction of the level speed
const STAR_PARALLAX: f32 = 0.2;
const STAR_COUNT: usize = 80;
const STAR_SEED: u64 = 0x6e65_6275_6c61;

/// Generate vertices for a filled rectangle (two triangles)
pub fn rect(bounds: &Aabb, color: [f32; 4]) -> Vec<Vertex> {
    let (l, r, t, b) = (bounds.left(), bounds.right(), bounds.top(), bounds.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Generate vertices for a spike: a triangle standing on the bottom edge
pub fn spike(bounds: &Aabb, color: [f32; 4]) -> Vec<Vertex> {
    let apex = Vec2::new((bounds.left() + bounds.right()) / 2.0, bounds.top());
    vec![
        Vertex::new(bounds.left(), bounds.bottom(), color),
        Vertex::new(bounds.right(), bounds.bottom(), color),
        Vertex::new(apex.x, apex.y, color),
    ]
}

/// Background stars, wrapped horizontally so they scroll forever
pub fn starfield(layout: &Layout, scroll_offset: f32) -> Vec<Vertex> {
    let mut rng = Pcg32::seed_from_u64(STAR_SEED);
    let width = layout.viewport.x;
    let shift = (scroll_offset * STAR_PARALLAX).rem_euclid(width);

    let mut vertices = Vec::with_capacity(STAR_COUNT * 6);
    for _ in 0..STAR_COUNT {
        let x = rng.random_range(0.0..width);
        let y = rng.random_range(0.0..layout.ground_line);
        let size = rng.random_range(1.0..3.0);
        let x = (x + shift).rem_euclid(width);
        vertices.extend(rect(&Aabb::from_origin_size(x, y, size, size), colors::STAR));
    }
    vertices
}

/// Build the whole frame: stars, ground, visible spikes, player
pub fn scene(state: &GameState, layout: &Layout) -> Vec<Vertex> {
    let mut vertices = starfield(layout, state.scroll_offset);

    let ground = Aabb::from_origin_size(
        0.0,
        layout.ground_line,
        layout.viewport.x,
        layout.viewport.y - layout.ground_line,
    );
    vertices.extend(rect(&ground, colors::GROUND));
    let edge = Aabb::from_origin_size(0.0, layout.ground_line, layout.viewport.x, 2.0);
    vertices.extend(rect(&edge, colors::GROUND_EDGE));

    for hazard in &state.hazards {
        let bounds = layout.hazard_bounds(state, hazard);
        if bounds.right() < 0.0 {
            continue;
        }
        if bounds.left() >= layout.viewport.x {
            // Hazards are in scroll order; the rest are further right
            break;
        }
        vertices.extend(spike(&bounds, colors::SPIKE));
    }

    let player_color = match state.phase {
        GamePhase::Ended(Outcome::Lost) => colors::PLAYER_CRASHED,
        _ if state.player.airborne => colors::PLAYER_AIRBORNE,
        _ => colors::PLAYER,
    };
    vertices.extend(rect(&layout.player_bounds(state), player_color));

    vertices
}
