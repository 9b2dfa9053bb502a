//! Idle/demo mode - the game plays itself
//!
//! The autopilot looks at the next group of spikes, works out the range of
//! distances from which a jump clears the whole group, and presses jump
//! somewhere inside that range. Where exactly is jittered per group with a
//! seeded RNG so demo runs do not all look identical.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geometry::{Aabb, Layout, SceneGeometry};
use super::physics;
use super::state::GameState;
use crate::tuning::Tuning;

/// Spikes closer together than this (beyond the player width) are cleared in
/// one jump
const STANDING_MARGIN: f32 = 8.0;

/// Contiguous run of spikes that must be cleared with a single jump
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cluster {
    /// Index of the first spike in `state.hazards`
    first: usize,
    bounds: Aabb,
}

/// Ticks after pressing jump during which the player is high enough to pass
/// over something `height` tall: `(first, last)`, 1-based
pub fn clearance_window(tuning: &Tuning, height: f32) -> Option<(u32, u32)> {
    let arc = physics::jump_arc(tuning);
    let first = arc.iter().position(|&h| h >= height)?;
    let last = arc.iter().rposition(|&h| h >= height)?;
    Some((first as u32 + 1, last as u32 + 1))
}

/// Demo controller
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Cluster the current aim was rolled for
    aimed_at: Option<usize>,
    /// Fraction of the safe range to jump at (0 = as late as possible)
    aim: f32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            aimed_at: None,
            aim: 0.5,
        }
    }

    /// Decide whether to press jump before the next tick
    pub fn decide(&mut self, state: &GameState, tuning: &Tuning, layout: &Layout) -> bool {
        if !state.is_running() || state.player.airborne {
            return false;
        }

        let player = layout.player_bounds(state);
        let Some(cluster) = next_cluster(state, layout, &player) else {
            return false;
        };
        if cluster.bounds.left() < player.right() {
            // Already alongside it; too late to do anything useful
            return false;
        }

        let Some((first, last)) = clearance_window(tuning, layout.hazard_size.y) else {
            return false;
        };

        if self.aimed_at != Some(cluster.first) {
            self.aimed_at = Some(cluster.first);
            self.aim = self.rng.random_range(0.2..0.8);
        }

        let speed = state.scroll_speed;
        // Left edge positions (before the jump tick) from which the whole
        // cluster passes while the player is high enough
        let earliest_safe = player.right() + (first - 1) as f32 * speed;
        let latest_safe = player.left() - cluster.bounds.width() + (last + 1) as f32 * speed;

        // The jump fires within one tick of crossing the trigger line
        let trigger = if latest_safe >= earliest_safe + speed {
            let lo = earliest_safe + speed;
            lo + (latest_safe - lo) * self.aim
        } else {
            (earliest_safe + latest_safe) / 2.0
        };

        cluster.bounds.left() <= trigger
    }
}

/// First group of spikes that has not fully passed the player
fn next_cluster(state: &GameState, layout: &Layout, player: &Aabb) -> Option<Cluster> {
    let gap = player.width() + STANDING_MARGIN;
    let mut cluster: Option<Cluster> = None;

    for (i, hazard) in state.hazards.iter().enumerate() {
        let bounds = layout.hazard_bounds(state, hazard);
        match cluster.as_mut() {
            None => {
                if bounds.right() > player.left() {
                    cluster = Some(Cluster { first: i, bounds });
                }
            }
            Some(c) => {
                if bounds.left() - c.bounds.right() < gap {
                    c.bounds.max.x = c.bounds.max.x.max(bounds.right());
                } else {
                    break;
                }
            }
        }
    }

    cluster
}
