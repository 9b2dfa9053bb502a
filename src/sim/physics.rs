//! Vertical kinematics and horizontal scrolling
//!
//! Player helpers take and return `Player` by value so they can be reasoned
//! about (and property tested) without a full `GameState`.

use super::state::Player;
use crate::tuning::Tuning;

/// Start a jump if standing; a no-op while airborne
pub fn jump(player: Player, tuning: &Tuning) -> Player {
    if player.airborne {
        return player;
    }
    Player {
        vel_y: tuning.jump_velocity,
        airborne: true,
        ..player
    }
}

/// Apply gravity, integrate position and clamp to the ground
pub fn integrate(player: Player, tuning: &Tuning) -> Player {
    let vel_y = player.vel_y + tuning.gravity;
    let y = player.y + vel_y;

    if y >= tuning.ground_y {
        Player {
            y: tuning.ground_y,
            vel_y: 0.0,
            airborne: false,
            ..player
        }
    } else {
        Player { y, vel_y, ..player }
    }
}

/// Move the level container left by one tick of scrolling
#[inline]
pub fn scroll(offset: f32, speed: f32) -> f32 {
    offset - speed
}

/// Heights above ground for each tick of a jump from standing, until landing.
/// Index 0 is the first tick after the jump was pressed.
pub fn jump_arc(tuning: &Tuning) -> Vec<f32> {
    let mut player = jump(
        Player {
            x: tuning.player_start_x,
            y: tuning.ground_y,
            vel_y: 0.0,
            airborne: false,
        },
        tuning,
    );
    let mut heights = Vec::new();
    // A valid tuning always lands; the cap guards hand-edited JSON
    while player.airborne && heights.len() < 10_000 {
        player = integrate(player, tuning);
        heights.push(player.height(tuning));
    }
    heights
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn standing() -> Player {
        Player::grounded(&Tuning::default())
    }

    #[test]
    fn test_jump_from_ground() {
        let tuning = Tuning::default();
        let player = jump(standing(), &tuning);
        assert_eq!(player.vel_y, tuning.jump_velocity);
        assert!(player.airborne);
    }

    #[test]
    fn test_jump_while_airborne_is_noop() {
        let tuning = Tuning::default();
        let mut player = jump(standing(), &tuning);
        player = integrate(player, &tuning);
        player = integrate(player, &tuning);

        let again = jump(player, &tuning);
        assert_eq!(again, player);
    }

    #[test]
    fn test_standing_player_stays_on_ground() {
        let tuning = Tuning::default();
        let player = integrate(standing(), &tuning);
        assert_eq!(player.y, tuning.ground_y);
        assert_eq!(player.vel_y, 0.0);
        assert!(!player.airborne);
    }

    #[test]
    fn test_jump_arc_shape() {
        let tuning = Tuning::default();
        let arc = jump_arc(&tuning);
        // -15 impulse with gravity 1: back on the ground after 29 ticks
        assert_eq!(arc.len(), 29);
        assert_eq!(arc[0], 14.0);
        assert_eq!(arc.iter().cloned().fold(0.0, f32::max), 105.0);
        assert_eq!(*arc.last().unwrap(), 0.0);
    }

    #[test]
    fn test_scroll_moves_left() {
        assert_eq!(scroll(0.0, 4.0), -4.0);
        assert_eq!(scroll(-10.0, 6.5), -16.5);
    }

    proptest! {
        #[test]
        fn velocity_increases_until_landing(gravity in 0.1f32..3.0, impulse in -40.0f32..-1.0) {
            let tuning = Tuning { gravity, jump_velocity: impulse, ..Default::default() };
            let mut player = jump(standing(), &tuning);
            let mut ticks = 0;
            while player.airborne {
                let next = integrate(player, &tuning);
                prop_assert!(next.y <= tuning.ground_y);
                if next.airborne {
                    prop_assert!(next.vel_y > player.vel_y);
                } else {
                    prop_assert_eq!(next.vel_y, 0.0);
                    prop_assert_eq!(next.y, tuning.ground_y);
                }
                player = next;
                ticks += 1;
                prop_assert!(ticks < 10_000);
            }
        }

        #[test]
        fn never_below_ground(y in -500.0f32..0.0, vel in -50.0f32..50.0) {
            let tuning = Tuning::default();
            let player = Player { x: 100.0, y, vel_y: vel, airborne: true };
            let next = integrate(player, &tuning);
            prop_assert!(next.y <= tuning.ground_y);
        }

        #[test]
        fn airborne_jump_changes_nothing(y in -500.0f32..-1.0, vel in -20.0f32..20.0) {
            let tuning = Tuning::default();
            let player = Player { x: 100.0, y, vel_y: vel, airborne: true };
            prop_assert_eq!(jump(player, &tuning), player);
        }
    }
}
