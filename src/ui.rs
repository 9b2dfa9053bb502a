//! Text shown by the HUD and overlay
//!
//! The front ends only place these strings; wording lives here.

use crate::session::RunReport;
use crate::sim::Outcome;

pub const TITLE: &str = "Geometry Jumper";
pub const INSTRUCTIONS: &str = "Use SPACE or CLICK to Jump!";
pub const START_LABEL: &str = "Start";
pub const RESTART_LABEL: &str = "Play Again";

/// Score line shown during play
pub fn hud_line(score: u64, high_score: u64) -> String {
    format!("Score: {score} | High Score: {high_score}")
}

/// Banner for a level (0-based index, shown 1-based)
pub fn level_banner(level_index: usize) -> String {
    format!("Level {}", level_index + 1)
}

/// Headline of the end-of-run overlay
pub fn end_headline(report: &RunReport) -> String {
    match (report.outcome, report.new_high_score) {
        (Outcome::Lost, false) => "GAME OVER!".to_string(),
        (Outcome::Won, false) => "YOU CONQUERED THE NEBULA!".to_string(),
        (Outcome::Lost, true) => format!("NEW HIGH SCORE! Score: {}", report.score),
        (Outcome::Won, true) => {
            format!("CONGRATULATIONS! NEW HIGH SCORE! Score: {}", report.score)
        }
    }
}

/// Detail line under the headline
pub fn end_detail(report: &RunReport) -> String {
    format!(
        "Final Score: {} | Level Reached: {}",
        report.score,
        report.level_index + 1
    )
}
