//! Session controller
//!
//! Owns one `GameState` and everything around it: the level catalog, tuning,
//! layout, the high score and its store, the fixed-step scheduler and the
//! optional autopilot.
//!
//! ```text
//! Idle ──start──▶ Running ──crash──▶ Ended(Lost)
//!                    │                   │
//!                    └──last level──▶ Ended(Won)
//!                                        │
//!        Running ◀───────start───────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, FixedStep};
use crate::consts::MAX_SUBSTEPS;
use crate::highscores::HighScore;
use crate::levels::LevelCatalog;
use crate::persistence::ScalarStore;
use crate::sim::{
    Autopilot, GameEvent, GamePhase, GameState, Layout, LevelLoad, Outcome, TickInput, load_level,
    tick,
};
use crate::tuning::{Tuning, TuningError};

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub outcome: Outcome,
    pub score: u64,
    /// Level the run ended on (0-based)
    pub level_index: usize,
    /// The score beat the stored high score
    pub new_high_score: bool,
    /// High score before this run
    pub previous_high_score: u64,
}

/// One player's sessions against a store
pub struct Session<S: ScalarStore> {
    state: GameState,
    catalog: LevelCatalog,
    tuning: Tuning,
    layout: Layout,
    store: S,
    high_score: HighScore,
    input: TickInput,
    stepper: FixedStep,
    autopilot: Option<Autopilot>,
    report: Option<RunReport>,
}

impl<S: ScalarStore> Session<S> {
    /// Idle session; reads the high score from `store`. Tuning that would
    /// break the simulation is rejected.
    pub fn new(
        catalog: LevelCatalog,
        tuning: Tuning,
        layout: Layout,
        store: S,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(catalog, tuning, layout, store))
    }

    /// Standard catalog, default tuning and layout
    pub fn with_store(store: S) -> Self {
        Self::build(
            LevelCatalog::standard(),
            Tuning::default(),
            Layout::default(),
            store,
        )
    }

    fn build(catalog: LevelCatalog, tuning: Tuning, layout: Layout, store: S) -> Self {
        let high_score = HighScore::load(&store);
        let stepper = FixedStep::new(tuning.tick_duration(), MAX_SUBSTEPS);
        Self {
            state: GameState::new(&tuning),
            catalog,
            tuning,
            layout,
            store,
            high_score,
            input: TickInput::default(),
            stepper,
            autopilot: None,
            report: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.value()
    }

    /// Report of the last finished run, until the next start
    pub fn report(&self) -> Option<&RunReport> {
        self.report.as_ref()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Begin a fresh run from level 1 (also used to restart)
    pub fn start(&mut self) {
        self.state = GameState::new(&self.tuning);
        self.state.phase = GamePhase::Running;
        self.input = TickInput::default();
        self.report = None;
        self.stepper.reset();

        if load_level(&mut self.state, &self.catalog, &self.tuning, 0) == LevelLoad::CatalogExhausted {
            // Empty catalog: nothing to play, trivially won
            self.state.phase = GamePhase::Ended(Outcome::Won);
            self.state.events.push(GameEvent::Won);
            self.finish(Outcome::Won);
            return;
        }
        log::info!("Run started (high score {})", self.high_score.value());
    }

    /// Request a jump on the next tick. Ignored unless a run is active.
    pub fn jump(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.input.jump = true;
        true
    }

    /// Turn the autopilot on with a seed, or off with `None`
    pub fn set_autopilot(&mut self, seed: Option<u64>) {
        self.autopilot = seed.map(Autopilot::new);
        log::info!("Autopilot {}", if self.autopilot.is_some() { "on" } else { "off" });
    }

    pub fn autopilot_enabled(&self) -> bool {
        self.autopilot.is_some()
    }

    /// Advance exactly one tick
    pub fn step(&mut self) {
        if !self.state.is_running() {
            return;
        }

        if let Some(pilot) = self.autopilot.as_mut() {
            if pilot.decide(&self.state, &self.tuning, &self.layout) {
                self.input.jump = true;
            }
        }

        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, &self.catalog, &self.tuning, &self.layout);

        if let Some(outcome) = self.state.outcome() {
            self.finish(outcome);
        }
    }

    /// Run every tick that is due according to `clock`; returns how many ran
    pub fn pump(&mut self, clock: &impl Clock) -> u32 {
        if !self.state.is_running() {
            return 0;
        }
        let due = self.stepper.due(clock.now());
        let mut ran = 0;
        for _ in 0..due {
            if !self.state.is_running() {
                break;
            }
            self.step();
            ran += 1;
        }
        ran
    }

    /// Forget elapsed clock time, e.g. after the front end stopped getting
    /// frames. The next pump only primes the scheduler.
    pub fn resync_clock(&mut self) {
        self.stepper.reset();
    }

    /// Length of one tick on the clock
    pub fn step_duration(&self) -> std::time::Duration {
        self.stepper.step()
    }

    /// Take events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    fn finish(&mut self, outcome: Outcome) {
        let score = self.state.score;
        let previous_high_score = self.high_score.value();
        // Demo runs are not the player's scores
        let counts = self.autopilot.is_none();
        let new_high_score = counts && self.high_score.beaten_by(score);

        if counts {
            if let Err(e) = self.high_score.record(score, &mut self.store) {
                log::warn!("High score {score} not persisted: {e}");
            }
        }

        log::info!(
            "Run ended: {:?} on level {} with score {}{}",
            outcome,
            self.state.level_index + 1,
            score,
            if new_high_score { " (new high score)" } else { "" }
        );

        self.report = Some(RunReport {
            outcome,
            score,
            level_index: self.state.level_index,
            new_high_score,
            previous_high_score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::consts::VIEWPORT_WIDTH;
    use crate::highscores::STORAGE_KEY;
    use crate::levels::Level;
    use crate::persistence::MemoryStore;
    use crate::settings::Settings;
    use crate::ui;

    /// One level whose only spike starts under the player
    fn doomed_catalog() -> LevelCatalog {
        LevelCatalog::new(vec![Level::new(vec![110.0 - VIEWPORT_WIDTH])])
    }

    fn quick_tuning() -> Tuning {
        Tuning {
            completion_distance: 10.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::with_store(MemoryStore::new());
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.high_score(), 0);
        assert!(session.report().is_none());
    }

    #[test]
    fn test_start_loads_first_level() {
        let mut session = Session::with_store(MemoryStore::new());
        session.start();
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.state().level_index, 0);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().hazards.len(), 5);
        assert_eq!(session.drain_events(), vec![GameEvent::LevelStarted { level: 0 }]);
    }

    #[test]
    fn test_jump_ignored_unless_running() {
        let mut session = Session::with_store(MemoryStore::new());
        assert!(!session.jump());
        session.start();
        assert!(session.jump());
        session.step();
        assert!(session.state().player.airborne);
    }

    #[test]
    fn test_immediate_crash_keeps_high_score() {
        let store = MemoryStore::with(STORAGE_KEY, "500");
        let mut session =
            Session::new(doomed_catalog(), Tuning::default(), Layout::default(), store).unwrap();
        assert_eq!(session.high_score(), 500);

        session.start();
        session.step();

        assert_eq!(session.phase(), GamePhase::Ended(Outcome::Lost));
        let report = session.report().unwrap().clone();
        assert_eq!(report.score, 0);
        assert!(!report.new_high_score);
        assert_eq!(ui::end_headline(&report), "GAME OVER!");
        assert_eq!(session.high_score(), 500);
        assert_eq!(session.store().get(STORAGE_KEY).unwrap().as_deref(), Some("500"));
    }

    #[test]
    fn test_exhausting_catalog_wins_and_records() {
        let catalog = LevelCatalog::new(vec![Level::new(vec![])]);
        let mut session =
            Session::new(catalog, quick_tuning(), Layout::default(), MemoryStore::new()).unwrap();
        session.start();
        for _ in 0..3 {
            session.step();
        }

        assert_eq!(session.phase(), GamePhase::Ended(Outcome::Won));
        let report = session.report().unwrap().clone();
        assert_eq!(report.outcome, Outcome::Won);
        assert_eq!(report.score, 1);
        assert!(report.new_high_score);
        assert_eq!(
            ui::end_headline(&report),
            "CONGRATULATIONS! NEW HIGH SCORE! Score: 1"
        );
        assert_eq!(session.store().get(STORAGE_KEY).unwrap().as_deref(), Some("1"));
        assert!(session.drain_events().contains(&GameEvent::Won));
    }

    #[test]
    fn test_ended_session_ignores_ticks_until_restart() {
        let mut session = Session::new(
            doomed_catalog(),
            Tuning::default(),
            Layout::default(),
            MemoryStore::new(),
        )
        .unwrap();
        session.start();
        session.step();
        let ticks = session.state().time_ticks;
        session.step();
        assert_eq!(session.state().time_ticks, ticks);
        assert!(!session.jump());

        session.start();
        assert_eq!(session.phase(), GamePhase::Running);
        assert!(session.report().is_none());
        assert_eq!(session.state().time_ticks, 0);
    }

    #[test]
    fn test_pump_follows_clock() {
        let clock = ManualClock::new();
        let mut session = Session::with_store(MemoryStore::new());

        // Idle sessions do not consume time
        clock.advance(session.step_duration() * 5);
        assert_eq!(session.pump(&clock), 0);

        session.start();
        assert_eq!(session.pump(&clock), 0);
        clock.advance(session.step_duration() * 6);
        assert_eq!(session.pump(&clock), 6);
        assert_eq!(session.state().time_ticks, 6);
        assert_eq!(session.state().scroll_offset, -24.0);
    }

    #[test]
    fn test_empty_catalog_is_an_immediate_win() {
        let mut session = Session::new(
            LevelCatalog::new(Vec::new()),
            Tuning::default(),
            Layout::default(),
            MemoryStore::new(),
        )
        .unwrap();
        session.start();
        assert_eq!(session.phase(), GamePhase::Ended(Outcome::Won));
        assert_eq!(session.report().unwrap().score, 0);
    }

    #[test]
    fn test_autopilot_plays_first_level() {
        let clock = ManualClock::new();
        let mut session = Session::with_store(MemoryStore::new());
        session.set_autopilot(Some(3));
        session.start();
        session.pump(&clock);

        while session.state().level_index == 0 {
            clock.advance(session.step_duration());
            session.pump(&clock);
            assert_eq!(session.phase(), GamePhase::Running);
        }
        assert_eq!(session.state().level_index, 1);
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let zero_rate = Tuning {
            tick_hz: 0,
            ..Default::default()
        };
        let stalled = Tuning {
            base_speed: 0.0,
            ..Default::default()
        };
        for tuning in [zero_rate, stalled] {
            let result = Session::new(
                LevelCatalog::standard(),
                tuning,
                Layout::default(),
                MemoryStore::new(),
            );
            assert!(matches!(result, Err(TuningError::Invalid { .. })));
        }
    }

    #[test]
    fn test_resync_drops_elapsed_time() {
        let clock = ManualClock::new();
        let mut session = Session::with_store(MemoryStore::new());
        session.start();
        session.pump(&clock);

        clock.advance(session.step_duration() * 100);
        session.resync_clock();
        assert_eq!(session.pump(&clock), 0);
        clock.advance(session.step_duration());
        assert_eq!(session.pump(&clock), 1);
    }

    #[test]
    fn test_autopilot_runs_do_not_set_high_score() {
        let catalog = LevelCatalog::new(vec![Level::new(vec![])]);
        let mut session =
            Session::new(catalog, quick_tuning(), Layout::default(), MemoryStore::new()).unwrap();
        session.set_autopilot(Some(9));
        session.start();
        for _ in 0..3 {
            session.step();
        }

        let report = session.report().unwrap().clone();
        assert_eq!(report.outcome, Outcome::Won);
        assert_eq!(report.score, 1);
        assert!(!report.new_high_score);
        assert_eq!(ui::end_headline(&report), "YOU CONQUERED THE NEBULA!");
        assert_eq!(session.high_score(), 0);
        assert_eq!(session.store().get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_settings_persist_through_session_store() {
        let mut session = Session::with_store(MemoryStore::new());
        let mut settings = Settings::load(session.store());
        settings.sound = !settings.sound;
        settings.show_fps = true;
        settings.save(session.store_mut()).unwrap();

        assert_eq!(Settings::load(session.store()), settings);
        // High score key untouched
        assert_eq!(session.store().get(STORAGE_KEY).unwrap(), None);
    }
}
