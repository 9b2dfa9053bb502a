//! Time sources and the fixed-step scheduler
//!
//! The simulation never reads the wall clock itself. Front ends hand a `Clock`
//! to the scheduler, which turns elapsed time into a whole number of ticks.

use std::cell::Cell;
use std::time::Duration;

/// Monotonic time source
pub trait Clock {
    /// Time elapsed since some fixed origin
    fn now(&self) -> Duration;
}

/// Clock that only moves when told to (tests, headless runs, browser frames)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump to an absolute time, e.g. a `requestAnimationFrame` timestamp
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Wall clock (not available on wasm32, where `Instant` panics)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    max_substeps: u32,
    last: Option<Duration>,
    accumulator: Duration,
}

impl FixedStep {
    pub fn new(step: Duration, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            last: None,
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Forget accumulated time; the next poll starts a fresh interval
    pub fn reset(&mut self) {
        self.last = None;
        self.accumulator = Duration::ZERO;
    }

    /// Number of ticks due at `now`.
    ///
    /// The first poll after a reset only records the time. Time beyond
    /// `max_substeps` ticks is dropped rather than carried forward.
    pub fn due(&mut self, now: Duration) -> u32 {
        let Some(last) = self.last.replace(now) else {
            return 0;
        };
        self.accumulator += now.saturating_sub(last);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_substeps && self.accumulator >= self.step {
            log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        ticks
    }
}
