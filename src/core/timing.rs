// src/core/timing.rs
//! Frame pacing for the spin animation.
//!
//! The engine is single-threaded and cooperative: it yields once per display
//! tick while a spin is running and once for the pacing pause between
//! extractions. `Ticker` is the seam; the wall-clock implementation sleeps,
//! the manual one makes tests deterministic and instant.

use crate::config;
use std::thread;
use std::time::{Duration, Instant};

pub trait Ticker {
    /// Suspends until the next display tick, then returns the elapsed time
    /// in seconds since the previous one.
    fn tick(&mut self) -> f64;

    /// Idle suspension between extractions. Presentation pacing only.
    fn wait(&mut self, pause: Duration);
}

/// Wall-clock ticker at roughly 60 frames per second.
pub struct FrameClock {
    last: Instant,
    frame: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame: Duration::from_millis(config::FRAME_DELAY_MS),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker for FrameClock {
    fn tick(&mut self) -> f64 {
        thread::sleep(self.frame);
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        // Clamp stalls (debugger pauses, laptop sleeps) like any frame loop.
        dt.min(config::MAX_DELTA_TIME)
    }

    fn wait(&mut self, pause: Duration) {
        thread::sleep(pause);
        self.last = Instant::now();
    }
}

/// Fixed-step ticker for tests: every tick advances by the same delta and
/// nothing actually sleeps.
pub struct ManualClock {
    pub step: f64,
    pub ticks: u64,
    pub waits: u64,
}

impl ManualClock {
    pub fn new(step: f64) -> Self {
        Self { step, ticks: 0, waits: 0 }
    }
}

impl Ticker for ManualClock {
    fn tick(&mut self) -> f64 {
        self.ticks += 1;
        self.step
    }

    fn wait(&mut self, _pause: Duration) {
        self.waits += 1;
    }
}
