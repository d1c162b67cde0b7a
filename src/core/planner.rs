// src/core/planner.rs
//! Spin planning: pick where one spin ends before it starts.
//!
//! A plan always adds several full turns on top of the current rotation so
//! the wheel visibly spins, plus a uniform sub-turn offset so the landing
//! slice is uniform over the roster regardless of where the wheel stopped
//! last time. Rotation only ever moves forward.

use crate::config;
use crate::state::SpinPlan;
use rand::Rng;
use std::f64::consts::TAU;

/// Produces the target rotation for one spin. Substitutable so tests can
/// script exact landings.
pub trait SpinPlanner {
    fn plan(&mut self, current_rotation: f64) -> SpinPlan;
}

/// Production planner: injected randomness, presentation timing from
/// settings.
pub struct RandomPlanner<R: Rng> {
    rng: R,
    duration_ms: u64,
}

impl<R: Rng> RandomPlanner<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            duration_ms: config::settings().spin_duration_ms,
        }
    }

    pub fn with_duration(rng: R, duration_ms: u64) -> Self {
        Self { rng, duration_ms }
    }
}

impl<R: Rng> SpinPlanner for RandomPlanner<R> {
    fn plan(&mut self, current_rotation: f64) -> SpinPlan {
        let full_turns = self
            .rng
            .random_range(config::MIN_FULL_TURNS..=config::MAX_FULL_TURNS);
        let offset = self.rng.random_range(0.0..TAU);
        SpinPlan {
            start: current_rotation,
            target: current_rotation + full_turns as f64 * TAU + offset,
            duration_ms: self.duration_ms,
        }
    }
}
