// src/core/engine.rs
//! Repeated-extraction orchestration.
//!
//! One run: plan a spin, animate it frame by frame, resolve the slice under
//! the pointer, reconcile against the remaining pool, record the winner,
//! pause, and repeat until the requested count is reached or the pool runs
//! dry. Everything is single-threaded and cooperative; the only concurrency
//! hazard is re-entrant start, handled by the single-flight flag.

use crate::config;
use crate::core::anim::SpinTween;
use crate::core::planner::SpinPlanner;
use crate::core::timing::Ticker;
use crate::core::wheel;
use crate::renderer::WheelRenderer;
use crate::state::{RaffleError, RafflePhase, RaffleSession, Winner};
use log::{debug, info, warn};
use std::time::Duration;

pub struct SelectionEngine {
    // Single-flight guard: a start request while a run is in progress is a
    // silent no-op, not queued and not an error.
    spinning: bool,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self { spinning: false }
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Draws `extractions` winners without replacement into the session.
    ///
    /// Validation failures return before any spin starts and leave the
    /// session untouched. A spin, once started, always runs to completion
    /// before termination conditions are re-checked.
    pub fn run_raffle<P, W, T>(
        &mut self,
        session: &mut RaffleSession,
        extractions: usize,
        planner: &mut P,
        renderer: &mut W,
        clock: &mut T,
    ) -> Result<(), RaffleError>
    where
        P: SpinPlanner + ?Sized,
        W: WheelRenderer + ?Sized,
        T: Ticker + ?Sized,
    {
        if self.spinning {
            info!("A raffle is already running; ignoring start request.");
            return Ok(());
        }
        if extractions < 1 {
            return Err(RaffleError::InvalidInput(
                "extraction count must be at least 1".to_string(),
            ));
        }
        if session.roster.is_empty() {
            return Err(RaffleError::InvalidInput(
                "the name pool is empty".to_string(),
            ));
        }

        self.spinning = true;
        let result = self.drive(session, extractions, planner, renderer, clock);
        self.spinning = false;
        result
    }

    fn drive<P, W, T>(
        &mut self,
        session: &mut RaffleSession,
        extractions: usize,
        planner: &mut P,
        renderer: &mut W,
        clock: &mut T,
    ) -> Result<(), RaffleError>
    where
        P: SpinPlanner + ?Sized,
        W: WheelRenderer + ?Sized,
        T: Ticker + ?Sized,
    {
        // Fresh run: winners reset, pool restored to the full roster. The
        // slice count stays pinned to the roster for the whole run.
        session.winners.clear();
        session.available = session.roster.clone();
        let slice_count = session.slice_count();
        let pause = Duration::from_millis(config::settings().extraction_pause_ms);

        renderer.draw_wheel(session.rotation, &session.roster, &session.winners);

        for draw in 1..=extractions {
            if session.available.is_empty() {
                info!(
                    "All names have been selected after {} extraction(s).",
                    session.winners.len()
                );
                break;
            }

            session.phase = RafflePhase::Spinning;
            let plan = planner.plan(session.rotation);
            debug!(
                "Extraction {}: spinning from {:.3} to {:.3} over {} ms.",
                draw, plan.start, plan.target, plan.duration_ms
            );

            let mut tween = SpinTween::from_plan(&plan);
            loop {
                let dt = clock.tick();
                session.rotation = tween.update(dt);
                renderer.draw_wheel(session.rotation, &session.roster, &session.winners);
                if tween.finished() {
                    break;
                }
            }

            session.phase = RafflePhase::Resolving;
            let landed_idx = wheel::slice_at(session.rotation, slice_count)?;
            let landed = session.roster[landed_idx].clone();

            match take_from_pool(&mut session.available, &landed) {
                Some(name) => record_winner(session, draw, name),
                None => {
                    // The pointer aliased onto an already-won slice. One
                    // bounded corrective nudge, one re-resolve, then give the
                    // slot up. Never loops.
                    warn!(
                        "'{}' was already selected; nudging the wheel for a single retry.",
                        landed
                    );
                    session.rotation += config::RETRY_NUDGE;
                    renderer.draw_wheel(session.rotation, &session.roster, &session.winners);

                    let retry_idx = wheel::slice_at(session.rotation, slice_count)?;
                    let retried = session.roster[retry_idx].clone();
                    match take_from_pool(&mut session.available, &retried) {
                        Some(name) => record_winner(session, draw, name),
                        None => warn!(
                            "Retry landed on '{}' which was also selected; skipping extraction {}.",
                            retried, draw
                        ),
                    }
                }
            }

            renderer.draw_wheel(session.rotation, &session.roster, &session.winners);

            if draw < extractions && !session.available.is_empty() {
                clock.wait(pause);
            }
        }

        session.phase = RafflePhase::Done;
        Ok(())
    }
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn take_from_pool(pool: &mut Vec<String>, name: &str) -> Option<String> {
    pool.iter().position(|n| n == name).map(|i| pool.remove(i))
}

fn record_winner(session: &mut RaffleSession, draw: usize, name: String) {
    info!("Extraction {} winner: {}", draw, name);
    session.winners.push(Winner {
        draw_index: draw,
        name,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timing::ManualClock;
    use crate::renderer::NullRenderer;
    use crate::state::SpinPlan;
    use std::f64::consts::TAU;

    /// Planner scripted with exact landing rotations, so every draw is
    /// hand-computable. Falls back to whole turns once the script runs out.
    struct ScriptedPlanner {
        targets: Vec<f64>,
        next: usize,
    }

    impl ScriptedPlanner {
        fn new(targets: Vec<f64>) -> Self {
            Self { targets, next: 0 }
        }
    }

    impl SpinPlanner for ScriptedPlanner {
        fn plan(&mut self, current_rotation: f64) -> SpinPlan {
            let target = self
                .targets
                .get(self.next)
                .copied()
                .unwrap_or(current_rotation + TAU);
            self.next += 1;
            SpinPlan {
                start: current_rotation,
                target,
                duration_ms: 100,
            }
        }
    }

    fn session_abc() -> RaffleSession {
        RaffleSession::new(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    }

    fn run(
        session: &mut RaffleSession,
        extractions: usize,
        targets: Vec<f64>,
    ) -> Result<(), RaffleError> {
        let mut engine = SelectionEngine::new();
        let mut planner = ScriptedPlanner::new(targets);
        let mut clock = ManualClock::new(0.025);
        engine.run_raffle(session, extractions, &mut planner, &mut NullRenderer, &mut clock)
    }

    // With 3 slices, width = 2π/3 and the pointer reads normalize(-rotation),
    // so a target of k·2π + (3 - i - 0.5)·width lands mid-slice on index i:
    // +2.5·width is "A", +1.5·width is "B", +0.5·width is "C". Mid-slice
    // targets keep a wide margin from boundaries, so rounding can't flip the
    // resolved index.

    #[test]
    fn scripted_spins_draw_the_landed_names_in_order() {
        let width = TAU / 3.0;
        let mut session = session_abc();
        run(
            &mut session,
            2,
            vec![3.0 * TAU + 2.5 * width, 6.0 * TAU + 1.5 * width],
        )
        .unwrap();

        assert_eq!(session.winners.len(), 2);
        assert_eq!(session.winners[0].name, "A");
        assert_eq!(session.winners[0].draw_index, 1);
        assert_eq!(session.winners[1].name, "B");
        assert_eq!(session.winners[1].draw_index, 2);
        assert_eq!(session.available, vec!["C".to_string()]);
        assert_eq!(session.phase, RafflePhase::Done);
    }

    #[test]
    fn pool_and_winners_stay_disjoint() {
        let width = TAU / 3.0;
        let mut session = session_abc();
        run(
            &mut session,
            3,
            vec![
                3.0 * TAU + 2.5 * width,
                6.0 * TAU + 1.5 * width,
                9.0 * TAU + 0.5 * width,
            ],
        )
        .unwrap();

        assert_eq!(session.winners.len(), 3);
        assert!(session.available.is_empty());
        for w in &session.winners {
            assert!(!session.available.contains(&w.name));
        }
    }

    #[test]
    fn collision_is_resolved_by_a_single_nudge() {
        // Second spin lands on "A" again. The quarter-turn nudge moves the
        // pointer reading from 0.5·width to 0.5·width - π/2 ≈ -0.52, which
        // wraps to ≈ 5.76 rad: slice 2, "C".
        let width = TAU / 3.0;
        let mut session = session_abc();
        run(
            &mut session,
            2,
            vec![3.0 * TAU + 2.5 * width, 6.0 * TAU + 2.5 * width],
        )
        .unwrap();

        assert_eq!(session.winners.len(), 2);
        assert_eq!(session.winners[0].name, "A");
        assert_eq!(session.winners[1].name, "C");
    }

    #[test]
    fn double_collision_skips_the_slot() {
        // Landed pointer angle 1.8 rad is slice 0 ("A", already won); after
        // the π/2 nudge the pointer reads 1.8 - π/2 ≈ 0.229 rad, still slice
        // 0. The slot is given up, never looped.
        let width = TAU / 3.0;
        let mut session = session_abc();
        run(
            &mut session,
            2,
            vec![3.0 * TAU + 2.5 * width, 6.0 * TAU + (TAU - 1.8)],
        )
        .unwrap();

        assert_eq!(session.winners.len(), 1);
        assert_eq!(session.winners[0].name, "A");
        assert_eq!(session.phase, RafflePhase::Done);
        // B and C remain undrawn.
        assert_eq!(session.available.len(), 2);
    }

    #[test]
    fn exhausted_pool_stops_the_run_early() {
        let mut session = RaffleSession::new(vec!["Solo".to_string()]);
        run(&mut session, 5, vec![3.0 * TAU, 4.0 * TAU, 5.0 * TAU]).unwrap();

        assert_eq!(session.winners.len(), 1);
        assert_eq!(session.winners[0].name, "Solo");
        assert_eq!(session.phase, RafflePhase::Done);
    }

    #[test]
    fn zero_extractions_is_invalid_input_before_any_spin() {
        let mut session = session_abc();
        let mut engine = SelectionEngine::new();
        let mut planner = ScriptedPlanner::new(vec![]);
        let mut clock = ManualClock::new(0.025);
        let err = engine
            .run_raffle(&mut session, 0, &mut planner, &mut NullRenderer, &mut clock)
            .unwrap_err();
        assert!(matches!(err, RaffleError::InvalidInput(_)));
        assert_eq!(clock.ticks, 0, "no animation frame may run");
        assert_eq!(session.phase, RafflePhase::Idle);
        assert!(session.winners.is_empty());
    }

    #[test]
    fn empty_pool_is_invalid_input() {
        let mut session = RaffleSession::new(Vec::new());
        let err = run(&mut session, 1, vec![]).unwrap_err();
        assert!(matches!(err, RaffleError::InvalidInput(_)));
    }

    #[test]
    fn reentrant_start_is_a_silent_noop() {
        let mut session = session_abc();
        let mut engine = SelectionEngine { spinning: true };
        let mut planner = ScriptedPlanner::new(vec![3.0 * TAU]);
        let mut clock = ManualClock::new(0.025);
        let result =
            engine.run_raffle(&mut session, 2, &mut planner, &mut NullRenderer, &mut clock);

        assert!(result.is_ok());
        assert!(session.winners.is_empty());
        assert_eq!(clock.ticks, 0, "no second animation may start");
        assert_eq!(session.phase, RafflePhase::Idle);
        assert!(engine.is_spinning());
    }

    #[test]
    fn rotation_never_decreases_during_a_run() {
        struct WatchRenderer {
            last: f64,
            ok: bool,
        }
        impl crate::renderer::WheelRenderer for WatchRenderer {
            fn draw_wheel(&mut self, rotation: f64, _: &[String], _: &[Winner]) {
                if rotation < self.last {
                    self.ok = false;
                }
                self.last = rotation;
            }
            fn draw_empty(&mut self) {}
        }

        let width = TAU / 3.0;
        let mut session = session_abc();
        let mut engine = SelectionEngine::new();
        let mut planner =
            ScriptedPlanner::new(vec![3.0 * TAU + 2.5 * width, 6.0 * TAU + 1.5 * width]);
        let mut clock = ManualClock::new(0.025);
        let mut watcher = WatchRenderer { last: 0.0, ok: true };
        engine
            .run_raffle(&mut session, 2, &mut planner, &mut watcher, &mut clock)
            .unwrap();
        assert!(watcher.ok, "rotation went backwards at some frame");
    }
}
