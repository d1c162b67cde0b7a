// src/core/anim.rs
//! Spin animation: a tween from a start rotation to a target rotation.
//!
//! The tween is stepped once per display tick with the elapsed delta; it
//! never blocks. Progress is clamped to [0, 1] and shaped by a quad ease-out,
//! and once the duration is consumed the tween reports the target rotation
//! exactly, with no floating-point drift at the endpoint. There is no
//! mid-spin cancellation: a spin always runs to completion once started.

use crate::state::SpinPlan;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// quad-in
    Accelerate,
    /// quad-out
    Decelerate,
}

pub fn ease_apply(e: Ease, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Ease::Linear => t,
        Ease::Accelerate => t * t,
        Ease::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
    }
}

#[derive(Clone, Debug)]
pub struct SpinTween {
    start: f64,
    target: f64,
    duration: f64, // seconds
    elapsed: f64,
    ease: Ease,
}

impl SpinTween {
    pub fn from_plan(plan: &SpinPlan) -> Self {
        Self {
            start: plan.start,
            target: plan.target,
            duration: plan.duration_ms as f64 / 1000.0,
            elapsed: 0.0,
            ease: Ease::Decelerate,
        }
    }

    /// Advances by `dt` seconds and returns the rotation for this frame.
    /// Returns the exact target once the duration is consumed.
    pub fn update(&mut self, dt: f64) -> f64 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        if self.finished() {
            return self.target;
        }
        let a = ease_apply(self.ease, self.elapsed / self.duration);
        self.start + (self.target - self.start) * a
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SpinPlan;

    fn plan(start: f64, target: f64, duration_ms: u64) -> SpinPlan {
        SpinPlan { start, target, duration_ms }
    }

    #[test]
    fn decelerate_starts_fast_and_flattens() {
        let early = ease_apply(Ease::Decelerate, 0.25);
        let late = ease_apply(Ease::Decelerate, 0.75) - ease_apply(Ease::Decelerate, 0.5);
        assert!(early > 0.25); // ahead of linear early on
        assert!(late < 0.25); // slower than linear near the end
        assert_eq!(ease_apply(Ease::Decelerate, 1.0), 1.0);
        assert_eq!(ease_apply(Ease::Decelerate, 0.0), 0.0);
    }

    #[test]
    fn ease_clamps_out_of_range_progress() {
        assert_eq!(ease_apply(Ease::Linear, -0.5), 0.0);
        assert_eq!(ease_apply(Ease::Linear, 1.5), 1.0);
    }

    #[test]
    fn tween_is_monotone_and_ends_exactly_on_target() {
        let target = 123.456_789;
        let mut tween = SpinTween::from_plan(&plan(2.0, target, 3000));
        let mut prev = 2.0;
        let mut last = prev;
        while !tween.finished() {
            last = tween.update(0.25);
            assert!(last >= prev, "rotation went backwards: {} -> {}", prev, last);
            assert!(last <= target);
            prev = last;
        }
        // Bitwise equality at the endpoint, not just closeness.
        assert_eq!(last, target);
    }

    #[test]
    fn finished_tween_keeps_reporting_the_target() {
        let mut tween = SpinTween::from_plan(&plan(0.0, 40.0, 100));
        assert_eq!(tween.update(5.0), 40.0);
        assert!(tween.finished());
        assert_eq!(tween.update(1.0), 40.0);
    }

    #[test]
    fn zero_duration_snaps_immediately() {
        let mut tween = SpinTween::from_plan(&plan(1.0, 7.0, 0));
        assert_eq!(tween.update(0.016), 7.0);
        assert!(tween.finished());
    }
}
