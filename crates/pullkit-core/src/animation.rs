#![forbid(unsafe_code)]

//! Settle animation: a fixed-duration tween of the scroll offset.
//!
//! [`ScrollAnimator`] moves an integer offset from a start value to a target
//! over a fixed duration. The host frame loop samples it with the time
//! elapsed since the animation started; the animator itself never reads a
//! clock, which keeps it deterministic under test.
//!
//! # Invariants
//!
//! 1. `tick(e)` is a pure function of `e` while the animation runs: calling
//!    it twice with the same elapsed time returns the same value.
//! 2. Once `elapsed >= duration` the value is exactly the target and
//!    `is_finished()` is true.
//! 3. An animator that was never started (or was aborted) is finished and
//!    `tick()` returns the last value without side effects.
//!
//! # Failure Modes
//!
//! - Zero duration: the animation completes on start; the value jumps to
//!   the target.

use std::time::Duration;

/// An easing function mapping linear progress in [0, 1] to eased progress.
pub type EasingFn = fn(f32) -> f32;

/// Linear (no easing).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out.
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Cubic ease-in-out.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

const VISCOUS_FLUID_SCALE: f32 = 8.0;

fn viscous_fluid_raw(x: f32) -> f32 {
    let x = x * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        // 1/e: the value of the first branch at x == 1.
        let start = 0.367_879_45_f32;
        let x = 1.0 - (1.0 - x).exp();
        start + x * (1.0 - start)
    }
}

/// Viscous-fluid curve: a quick start that decelerates like a dragged
/// surface coming to rest. Normalized so that `viscous_fluid(1.0) == 1.0`.
pub fn viscous_fluid(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t >= 1.0 {
        return 1.0;
    }
    let normalize = 1.0 / viscous_fluid_raw(1.0);
    (normalize * viscous_fluid_raw(t)).clamp(0.0, 1.0)
}

/// Named easing curves usable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    Linear,
    EaseOut,
    EaseInOut,
    #[default]
    ViscousFluid,
}

impl Easing {
    /// The function implementing this curve.
    #[must_use]
    pub fn function(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseOut => ease_out,
            Self::EaseInOut => ease_in_out,
            Self::ViscousFluid => viscous_fluid,
        }
    }

    /// Apply the curve to a linear fraction.
    #[inline]
    #[must_use]
    pub fn transform(self, t: f32) -> f32 {
        (self.function())(t)
    }
}

/// Round half up (toward positive infinity), so `-32.5` becomes `-32`.
#[inline]
pub(crate) fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

/// Fixed-duration tween of an integer scroll offset.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    start: i32,
    target: i32,
    current: i32,
    duration: Duration,
    easing: Easing,
    finished: bool,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollAnimator {
    /// Create an idle (finished) animator resting at 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: 0,
            target: 0,
            current: 0,
            duration: Duration::ZERO,
            easing: Easing::default(),
            finished: true,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Change the easing curve, including for an animation in flight.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Begin animating from `from` to `to` over `duration`.
    ///
    /// Replaces any animation in flight.
    pub fn start_scroll(&mut self, from: i32, to: i32, duration: Duration) {
        self.start = from;
        self.target = to;
        self.duration = duration;
        if duration.is_zero() {
            self.current = to;
            self.finished = true;
        } else {
            self.current = from;
            self.finished = false;
        }
    }

    /// Sample the animation `elapsed` after it started.
    ///
    /// Returns the current value. When finished, returns the last value.
    pub fn tick(&mut self, elapsed: Duration) -> i32 {
        if self.finished {
            return self.current;
        }
        if elapsed >= self.duration {
            self.current = self.target;
            self.finished = true;
            return self.current;
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let eased = self.easing.transform(progress);
        let distance = (self.target - self.start) as f32;
        self.current = self.start + round_half_up(distance * eased);
        self.current
    }

    /// Whether no animation is in flight.
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Most recently sampled value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> i32 {
        self.current
    }

    /// Value the current (or last) animation ends at.
    #[inline]
    #[must_use]
    pub fn final_value(&self) -> i32 {
        self.target
    }

    /// Stop the animation where it is.
    pub fn abort(&mut self) {
        self.finished = true;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_400: Duration = Duration::from_millis(400);

    #[test]
    fn new_animator_is_finished_and_idle() {
        let mut anim = ScrollAnimator::new();
        assert!(anim.is_finished());
        assert_eq!(anim.tick(MS_100), 0);
        assert_eq!(anim.value(), 0);
    }

    #[test]
    fn linear_tween_hits_midpoint() {
        let mut anim = ScrollAnimator::new().with_easing(Easing::Linear);
        anim.start_scroll(-60, 0, MS_400);
        assert!(!anim.is_finished());
        assert_eq!(anim.tick(Duration::from_millis(200)), -30);
        assert!(!anim.is_finished());
    }

    #[test]
    fn tick_is_idempotent_per_elapsed() {
        let mut anim = ScrollAnimator::new();
        anim.start_scroll(-65, -60, MS_400);
        let a = anim.tick(MS_100);
        let b = anim.tick(MS_100);
        assert_eq!(a, b);
    }

    #[test]
    fn completes_exactly_at_target() {
        let mut anim = ScrollAnimator::new();
        anim.start_scroll(-40, 0, MS_400);
        assert_eq!(anim.tick(MS_400), 0);
        assert!(anim.is_finished());
        assert_eq!(anim.tick(Duration::from_secs(5)), 0);
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let mut anim = ScrollAnimator::new();
        anim.start_scroll(10, 50, Duration::ZERO);
        assert!(anim.is_finished());
        assert_eq!(anim.value(), 50);
    }

    #[test]
    fn abort_freezes_value() {
        let mut anim = ScrollAnimator::new().with_easing(Easing::Linear);
        anim.start_scroll(0, 100, MS_400);
        anim.tick(MS_100);
        anim.abort();
        assert!(anim.is_finished());
        assert_eq!(anim.tick(MS_400), 25);
        assert_eq!(anim.final_value(), 100);
    }

    #[test]
    fn easing_functions_are_monotonic_and_anchored() {
        for easing in [
            Easing::Linear,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::ViscousFluid,
        ] {
            assert!(easing.transform(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.transform(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
            let mut prev = 0.0f32;
            for i in 0..=100 {
                let t = i as f32 / 100.0;
                let v = easing.transform(t);
                assert!(v >= prev - 0.001, "{easing:?} not monotonic at t={t}");
                prev = v;
            }
        }
    }

    #[test]
    fn round_half_up_matches_java_rounding() {
        assert_eq!(round_half_up(-32.5), -32);
        assert_eq!(round_half_up(32.5), 33);
        assert_eq!(round_half_up(-35.0), -35);
        assert_eq!(round_half_up(-0.4), 0);
    }
}
