#![forbid(unsafe_code)]

//! Timing curves for settle animations.
//!
//! The core never runs animations itself: it hands an [`AnimationTiming`] to
//! the host, which may use these primitives (or its own toolkit's) to drive
//! the transition. Every primitive produces a progress value from 0.0 to 1.0.
//!
//! # Invariants
//!
//! 1. `value()` is 0.0 before the first tick.
//! 2. Once `is_complete()` is true, `value()` is exactly 1.0 and further
//!    ticks change nothing until `reset()`.

pub mod spring;

use std::time::Duration;

pub use spring::Spring;

/// A time-driven progress source.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);
    /// Whether the animation has settled.
    fn is_complete(&self) -> bool;
    /// Current progress. Springs may overshoot 1.0 before settling.
    fn value(&self) -> f64;
    /// Return to the initial state.
    fn reset(&mut self);
}

/// Easing function mapping linear progress `[0, 1]` to eased progress.
pub type EasingFn = fn(f64) -> f64;

pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Fixed-duration eased progress.
#[derive(Debug, Clone)]
pub struct Tween {
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Linear tween over `duration` (clamped to at least 1ns).
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration: duration.max(Duration::from_nanos(1)),
            elapsed: Duration::ZERO,
            easing: linear,
        }
    }

    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear (un-eased) progress.
    #[must_use]
    pub fn raw_progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        if self.is_complete() {
            1.0
        } else {
            (self.easing)(self.raw_progress())
        }
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

/// Shape of a settle animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationCurve {
    /// Decelerating curve used when the row leaves the screen.
    EaseOut,
    /// Damped spring used when the row returns to rest.
    Spring {
        /// Damping ratio in `(0, 1]`; lower values bounce more.
        damping: f64,
        /// Initial velocity in whole-distance units per second.
        initial_velocity: f64,
    },
}

/// Duration and curve of one host animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    pub duration: Duration,
    pub curve: AnimationCurve,
}

impl AnimationTiming {
    #[must_use]
    pub fn ease_out(duration: Duration) -> Self {
        Self {
            duration,
            curve: AnimationCurve::EaseOut,
        }
    }

    #[must_use]
    pub fn spring(duration: Duration, damping: f64, initial_velocity: f64) -> Self {
        Self {
            duration,
            curve: AnimationCurve::Spring {
                damping,
                initial_velocity,
            },
        }
    }

    /// A fresh progress source for this timing.
    #[must_use]
    pub fn start(&self) -> Box<dyn Animation> {
        match self.curve {
            AnimationCurve::EaseOut => Box::new(Tween::new(self.duration).easing(ease_out)),
            AnimationCurve::Spring {
                damping,
                initial_velocity,
            } => Box::new(Spring::settling_within(
                self.duration,
                damping,
                initial_velocity,
            )),
        }
    }
}
