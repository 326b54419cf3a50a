#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) progress.
//!
//! Models the classical damped spring with unit mass:
//!
//!   a = -stiffness × (position - target) - damping × velocity
//!
//! Springs here are normalized: they travel from 0.0 toward 1.0.
//!
//! # Parameters
//!
//! - **stiffness** (k): restoring force strength.
//! - **damping** (c): velocity drag. `c < 2√k` oscillates, `c ≥ 2√k` does not.
//! - **deadline**: optional wall-clock budget. A spring with a deadline
//!   completes when the deadline elapses and not before, snapping to the
//!   target even if the oscillation has already died out. Without one, the
//!   spring completes once position and velocity fall under the rest
//!   thresholds.
//!
//! # Integration
//!
//! Semi-implicit Euler, subdivided into steps of at most 4ms.
//!
//! # Invariants
//!
//! 1. Once at rest, `position()` equals the target and velocity is zero.
//! 2. Stiffness is always ≥ 0.1 and damping ≥ 0.
//! 3. `reset()` restores the initial position and velocity.

use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step.
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta below which the spring may come to rest.
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Velocity below which (with the position threshold) the spring rests.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

/// `ln(1 / DEFAULT_REST_THRESHOLD)`: envelope decay needed to reach rest.
const SETTLE_DECAY: f64 = 6.907_755_278_982_137;

/// A normalized damped spring.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    initial_velocity: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    elapsed: Duration,
    deadline: Option<Duration>,
    at_rest: bool,
}

impl Default for Spring {
    fn default() -> Self {
        Self::new()
    }
}

impl Spring {
    /// Spring from 0.0 to 1.0 with stiffness 170 and damping 26.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            initial_velocity: 0.0,
            stiffness: 170.0,
            damping: 26.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            elapsed: Duration::ZERO,
            deadline: None,
            at_rest: false,
        }
    }

    /// Spring described by a damping ratio, tuned to settle within `duration`.
    ///
    /// The natural frequency is chosen so the oscillation envelope decays
    /// to the rest threshold at `duration`; `initial_velocity` is in
    /// whole-distance units per second. Completion happens at `duration`
    /// exactly, never earlier.
    #[must_use]
    pub fn settling_within(duration: Duration, damping_ratio: f64, initial_velocity: f64) -> Self {
        let secs = duration.as_secs_f64().max(1e-3);
        let ratio = damping_ratio.clamp(0.05, 1.0);
        let omega = SETTLE_DECAY / (ratio * secs);
        Self::new()
            .with_stiffness(omega * omega)
            .with_damping(2.0 * ratio * omega)
            .with_initial_velocity(initial_velocity)
            .with_deadline(duration)
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Starting velocity, restored by `reset()`.
    #[must_use]
    pub fn with_initial_velocity(mut self, v: f64) -> Self {
        self.initial_velocity = v;
        self.velocity = v;
        self
    }

    /// Complete at `deadline` and only then, ignoring the rest thresholds.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Damping coefficient at which the spring stops oscillating.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.sqrt()
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - 1.0;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    fn settle(&mut self) {
        self.position = 1.0;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Advance by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest || dt.is_zero() {
            return;
        }

        self.elapsed += dt;
        match self.deadline {
            Some(deadline) if self.elapsed >= deadline => {
                self.settle();
                return;
            }
            _ => {}
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if self.deadline.is_none()
            && (self.position - 1.0).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.settle();
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    /// Unclamped position; underdamped springs overshoot 1.0.
    fn value(&self) -> f64 {
        self.position
    }

    fn reset(&mut self) {
        self.position = 0.0;
        self.velocity = self.initial_velocity;
        self.elapsed = Duration::ZERO;
        self.at_rest = false;
    }
}
