#![forbid(unsafe_code)]

//! Pixel offset ⇄ normalized percentage conversions.
//!
//! A percentage is the row's horizontal displacement divided by its width,
//! clamped to `[-1, 1]`. Positive values mean the content moved right.
//!
//! # Invariants
//!
//! 1. [`percentage_from_offset`] always returns a value in `[-1, 1]`.
//! 2. [`offset_from_percentage`] always returns a value in `[-width, width]`.
//! 3. A non-positive width is treated as "no room": both conversions return 0
//!    instead of dividing by zero.

use std::time::Duration;

use crate::state::SwipeDirection;

/// Shortest duration term of the velocity mapping.
const MIN_DURATION_SECS: f64 = 0.1;
/// Span term of the velocity mapping.
const DURATION_SPAN_SECS: f64 = 0.25;

/// Offset in pixels for `percentage` of `width`, clamped to `[-width, width]`.
#[inline]
#[must_use]
pub fn offset_from_percentage(percentage: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    (percentage * width).clamp(-width, width)
}

/// Percentage of `width` covered by `offset`, clamped to `[-1, 1]`.
#[inline]
#[must_use]
pub fn percentage_from_offset(offset: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    (offset / width).clamp(-1.0, 1.0)
}

/// Exit animation duration for a release with horizontal velocity `vx`.
///
/// `vx` is clamped to `[-width, width]` and mapped affinely:
/// `(0.1 + 0.25) - (vx / width) * (0.1 - 0.25)`.
#[must_use]
pub fn duration_from_velocity(vx: f64, width: f64) -> Duration {
    let ratio = if width <= 0.0 {
        0.0
    } else {
        vx.clamp(-width, width) / width
    };
    let secs = (MIN_DURATION_SECS + DURATION_SPAN_SECS)
        - ratio * (MIN_DURATION_SECS - DURATION_SPAN_SECS);
    Duration::from_secs_f64(secs)
}

/// Direction implied by the sign of `percentage`.
#[inline]
#[must_use]
pub fn direction_from_percentage(percentage: f64) -> SwipeDirection {
    if percentage < 0.0 {
        SwipeDirection::Left
    } else if percentage > 0.0 {
        SwipeDirection::Right
    } else {
        SwipeDirection::Center
    }
}
