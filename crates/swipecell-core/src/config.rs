#![forbid(unsafe_code)]

//! Thresholds and animation settings.
//!
//! Every field defaults to the stock cell behaviour, so
//! `SwipeConfig::default()` is what an unconfigured cell uses.
//!
//! # Loading
//!
//! With the `config-file` feature the config can be read from TOML or JSON.
//! Missing keys keep their defaults:
//!
//! ```toml
//! first_trigger = 0.2
//! second_trigger = 0.6
//! animation_duration = 0.3   # seconds
//! default_color = "#f2f2f2"
//! ```
//!
//! ```rust,ignore
//! let config = SwipeConfig::from_toml_file("swipe.toml")?.checked()?;
//! ```

#[cfg(feature = "config-file")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Result, SwipeError};

/// Percentage at which State1/State3 engage.
pub const DEFAULT_FIRST_TRIGGER: f64 = 0.15;
/// Percentage at which State2/State4 engage.
pub const DEFAULT_SECOND_TRIGGER: f64 = 0.47;
/// Spring damping ratio of the revert animation.
pub const DEFAULT_DAMPING: f64 = 0.6;
/// Initial spring velocity of the revert animation.
pub const DEFAULT_VELOCITY: f64 = 0.9;
/// Duration of the revert animation.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(400);

/// Per-cell tunables.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct SwipeConfig {
    /// Fraction of the width that engages State1/State3 (default: 0.15).
    pub first_trigger: f64,
    /// Fraction of the width that engages State2/State4 (default: 0.47).
    pub second_trigger: f64,
    /// Revert spring damping ratio (default: 0.6).
    pub damping: f64,
    /// Revert spring initial velocity (default: 0.9).
    pub velocity: f64,
    /// Revert animation duration (default: 0.4s).
    #[cfg_attr(feature = "config-file", serde(with = "duration_secs"))]
    pub animation_duration: Duration,
    /// Show the first slot's color as soon as the row moves (default: false).
    pub start_immediately: bool,
    /// Slide the icon along with the content (default: true).
    pub animate_icons: bool,
    /// Indicator color when no threshold is crossed (default: white).
    pub default_color: Color,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            first_trigger: DEFAULT_FIRST_TRIGGER,
            second_trigger: DEFAULT_SECOND_TRIGGER,
            damping: DEFAULT_DAMPING,
            velocity: DEFAULT_VELOCITY,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            start_immediately: false,
            animate_icons: true,
            default_color: Color::WHITE,
        }
    }
}

impl SwipeConfig {
    #[must_use]
    pub fn with_first_trigger(mut self, fraction: f64) -> Self {
        self.first_trigger = fraction;
        self
    }

    #[must_use]
    pub fn with_second_trigger(mut self, fraction: f64) -> Self {
        self.second_trigger = fraction;
        self
    }

    #[must_use]
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    #[must_use]
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    #[must_use]
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    #[must_use]
    pub fn with_start_immediately(mut self, on: bool) -> Self {
        self.start_immediately = on;
        self
    }

    #[must_use]
    pub fn with_animate_icons(mut self, on: bool) -> Self {
        self.animate_icons = on;
        self
    }

    #[must_use]
    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    /// Check every parameter is within a sensible range.
    ///
    /// Returns one message per problem; empty means valid. A second trigger
    /// below the first is reported but left as is: resolution order is
    /// fixed, so such a config behaves in an undefined (but safe) way.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.first_trigger > 0.0 && self.first_trigger <= 1.0) {
            errors.push(format!(
                "first_trigger must be in (0, 1], got {}",
                self.first_trigger
            ));
        }
        if !(self.second_trigger > 0.0 && self.second_trigger <= 1.0) {
            errors.push(format!(
                "second_trigger must be in (0, 1], got {}",
                self.second_trigger
            ));
        }
        if self.second_trigger < self.first_trigger {
            errors.push(format!(
                "second_trigger ({}) must not be below first_trigger ({})",
                self.second_trigger, self.first_trigger
            ));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            errors.push(format!("damping must be in (0, 1], got {}", self.damping));
        }
        if !self.velocity.is_finite() {
            errors.push(format!("velocity must be finite, got {}", self.velocity));
        }
        if self.animation_duration.is_zero() {
            errors.push("animation_duration must be > 0".into());
        }

        errors
    }

    /// `self` if [`validate`](Self::validate) finds nothing, else the first problem.
    pub fn checked(self) -> Result<Self> {
        match self.validate().into_iter().next() {
            None => Ok(self),
            Some(message) => Err(SwipeError::invalid(message)),
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(SwipeError::ConfigToml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(SwipeError::ConfigJson)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config-file")]
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(SwipeError::ConfigTomlSer)
    }
}

/// Serde adapter storing a `Duration` as fractional seconds.
#[cfg(feature = "config-file")]
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
