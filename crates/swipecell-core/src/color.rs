#![forbid(unsafe_code)]

//! RGBA color packed into a `u32` (`0xRRGGBBAA`).

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

/// An RGBA color, 8 bits per channel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "config-file",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Color(pub u32);

impl Color {
    pub const CLEAR: Self = Self::rgba(0, 0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const RED: Self = Self::rgb(232, 61, 14);
    pub const GREEN: Self = Self::rgb(85, 213, 80);
    pub const YELLOW: Self = Self::rgb(254, 217, 56);
    pub const BROWN: Self = Self::rgb(206, 149, 98);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Per-channel linear interpolation; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, target: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| -> u8 {
            let v = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Color::rgba(
            mix(self.r(), target.r()),
            mix(self.g(), target.g()),
            mix(self.b(), target.b()),
            mix(self.a(), target.a()),
        )
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({self})")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

/// Error returned when a `#rrggbb` / `#rrggbbaa` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}: expected #rrggbb or #rrggbbaa")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let err = || ParseColorError(s.to_string());
        if !matches!(hex.len(), 6 | 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| err())?;
        if hex.len() == 6 {
            Ok(Color((value << 8) | 0xff))
        } else {
            Ok(Color(value))
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
