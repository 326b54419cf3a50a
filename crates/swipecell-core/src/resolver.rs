#![forbid(unsafe_code)]

//! State resolution: percentage + slots → state, mode, color, alpha, icon.
//!
//! # Resolution order
//!
//! State, color, and icon resolution evaluate four checks in a fixed order
//! (slot 1, slot 2, slot 3, slot 4) and let later matches overwrite earlier
//! ones. This is last-write-wins, not a priority table: a second-trigger
//! state beats its first-trigger sibling only because it is checked later.
//!
//! | state  | condition                              |
//! |--------|----------------------------------------|
//! | State1 | `p >  first`  and slot 1 active        |
//! | State2 | `p >= second` and slot 2 active        |
//! | State3 | `p <= -first` and slot 3 active        |
//! | State4 | `p <= -second` and slot 4 active       |
//!
//! Color uses strict comparisons for slots 1–3 (`p > first`, `p > second`,
//! `p < -first`) and `p <= -second` for slot 4.
//!
//! # Invariants
//!
//! 1. With `second > first`, increasing `p` never moves the state backward.
//! 2. Inactive slots are never selected.
//! 3. Alpha is always within `[0, 1]`.

use crate::color::Color;
use crate::config::SwipeConfig;
use crate::geometry::{Point, Rect, Size};
use crate::percentage::{direction_from_percentage, offset_from_percentage};
use crate::slots::{SwipeSlots, TravelDirections};
use crate::state::{SwipeDirection, SwipeMode, SwipeState};

/// Whether the drag may sit at `percentage` given which directions are open.
#[inline]
#[must_use]
pub fn can_travel(percentage: f64, open: TravelDirections) -> bool {
    if percentage > 0.0 && !open.contains(TravelDirections::RIGHT) {
        return false;
    }
    if percentage < 0.0 && !open.contains(TravelDirections::LEFT) {
        return false;
    }
    true
}

/// Linear 0 → 1 ramp over `|p| < first_trigger`, 1 beyond.
#[must_use]
pub fn alpha_from_percentage(percentage: f64, first_trigger: f64) -> f64 {
    if first_trigger <= 0.0 {
        return 1.0;
    }
    if (0.0..first_trigger).contains(&percentage) {
        percentage / first_trigger
    } else if percentage < 0.0 && percentage > -first_trigger {
        (percentage / first_trigger).abs()
    } else {
        1.0
    }
}

/// How the sliding icon should be positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconPlacement {
    /// Follow the content edge while the finger is down.
    Dragging,
    /// Rest position for a row settling back from `direction`.
    Resting(SwipeDirection),
}

/// Read-only view of a cell's config and slots.
pub struct StateResolver<'a, V, C> {
    config: &'a SwipeConfig,
    slots: &'a SwipeSlots<V, C>,
}

impl<'a, V, C> StateResolver<'a, V, C> {
    pub fn new(config: &'a SwipeConfig, slots: &'a SwipeSlots<V, C>) -> Self {
        Self { config, slots }
    }

    /// See [`can_travel`].
    #[inline]
    pub fn can_travel(&self, percentage: f64) -> bool {
        can_travel(percentage, self.slots.travel_directions())
    }

    /// Furthest offsets reachable given travel blocking: `(min, max)`.
    pub fn travel_bounds(&self, width: f64) -> (f64, f64) {
        let open = self.slots.travel_directions();
        let width = width.max(0.0);
        let min = if open.contains(TravelDirections::LEFT) {
            -width
        } else {
            0.0
        };
        let max = if open.contains(TravelDirections::RIGHT) {
            width
        } else {
            0.0
        };
        (min, max)
    }

    pub fn state(&self, percentage: f64) -> SwipeState {
        let first = self.config.first_trigger;
        let second = self.config.second_trigger;
        let mut state = SwipeState::None;

        if percentage > first && self.slots.is_active(SwipeState::State1) {
            state = SwipeState::State1;
        }
        if percentage >= second && self.slots.is_active(SwipeState::State2) {
            state = SwipeState::State2;
        }
        if percentage <= -first && self.slots.is_active(SwipeState::State3) {
            state = SwipeState::State3;
        }
        if percentage <= -second && self.slots.is_active(SwipeState::State4) {
            state = SwipeState::State4;
        }

        state
    }

    /// Configured mode for `state`.
    #[inline]
    pub fn mode(&self, state: SwipeState) -> SwipeMode {
        self.slots.mode(state)
    }

    /// Mode used to choose between exiting and reverting at release.
    ///
    /// State3 has no entry in this lookup, so a State3 release always
    /// springs back whatever slot 3's mode is. The completion still receives
    /// [`mode`](Self::mode).
    pub fn release_mode(&self, state: SwipeState) -> SwipeMode {
        match state {
            SwipeState::State1 | SwipeState::State2 | SwipeState::State4 => self.mode(state),
            SwipeState::State3 | SwipeState::None => SwipeMode::None,
        }
    }

    pub fn color(&self, percentage: f64) -> Color {
        let first = self.config.first_trigger;
        let second = self.config.second_trigger;
        let immediate = self.config.start_immediately;
        let mut color = self.config.default_color;

        if (percentage > first || (immediate && percentage > 0.0))
            && self.slots.is_active(SwipeState::State1)
        {
            color = self.slots.color(SwipeState::State1).unwrap_or(color);
        }
        if percentage > second && self.slots.is_active(SwipeState::State2) {
            color = self.slots.color(SwipeState::State2).unwrap_or(color);
        }
        if (percentage < -first || (immediate && percentage < 0.0))
            && self.slots.is_active(SwipeState::State3)
        {
            color = self.slots.color(SwipeState::State3).unwrap_or(color);
        }
        if percentage <= -second && self.slots.is_active(SwipeState::State4) {
            color = self.slots.color(SwipeState::State4).unwrap_or(color);
        }

        color
    }

    /// See [`alpha_from_percentage`].
    #[inline]
    pub fn alpha(&self, percentage: f64) -> f64 {
        alpha_from_percentage(percentage, self.config.first_trigger)
    }

    /// State whose icon is shown at `percentage`.
    ///
    /// Unlike [`state`](Self::state) this has no dead zone: slot 1's icon
    /// shows from `p >= 0`, slot 3's from `p < 0`.
    pub fn icon_state(&self, percentage: f64) -> SwipeState {
        let second = self.config.second_trigger;
        let mut state = SwipeState::None;

        if percentage >= 0.0 && self.slots.is_active(SwipeState::State1) {
            state = SwipeState::State1;
        }
        if percentage >= second && self.slots.is_active(SwipeState::State2) {
            state = SwipeState::State2;
        }
        if percentage < 0.0 && self.slots.is_active(SwipeState::State3) {
            state = SwipeState::State3;
        }
        if percentage <= -second && self.slots.is_active(SwipeState::State4) {
            state = SwipeState::State4;
        }

        state
    }

    /// Icon view shown at `percentage`, if its slot has one.
    pub fn icon_view(&self, percentage: f64) -> Option<&'a V> {
        self.slots.view(self.icon_state(percentage))
    }

    /// Frame of an icon of `icon_size` inside a row of `bounds`.
    ///
    /// Returns `None` when a resting icon has no direction to rest on.
    pub fn icon_frame(
        &self,
        percentage: f64,
        icon_size: Size,
        bounds: Size,
        placement: IconPlacement,
    ) -> Option<Rect> {
        let width = bounds.width;
        let first = self.config.first_trigger;
        let near = offset_from_percentage(first / 2.0, width);

        let x = match placement {
            IconPlacement::Dragging if self.config.animate_icons => {
                if (0.0..first).contains(&percentage) {
                    near
                } else if percentage >= first {
                    offset_from_percentage(percentage - first / 2.0, width)
                } else if percentage < 0.0 && percentage >= -first {
                    width - near
                } else {
                    width + offset_from_percentage(percentage + first / 2.0, width)
                }
            }
            IconPlacement::Dragging => {
                if percentage >= 0.0 {
                    near
                } else {
                    width - near
                }
            }
            IconPlacement::Resting(direction) => match direction {
                SwipeDirection::Right => near,
                SwipeDirection::Left => width - near,
                SwipeDirection::Center => return None,
            },
        };

        let center = Point::new(x, bounds.height / 2.0);
        Some(Rect::centered_at(center, icon_size).integral())
    }

    /// Direction implied by `percentage`.
    #[inline]
    pub fn direction(&self, percentage: f64) -> SwipeDirection {
        direction_from_percentage(percentage)
    }
}
