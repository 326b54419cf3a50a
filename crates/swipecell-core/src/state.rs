#![forbid(unsafe_code)]

//! Direction, state, and mode enums shared by every layer.

/// Which way the row has been dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipeDirection {
    Left,
    Right,
    #[default]
    Center,
}

impl SwipeDirection {
    /// Sign applied to offsets travelling in this direction.
    #[inline]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
            Self::Center => 0.0,
        }
    }
}

/// Action state reached by a swipe.
///
/// `State1`/`State2` are reached by dragging right, `State3`/`State4` by
/// dragging left. The even states need the larger second trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipeState {
    #[default]
    None,
    State1,
    State2,
    State3,
    State4,
}

impl SwipeState {
    /// The four configurable states, in slot order.
    pub const ALL: [SwipeState; 4] = [Self::State1, Self::State2, Self::State3, Self::State4];

    /// Slot index (`0..4`) for a configurable state, `None` for [`SwipeState::None`].
    #[inline]
    pub const fn slot_index(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::State1 => Some(0),
            Self::State2 => Some(1),
            Self::State3 => Some(2),
            Self::State4 => Some(3),
        }
    }

    /// Direction a drag must travel to reach this state.
    #[inline]
    pub const fn direction(self) -> SwipeDirection {
        match self {
            Self::None => SwipeDirection::Center,
            Self::State1 | Self::State2 => SwipeDirection::Right,
            Self::State3 | Self::State4 => SwipeDirection::Left,
        }
    }
}

/// What happens once a swipe is released in a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipeMode {
    /// Slot inactive; its direction cannot be travelled unless the sibling is active.
    #[default]
    None,
    /// The row leaves the screen.
    Exit,
    /// The row springs back to rest.
    Switch,
}

impl SwipeMode {
    #[inline]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }
}
