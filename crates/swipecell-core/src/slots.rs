#![forbid(unsafe_code)]

//! Cell configuration: the four action slots.
//!
//! Each [`SwipeState`] other than `None` owns one [`SlotConfig`] holding the
//! icon view, indicator color, mode, and completion bound to it. Slots are
//! independent; configuring one never touches another.
//!
//! # Invariants
//!
//! 1. A slot with [`SwipeMode::None`] is inactive: resolution skips it.
//! 2. A direction whose two slots are both inactive cannot be travelled.
//! 3. [`SwipeSlots::reset`] returns every slot to the empty configuration and
//!    is idempotent.

use bitflags::bitflags;

use crate::color::Color;
use crate::state::{SwipeMode, SwipeState};

bitflags! {
    /// Directions a drag is allowed to travel in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TravelDirections: u8 {
        /// Positive offsets (State1/State2).
        const RIGHT = 0b01;
        /// Negative offsets (State3/State4).
        const LEFT = 0b10;
    }
}

/// One action slot.
///
/// `V` is the host's opaque view handle, `C` the completion callback type.
pub struct SlotConfig<V, C> {
    pub view: Option<V>,
    pub color: Option<Color>,
    pub mode: SwipeMode,
    pub completion: Option<C>,
}

impl<V, C> Default for SlotConfig<V, C> {
    fn default() -> Self {
        Self {
            view: None,
            color: None,
            mode: SwipeMode::None,
            completion: None,
        }
    }
}

impl<V, C> SlotConfig<V, C> {
    /// Whether the slot takes part in resolution.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.mode.is_active()
    }

    /// True when nothing has been configured.
    pub fn is_empty(&self) -> bool {
        self.view.is_none()
            && self.color.is_none()
            && self.mode == SwipeMode::None
            && self.completion.is_none()
    }
}

impl<V: std::fmt::Debug, C> std::fmt::Debug for SlotConfig<V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotConfig")
            .field("view", &self.view)
            .field("color", &self.color)
            .field("mode", &self.mode)
            .field("has_completion", &self.completion.is_some())
            .finish()
    }
}

/// The four slots, indexed by [`SwipeState`].
pub struct SwipeSlots<V, C> {
    slots: [SlotConfig<V, C>; 4],
}

impl<V, C> Default for SwipeSlots<V, C> {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| SlotConfig::default()),
        }
    }
}

impl<V: std::fmt::Debug, C> std::fmt::Debug for SwipeSlots<V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.slots.iter()).finish()
    }
}

impl<V, C> SwipeSlots<V, C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot for `state`. `SwipeState::None` is ignored.
    pub fn set(&mut self, state: SwipeState, view: V, color: Color, mode: SwipeMode, completion: C) {
        if let Some(slot) = self.get_mut(state) {
            *slot = SlotConfig {
                view: Some(view),
                color: Some(color),
                mode,
                completion: Some(completion),
            };
        }
    }

    /// Slot for `state`, if it names one.
    #[inline]
    pub fn get(&self, state: SwipeState) -> Option<&SlotConfig<V, C>> {
        state.slot_index().map(|i| &self.slots[i])
    }

    #[inline]
    pub fn get_mut(&mut self, state: SwipeState) -> Option<&mut SlotConfig<V, C>> {
        state.slot_index().map(|i| &mut self.slots[i])
    }

    /// Configured mode for `state`; `SwipeMode::None` for unconfigured or `None`.
    #[inline]
    pub fn mode(&self, state: SwipeState) -> SwipeMode {
        self.get(state).map_or(SwipeMode::None, |slot| slot.mode)
    }

    /// Whether `state`'s slot is active.
    #[inline]
    pub fn is_active(&self, state: SwipeState) -> bool {
        self.mode(state).is_active()
    }

    /// Indicator color for `state`, if one was configured.
    #[inline]
    pub fn color(&self, state: SwipeState) -> Option<Color> {
        self.get(state).and_then(|slot| slot.color)
    }

    /// Icon view for `state`, if one was configured.
    #[inline]
    pub fn view(&self, state: SwipeState) -> Option<&V> {
        self.get(state).and_then(|slot| slot.view.as_ref())
    }

    /// Directions with at least one active slot.
    pub fn travel_directions(&self) -> TravelDirections {
        let mut dirs = TravelDirections::empty();
        if self.is_active(SwipeState::State1) || self.is_active(SwipeState::State2) {
            dirs |= TravelDirections::RIGHT;
        }
        if self.is_active(SwipeState::State3) || self.is_active(SwipeState::State4) {
            dirs |= TravelDirections::LEFT;
        }
        dirs
    }

    /// Take the completion for `state` out of its slot.
    pub fn take_completion(&mut self, state: SwipeState) -> Option<C> {
        self.get_mut(state).and_then(|slot| slot.completion.take())
    }

    /// Put a completion back, unless the slot was reconfigured meanwhile.
    pub fn restore_completion(&mut self, state: SwipeState, completion: C) {
        if let Some(slot) = self.get_mut(state)
            && slot.completion.is_none()
            && slot.mode.is_active()
        {
            slot.completion = Some(completion);
        }
    }

    /// Clear all four slots.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = SlotConfig::default();
        }
    }

    /// True when every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(SlotConfig::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Slots = SwipeSlots<&'static str, u32>;

    #[test]
    fn new_slots_are_empty_and_blocked() {
        let slots = Slots::new();
        assert!(slots.is_empty());
        assert_eq!(slots.travel_directions(), TravelDirections::empty());
        for state in SwipeState::ALL {
            assert_eq!(slots.mode(state), SwipeMode::None);
        }
    }

    #[test]
    fn set_overwrites_only_its_slot() {
        let mut slots = Slots::new();
        slots.set(SwipeState::State2, "check", Color::GREEN, SwipeMode::Switch, 2);
        slots.set(SwipeState::State4, "cross", Color::RED, SwipeMode::Exit, 4);
        slots.set(SwipeState::State2, "clock", Color::YELLOW, SwipeMode::Exit, 22);

        assert_eq!(slots.view(SwipeState::State2), Some(&"clock"));
        assert_eq!(slots.color(SwipeState::State2), Some(Color::YELLOW));
        assert_eq!(slots.mode(SwipeState::State2), SwipeMode::Exit);
        assert_eq!(slots.mode(SwipeState::State4), SwipeMode::Exit);
        assert_eq!(slots.view(SwipeState::State1), None);
        assert!(slots.get(SwipeState::State3).is_some_and(SlotConfig::is_empty));
    }

    #[test]
    fn none_state_is_ignored() {
        let mut slots = Slots::new();
        slots.set(SwipeState::None, "x", Color::RED, SwipeMode::Exit, 0);
        assert!(slots.is_empty());
        assert_eq!(slots.mode(SwipeState::None), SwipeMode::None);
    }

    #[test]
    fn travel_directions_follow_active_modes() {
        let mut slots = Slots::new();
        slots.set(SwipeState::State2, "a", Color::GREEN, SwipeMode::Switch, 0);
        assert_eq!(slots.travel_directions(), TravelDirections::RIGHT);
        slots.set(SwipeState::State3, "b", Color::RED, SwipeMode::Exit, 0);
        assert_eq!(slots.travel_directions(), TravelDirections::all());
    }

    #[test]
    fn slot_with_none_mode_does_not_open_direction() {
        let mut slots = Slots::new();
        slots.set(SwipeState::State1, "a", Color::GREEN, SwipeMode::None, 0);
        assert_eq!(slots.travel_directions(), TravelDirections::empty());
        assert!(!slots.is_empty());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut slots = Slots::new();
        slots.set(SwipeState::State1, "a", Color::GREEN, SwipeMode::Switch, 1);
        slots.reset();
        assert!(slots.is_empty());
        slots.reset();
        assert!(slots.is_empty());
    }

    #[test]
    fn take_and_restore_completion() {
        let mut slots = Slots::new();
        slots.set(SwipeState::State3, "a", Color::RED, SwipeMode::Exit, 33);
        assert_eq!(slots.take_completion(SwipeState::State3), Some(33));
        assert_eq!(slots.take_completion(SwipeState::State3), None);
        slots.restore_completion(SwipeState::State3, 33);
        assert_eq!(slots.take_completion(SwipeState::State3), Some(33));
    }

    #[test]
    fn restore_skips_cleared_slot() {
        let mut slots = Slots::new();
        slots.set(SwipeState::State1, "a", Color::GREEN, SwipeMode::Switch, 1);
        let taken = slots.take_completion(SwipeState::State1);
        slots.reset();
        if let Some(c) = taken {
            slots.restore_completion(SwipeState::State1, c);
        }
        assert!(slots.is_empty());
    }
}
