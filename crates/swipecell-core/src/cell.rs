#![forbid(unsafe_code)]

//! The swipeable row.
//!
//! [`SwipeCell`] is the surface the embedding list talks to: it stores the
//! four slots, forwards gesture and animation events to the session
//! controller, and fires the bound completion when a session settles.
//!
//! # Invariants
//!
//! 1. A completion fires at most once per session, after its animation has
//!    finished and never during tracking.
//! 2. An exit completion fires before the host is asked to remove the row.
//!    If the completion resets the cell, no removal is requested.
//! 3. [`prepare_for_reuse`](SwipeCell::prepare_for_reuse) returns the cell to
//!    the freshly constructed state (config aside) and is idempotent.
//!
//! # Failure Modes
//!
//! - A completion that reconfigures or resets its own slot is not put back;
//!   the new configuration wins.
//! - [`restore_from_archive`](SwipeCell::restore_from_archive) never succeeds.

use std::fmt;
use std::time::Duration;

use crate::color::Color;
use crate::config::SwipeConfig;
use crate::error::{Result, SwipeError};
use crate::geometry::Point;
use crate::host::{PresentationHost, SettleKind};
use crate::session::{Settled, SwipeEvent, SwipePhase, SwipeSessionController};
use crate::slots::SwipeSlots;
use crate::state::{SwipeMode, SwipeState};
use crate::{debug, debug_span, info, warn};

/// Callback bound to a slot, run with the cell, the settled state and its mode.
pub type SwipeCompletion<H> = Box<dyn FnMut(&mut SwipeCell<H>, SwipeState, SwipeMode)>;

/// One swipeable row bound to a presentation host.
pub struct SwipeCell<H: PresentationHost> {
    host: H,
    config: SwipeConfig,
    slots: SwipeSlots<H::View, SwipeCompletion<H>>,
    controller: SwipeSessionController<H::View>,
}

impl<H: PresentationHost> fmt::Debug for SwipeCell<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeCell")
            .field("config", &self.config)
            .field("slots", &self.slots)
            .field("phase", &self.controller.phase())
            .field("exited", &self.controller.is_exited())
            .finish_non_exhaustive()
    }
}

impl<H: PresentationHost> SwipeCell<H> {
    /// A cell with default tunables and no configured slots.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_config(host, SwipeConfig::default())
    }

    #[must_use]
    pub fn with_config(host: H, config: SwipeConfig) -> Self {
        Self {
            host,
            config,
            slots: SwipeSlots::new(),
            controller: SwipeSessionController::new(),
        }
    }

    /// Bind `view`, `color`, `mode` and `completion` to `state`.
    ///
    /// Overwrites any earlier binding for the same state. `SwipeState::None`
    /// names no slot and is ignored.
    pub fn set_swipe_gesture<F>(
        &mut self,
        view: H::View,
        color: Color,
        mode: SwipeMode,
        state: SwipeState,
        completion: F,
    ) where
        F: FnMut(&mut SwipeCell<H>, SwipeState, SwipeMode) + 'static,
    {
        if state == SwipeState::None {
            warn!(message = "swipe.ignored", reason = "slot for State None");
            return;
        }
        self.slots
            .set(state, view, color, mode, Box::new(completion) as SwipeCompletion<H>);
    }

    // ------------------------------------------------------------------
    // Tunables
    // ------------------------------------------------------------------

    #[inline]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut SwipeConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: SwipeConfig) {
        self.config = config;
    }

    pub fn set_first_trigger(&mut self, fraction: f64) {
        self.config.first_trigger = fraction;
    }

    pub fn set_second_trigger(&mut self, fraction: f64) {
        self.config.second_trigger = fraction;
    }

    pub fn set_damping(&mut self, damping: f64) {
        self.config.damping = damping;
    }

    pub fn set_velocity(&mut self, velocity: f64) {
        self.config.velocity = velocity;
    }

    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.config.animation_duration = duration;
    }

    pub fn set_start_immediately(&mut self, on: bool) {
        self.config.start_immediately = on;
    }

    pub fn set_animate_icons(&mut self, on: bool) {
        self.config.animate_icons = on;
    }

    pub fn set_default_color(&mut self, color: Color) {
        self.config.default_color = color;
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Whether the list should let this cell claim a pan with `velocity`.
    pub fn should_begin(&self, velocity: Point) -> bool {
        self.controller.should_begin(velocity, &self.slots)
    }

    /// Feed one gesture or animation event.
    pub fn handle_event(&mut self, event: SwipeEvent) {
        let _span = debug_span!("swipe.event", phase = ?self.controller.phase()).entered();
        let settled = self
            .controller
            .handle(event, &mut self.host, &self.config, &self.slots);
        if let Some(settled) = settled {
            self.settle(settled);
        }
    }

    fn settle(&mut self, settled: Settled) {
        let Settled { state, mode, kind } = settled;
        match self.slots.take_completion(state) {
            Some(mut completion) => {
                info!(message = "swipe.completion", ?state, ?mode, ?kind);
                completion(self, state, mode);
                self.slots.restore_completion(state, completion);
            }
            None => debug!(message = "swipe.completion", ?state, skipped = true),
        }
        if kind == SettleKind::Exit && self.controller.is_exited() {
            self.host.request_row_removal();
        }
    }

    /// Clear all slots, tear down any overlay and forget the exited flag.
    pub fn prepare_for_reuse(&mut self) {
        self.controller.reset(&mut self.host);
        self.slots.reset();
        debug!(message = "swipe.reuse");
    }

    /// Rebuild a cell from persisted bytes. Cells are never persisted, so
    /// this always fails.
    pub fn restore_from_archive(_bytes: &[u8]) -> Result<Self> {
        Err(SwipeError::ArchiveUnsupported)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[inline]
    pub fn phase(&self) -> SwipePhase {
        self.controller.phase()
    }

    #[inline]
    pub fn is_exited(&self) -> bool {
        self.controller.is_exited()
    }

    /// Snapshot offset in pixels.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.controller.offset()
    }

    /// Percentage of the live session, or 0 when idle.
    pub fn percentage(&self) -> f64 {
        self.controller.session().map_or(0.0, |s| s.percentage)
    }

    #[inline]
    pub fn slots(&self) -> &SwipeSlots<H::View, SwipeCompletion<H>> {
        &self.slots
    }
}
