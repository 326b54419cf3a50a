#![forbid(unsafe_code)]

//! Swipe session state machine.
//!
//! [`SwipeSessionController`] turns pan-gesture events into overlay
//! movements and, on release, into an exit or revert animation.
//!
//! # State Machine
//!
//! ```text
//!            Began/Changed                 Ended/Cancelled
//!   Idle ───────────────────▶ Tracking ─────────────────────┐
//!    ▲                          │  ▲ Changed                │
//!    │                          └──┘                        ▼
//!    │       AnimationFinished           ┌──── Exiting (release mode Exit,
//!    └───────────────────────────────────┤               direction ≠ Center)
//!                                        └──── Reverting (anything else)
//! ```
//!
//! # Invariants
//!
//! 1. At most one session exists; events for a new gesture are ignored
//!    until the previous session has settled back to `Idle`.
//! 2. The snapshot is captured once per overlay; re-entering `Tracking`
//!    with an overlay installed does not capture again.
//! 3. Every settled session yields exactly one [`Settled`], carrying the
//!    state and mode computed at release.
//! 4. After an exit the controller stays exited (all gesture events are
//!    ignored) and keeps its overlay until [`reset`](SwipeSessionController::reset).
//! 5. The offset never leaves the travel bounds of the current slots.
//!
//! # Failure Modes
//!
//! - `AnimationFinished` with an unknown or stale id is ignored.
//! - `Ended`/`Cancelled` without a tracked gesture is ignored.
//! - A gesture during an in-flight animation is ignored; animations are not
//!   preemptible.
//! - A `Began` that [`should_begin`](SwipeSessionController::should_begin)
//!   refuses (vertical, or rightward with no rightward slot) is dropped
//!   together with the rest of its gesture, up to the next
//!   `Ended`/`Cancelled`.

use crate::animation::AnimationTiming;
use crate::config::SwipeConfig;
use crate::geometry::Point;
use crate::host::{AnimationId, AnimationRequest, OverlayFrame, OverlayLayers, PresentationHost, SettleKind};
use crate::percentage::{direction_from_percentage, duration_from_velocity, percentage_from_offset};
use crate::resolver::{IconPlacement, StateResolver};
use crate::slots::{SwipeSlots, TravelDirections};
use crate::state::{SwipeDirection, SwipeMode, SwipeState};
use crate::{debug, info, trace};

/// Discrete input to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeEvent {
    /// Pan recognized; `translation` is the movement since the last event.
    Began { translation: Point, velocity: Point },
    /// Pan moved by `translation` since the last event.
    Changed { translation: Point, velocity: Point },
    /// Finger lifted.
    Ended { velocity: Point },
    /// Pan cancelled by the system; handled exactly like `Ended`.
    Cancelled { velocity: Point },
    /// A requested animation settled.
    AnimationFinished(AnimationId),
}

/// Controller lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipePhase {
    #[default]
    Idle,
    Tracking,
    Exiting,
    Reverting,
}

/// Release decision captured when the finger lifts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub state: SwipeState,
    /// Mode configured for `state`; handed to the completion.
    pub mode: SwipeMode,
    pub direction: SwipeDirection,
    pub percentage: f64,
    pub kind: SettleKind,
    pub animation: AnimationId,
}

/// A session that finished animating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settled {
    pub state: SwipeState,
    pub mode: SwipeMode,
    pub kind: SettleKind,
}

/// Installed overlay: lives from Tracking entry until revert or reset.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Overlay {
    offset: f64,
}

/// One gesture, from first movement to settle.
#[derive(Debug, Clone)]
pub struct SwipeSession<V> {
    pub percentage: f64,
    pub direction: SwipeDirection,
    pub active_view: Option<V>,
    pub release: Option<Release>,
}

impl<V> SwipeSession<V> {
    fn new() -> Self {
        Self {
            percentage: 0.0,
            direction: SwipeDirection::Center,
            active_view: None,
            release: None,
        }
    }
}

/// Drives one cell's swipe sessions.
#[derive(Debug, Clone)]
pub struct SwipeSessionController<V> {
    phase: SwipePhase,
    overlay: Option<Overlay>,
    session: Option<SwipeSession<V>>,
    exited: bool,
    rejected: bool,
    next_animation: u64,
}

impl<V> Default for SwipeSessionController<V> {
    fn default() -> Self {
        Self {
            phase: SwipePhase::Idle,
            overlay: None,
            session: None,
            exited: false,
            rejected: false,
            next_animation: 0,
        }
    }
}

impl<V: Clone> SwipeSessionController<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    /// Whether the row has exited and is waiting for reuse.
    #[inline]
    pub fn is_exited(&self) -> bool {
        self.exited
    }

    /// Whether overlay layers are installed in the host.
    #[inline]
    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Current snapshot offset in pixels (0 when no overlay).
    #[inline]
    pub fn offset(&self) -> f64 {
        self.overlay.map_or(0.0, |o| o.offset)
    }

    #[inline]
    pub fn session(&self) -> Option<&SwipeSession<V>> {
        self.session.as_ref()
    }

    /// Whether a pan with `velocity` should be recognized at all.
    ///
    /// Vertical pans are always refused so the list keeps scrolling, and a
    /// rightward pan is refused when no rightward slot is active.
    pub fn should_begin<C>(&self, velocity: Point, slots: &SwipeSlots<V, C>) -> bool {
        if !velocity.is_horizontal() {
            return false;
        }
        if velocity.x > 0.0 && !slots.travel_directions().contains(TravelDirections::RIGHT) {
            return false;
        }
        true
    }

    /// Feed one event. Returns the settled session when an animation completes.
    ///
    /// A `Began` arriving while idle goes through
    /// [`should_begin`](Self::should_begin) first; a refused gesture moves
    /// nothing until it ends.
    pub fn handle<H, C>(
        &mut self,
        event: SwipeEvent,
        host: &mut H,
        config: &SwipeConfig,
        slots: &SwipeSlots<V, C>,
    ) -> Option<Settled>
    where
        H: PresentationHost<View = V>,
    {
        match event {
            SwipeEvent::AnimationFinished(id) => return self.finish(id, host),
            _ if self.exited => {
                trace!(message = "swipe.ignored", reason = "exited");
            }
            SwipeEvent::Began { velocity, .. }
                if self.phase == SwipePhase::Idle && !self.should_begin(velocity, slots) =>
            {
                self.rejected = true;
                trace!(message = "swipe.ignored", reason = "not recognized");
            }
            SwipeEvent::Changed { .. } if self.rejected => {
                trace!(message = "swipe.ignored", reason = "not recognized");
            }
            SwipeEvent::Began { translation, .. } | SwipeEvent::Changed { translation, .. } => {
                self.rejected = false;
                self.track(translation.x, host, config, slots);
            }
            SwipeEvent::Ended { .. } | SwipeEvent::Cancelled { .. } if self.rejected => {
                self.rejected = false;
                trace!(message = "swipe.ignored", reason = "not recognized");
            }
            SwipeEvent::Ended { velocity } | SwipeEvent::Cancelled { velocity } => {
                self.release(velocity, host, config, slots);
            }
        }
        None
    }

    fn track<H, C>(&mut self, dx: f64, host: &mut H, config: &SwipeConfig, slots: &SwipeSlots<V, C>)
    where
        H: PresentationHost<View = V>,
    {
        match self.phase {
            SwipePhase::Exiting | SwipePhase::Reverting => {
                trace!(message = "swipe.ignored", reason = "animating");
                return;
            }
            SwipePhase::Idle => self.begin(host, config),
            SwipePhase::Tracking => {}
        }

        let resolver = StateResolver::new(config, slots);
        let width = host.bounds().width;
        let current = self.offset();
        let (min, max) = resolver.travel_bounds(width);
        let next = (current + dx).clamp(min, max);

        if next == current {
            if dx != 0.0 {
                trace!(message = "swipe.gesture.pinned", offset = current, dx);
            }
            return;
        }

        if let Some(overlay) = self.overlay.as_mut() {
            overlay.offset = next;
        }
        host.set_snapshot_offset(next);

        let percentage = percentage_from_offset(next, width);
        self.render_drag(percentage, host, &resolver);
        if let Some(session) = self.session.as_mut() {
            session.percentage = percentage;
            session.direction = direction_from_percentage(percentage);
        }
    }

    fn begin<H>(&mut self, host: &mut H, config: &SwipeConfig)
    where
        H: PresentationHost<View = V>,
    {
        if self.overlay.is_none() {
            let snapshot = host.capture_snapshot();
            host.install_overlay(OverlayLayers {
                snapshot,
                indicator_color: config.default_color,
            });
            self.overlay = Some(Overlay { offset: 0.0 });
        }
        self.session = Some(SwipeSession::new());
        self.phase = SwipePhase::Tracking;
        debug!(message = "swipe.session.begin", width = host.bounds().width);
    }

    fn render_drag<H, C>(&self, percentage: f64, host: &mut H, resolver: &StateResolver<'_, V, C>)
    where
        H: PresentationHost<View = V>,
    {
        if let Some(view) = resolver.icon_view(percentage) {
            host.set_icon(view);
            host.set_icon_alpha(resolver.alpha(percentage));
            let size = host.view_size(view);
            if let Some(frame) =
                resolver.icon_frame(percentage, size, host.bounds(), IconPlacement::Dragging)
            {
                host.set_icon_frame(frame);
            }
        }
        host.set_indicator_color(resolver.color(percentage));
    }

    fn release<H, C>(
        &mut self,
        velocity: Point,
        host: &mut H,
        config: &SwipeConfig,
        slots: &SwipeSlots<V, C>,
    ) where
        H: PresentationHost<View = V>,
    {
        if self.phase != SwipePhase::Tracking {
            trace!(message = "swipe.ignored", reason = "not tracking");
            return;
        }

        let resolver = StateResolver::new(config, slots);
        let bounds = host.bounds();
        let percentage = percentage_from_offset(self.offset(), bounds.width);
        let direction = direction_from_percentage(percentage);
        let active_view = resolver.icon_view(percentage).cloned();
        let state = resolver.state(percentage);
        let mode = resolver.mode(state);
        let exits = resolver.release_mode(state) == SwipeMode::Exit
            && direction != SwipeDirection::Center;

        let id = AnimationId(self.next_animation);
        self.next_animation += 1;

        let request = if exits {
            self.exited = true;
            self.phase = SwipePhase::Exiting;
            let origin = bounds.width * direction.sign();
            let end = percentage_from_offset(origin, bounds.width);
            let icon_frame = active_view.as_ref().and_then(|view| {
                resolver.icon_frame(end, host.view_size(view), bounds, IconPlacement::Dragging)
            });
            info!(message = "swipe.exit", ?state, ?direction, percentage);
            AnimationRequest {
                id,
                kind: SettleKind::Exit,
                timing: AnimationTiming::ease_out(duration_from_velocity(velocity.x, bounds.width)),
                target: OverlayFrame {
                    snapshot_offset: origin,
                    indicator_color: None,
                    icon_alpha: 0.0,
                    icon_frame,
                },
            }
        } else {
            self.phase = SwipePhase::Reverting;
            let icon_frame = active_view.as_ref().and_then(|view| {
                resolver.icon_frame(
                    0.0,
                    host.view_size(view),
                    bounds,
                    IconPlacement::Resting(direction),
                )
            });
            info!(message = "swipe.revert", ?state, ?direction, percentage);
            AnimationRequest {
                id,
                kind: SettleKind::Revert,
                timing: AnimationTiming::spring(
                    config.animation_duration,
                    config.damping,
                    config.velocity,
                ),
                target: OverlayFrame {
                    snapshot_offset: 0.0,
                    indicator_color: Some(config.default_color),
                    icon_alpha: 0.0,
                    icon_frame,
                },
            }
        };

        debug!(message = "swipe.release", ?state, ?mode, ?direction, percentage);
        if let Some(session) = self.session.as_mut() {
            session.percentage = percentage;
            session.direction = direction;
            session.active_view = active_view;
            session.release = Some(Release {
                state,
                mode,
                direction,
                percentage,
                kind: request.kind,
                animation: id,
            });
        }
        host.animate(request);
    }

    fn finish<H>(&mut self, id: AnimationId, host: &mut H) -> Option<Settled>
    where
        H: PresentationHost<View = V>,
    {
        let release = self
            .session
            .as_ref()
            .and_then(|s| s.release)
            .filter(|r| r.animation == id);
        let Some(release) = release else {
            trace!(message = "swipe.ignored", reason = "stale animation", %id);
            return None;
        };

        match release.kind {
            SettleKind::Revert => {
                self.exited = false;
                host.remove_overlay();
                self.overlay = None;
            }
            SettleKind::Exit => {
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.offset = host.bounds().width * release.direction.sign();
                }
            }
        }
        self.session = None;
        self.phase = SwipePhase::Idle;

        Some(Settled {
            state: release.state,
            mode: release.mode,
            kind: release.kind,
        })
    }

    /// Drop the session and overlay and clear the exited flag.
    pub fn reset<H>(&mut self, host: &mut H)
    where
        H: PresentationHost<View = V>,
    {
        if self.overlay.take().is_some() {
            host.remove_overlay();
        }
        self.session = None;
        self.exited = false;
        self.rejected = false;
        self.phase = SwipePhase::Idle;
    }
}
