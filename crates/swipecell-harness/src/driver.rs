#![forbid(unsafe_code)]

//! Frame-by-frame playback of queued host animations.
//!
//! The driver stands in for a UI toolkit's animation engine: it pops the
//! next [`AnimationRequest`] from a [`RecordingHost`], steps the request's
//! curve at a fixed frame interval, interpolates the overlay, and reports
//! the finished animation back to the cell.
//!
//! # Invariants
//!
//! 1. Each request is played to completion and reported exactly once.
//! 2. The final frame applies the request's target values exactly.
//! 3. Playback always terminates: springs carry a deadline and a frame
//!    budget caps anything else.

use std::time::Duration;

use swipecell_core::geometry::Rect;
use swipecell_core::host::{AnimationId, AnimationRequest, OverlayFrame};
use swipecell_core::{Color, SwipeCell, SwipeEvent};
use tracing::{debug, trace};

use crate::recording_host::{OverlayModel, RecordingHost};

/// Frame interval of a 60 Hz display.
pub const FRAME_60HZ: Duration = Duration::from_micros(16_667);

/// Frames allowed per second of nominal duration before giving up.
const FRAME_BUDGET_FACTOR: u32 = 4;

/// What a single playback looked like.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    pub id: AnimationId,
    pub frames: usize,
    /// Snapshot offset after every frame, including the final one.
    pub offsets: Vec<f64>,
}

impl Playback {
    /// Largest distance from zero the snapshot reached.
    pub fn peak_offset(&self) -> f64 {
        self.offsets.iter().fold(0.0f64, |acc, o| acc.max(o.abs()))
    }

    pub fn final_offset(&self) -> Option<f64> {
        self.offsets.last().copied()
    }
}

/// Fixed-step animation player.
#[derive(Debug, Clone, Copy)]
pub struct AnimationDriver {
    frame: Duration,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(FRAME_60HZ)
    }
}

impl AnimationDriver {
    #[must_use]
    pub fn new(frame: Duration) -> Self {
        Self {
            frame: frame.max(Duration::from_micros(100)),
        }
    }

    #[inline]
    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Play `request` against the host's overlay without notifying anyone.
    pub fn play(&self, host: &mut RecordingHost, request: &AnimationRequest) -> Playback {
        let Some(start) = host.overlay().cloned() else {
            debug!(message = "driver.play.no_overlay", id = %request.id);
            return Playback {
                id: request.id,
                frames: 0,
                offsets: Vec::new(),
            };
        };

        let mut animation = request.timing.start();
        let budget = self.frame_budget(request.timing.duration);
        let mut offsets = Vec::new();
        let mut frames = 0usize;

        while !animation.is_complete() && frames < budget {
            animation.tick(self.frame);
            frames += 1;
            let t = animation.value();
            if let Some(overlay) = host.overlay_mut() {
                interpolate(overlay, &start, &request.target, t);
                offsets.push(overlay.snapshot_offset);
            }
            trace!(message = "driver.frame", id = %request.id, frame = frames, t);
        }

        if let Some(overlay) = host.overlay_mut() {
            overlay.apply(&request.target);
            offsets.push(overlay.snapshot_offset);
        }
        debug!(message = "driver.play.done", id = %request.id, frames);

        Playback {
            id: request.id,
            frames,
            offsets,
        }
    }

    /// Play every queued animation on the cell's host and report each one
    /// back, including animations queued by completions along the way.
    pub fn settle(&self, cell: &mut SwipeCell<RecordingHost>) -> Vec<Playback> {
        let mut played = Vec::new();
        while let Some(request) = cell.host_mut().next_animation() {
            let playback = self.play(cell.host_mut(), &request);
            cell.handle_event(SwipeEvent::AnimationFinished(request.id));
            played.push(playback);
        }
        played
    }

    fn frame_budget(&self, duration: Duration) -> usize {
        let nominal = duration.as_secs_f64() / self.frame.as_secs_f64();
        (nominal.ceil() as usize + 1) * FRAME_BUDGET_FACTOR as usize
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

fn lerp_rect(from: Rect, to: Rect, t: f64) -> Rect {
    Rect::new(
        lerp(from.x, to.x, t),
        lerp(from.y, to.y, t),
        lerp(from.width, to.width, t),
        lerp(from.height, to.height, t),
    )
}

/// Blend `overlay` between `start` and `target` at progress `t`.
///
/// Position may overshoot (`t` outside `[0, 1]` for springs); color and
/// alpha are clamped.
fn interpolate(overlay: &mut OverlayModel, start: &OverlayModel, target: &OverlayFrame, t: f64) {
    let unit = t.clamp(0.0, 1.0);
    overlay.snapshot_offset = lerp(start.snapshot_offset, target.snapshot_offset, t);
    if let Some(color) = target.indicator_color {
        overlay.indicator_color = Color::lerp(start.indicator_color, color, unit);
    }
    overlay.icon_alpha = lerp(start.icon_alpha, target.icon_alpha, unit).clamp(0.0, 1.0);
    if let (Some(from), Some(to)) = (start.icon_frame, target.icon_frame) {
        overlay.icon_frame = Some(lerp_rect(from, to, t));
    }
}
