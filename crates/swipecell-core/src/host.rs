#![forbid(unsafe_code)]

//! The presentation host contract.
//!
//! The core owns no pixels. Everything visible (the content snapshot, the
//! color indicator behind it, the sliding icon) lives in the host and is
//! manipulated through [`PresentationHost`]. The layers form one overlay:
//!
//! ```text
//!   ┌──────────────── row bounds ────────────────┐
//!   │ indicator (color)   [icon]                 │
//!   │        ┌── snapshot, shifted by offset ──────┐
//!   └────────┴─────────────────────────────────────┘
//! ```
//!
//! # Animation protocol
//!
//! [`PresentationHost::animate`] only schedules a transition. When the
//! transition has visually settled the host must deliver
//! [`SwipeEvent::AnimationFinished`](crate::session::SwipeEvent) carrying the
//! request's [`AnimationId`], exactly once, on the same thread that delivers
//! gesture events.

use std::fmt;

use crate::animation::AnimationTiming;
use crate::color::Color;
use crate::geometry::{Rect, Size};

/// Identifies one scheduled animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anim#{}", self.0)
    }
}

/// Why an animation was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettleKind {
    /// The row slides fully off screen.
    Exit,
    /// The row springs back to offset 0.
    Revert,
}

/// Layers installed when tracking starts.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayers<I> {
    /// Static image of the row content, drawn on top.
    pub snapshot: I,
    /// Initial color of the indicator behind the snapshot.
    pub indicator_color: Color,
}

/// End values of an animated transition.
///
/// `None` fields are left as they are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    pub snapshot_offset: f64,
    pub indicator_color: Option<Color>,
    pub icon_alpha: f64,
    pub icon_frame: Option<Rect>,
}

/// A transition the host should run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    pub id: AnimationId,
    pub kind: SettleKind,
    pub timing: AnimationTiming,
    pub target: OverlayFrame,
}

/// Rendering collaborator driven by a swipe cell.
///
/// All methods are called on the UI thread. Installation and removal must
/// tolerate repeated calls.
pub trait PresentationHost {
    /// Opaque handle to an icon view.
    type View: Clone + PartialEq + fmt::Debug;
    /// Bitmap produced by [`capture_snapshot`](Self::capture_snapshot).
    type Image;

    /// Current row bounds.
    fn bounds(&self) -> Size;

    /// Intrinsic size of an icon view.
    fn view_size(&self, view: &Self::View) -> Size;

    /// Render the row's current content into a static image.
    fn capture_snapshot(&mut self) -> Self::Image;

    fn install_overlay(&mut self, layers: OverlayLayers<Self::Image>);

    fn remove_overlay(&mut self);

    /// Move the snapshot's left edge to `offset`.
    fn set_snapshot_offset(&mut self, offset: f64);

    fn set_indicator_color(&mut self, color: Color);

    /// Replace the sliding layer's content with `view`.
    fn set_icon(&mut self, view: &Self::View);

    fn set_icon_alpha(&mut self, alpha: f64);

    fn set_icon_frame(&mut self, frame: Rect);

    /// Schedule a transition; see the module docs for the completion protocol.
    fn animate(&mut self, request: AnimationRequest);

    /// The row should be removed from the list after an exit.
    fn request_row_removal(&mut self);
}
