#![forbid(unsafe_code)]

//! A [`PresentationHost`] that records instead of drawing.
//!
//! Every call is appended to a [`HostCommand`] log and mirrored into an
//! [`OverlayModel`], so tests can assert both on the sequence of commands
//! and on what would currently be on screen. Animation requests are queued
//! until an [`AnimationDriver`](crate::driver::AnimationDriver) plays them.
//!
//! The log serializes to JSONL for golden diffs.

use std::collections::VecDeque;
use std::io::Write;

use serde::Serialize;
use swipecell_core::animation::AnimationCurve;
use swipecell_core::geometry::{Rect, Size};
use swipecell_core::host::{AnimationRequest, OverlayFrame, OverlayLayers, SettleKind};
use swipecell_core::{Color, PresentationHost, Result, SwipeError};

/// Default icon edge length used by [`RecordingHost::view_size`].
pub const DEFAULT_ICON_SIZE: f64 = 24.0;

/// Handle to a captured snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SnapshotId(pub u64);

/// One recorded host call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum HostCommand {
    CaptureSnapshot {
        snapshot: SnapshotId,
    },
    InstallOverlay {
        snapshot: SnapshotId,
        indicator_color: Color,
    },
    RemoveOverlay,
    SetSnapshotOffset {
        offset: f64,
    },
    SetIndicatorColor {
        color: Color,
    },
    SetIcon {
        view: String,
    },
    SetIconAlpha {
        alpha: f64,
    },
    SetIconFrame {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Animate {
        id: u64,
        kind: &'static str,
        curve: &'static str,
        duration_ms: u128,
        target_offset: f64,
    },
    RequestRowRemoval,
}

impl HostCommand {
    /// Short command name, matching the JSONL `cmd` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CaptureSnapshot { .. } => "capture_snapshot",
            Self::InstallOverlay { .. } => "install_overlay",
            Self::RemoveOverlay => "remove_overlay",
            Self::SetSnapshotOffset { .. } => "set_snapshot_offset",
            Self::SetIndicatorColor { .. } => "set_indicator_color",
            Self::SetIcon { .. } => "set_icon",
            Self::SetIconAlpha { .. } => "set_icon_alpha",
            Self::SetIconFrame { .. } => "set_icon_frame",
            Self::Animate { .. } => "animate",
            Self::RequestRowRemoval => "request_row_removal",
        }
    }
}

fn kind_name(kind: SettleKind) -> &'static str {
    match kind {
        SettleKind::Exit => "exit",
        SettleKind::Revert => "revert",
    }
}

fn curve_name(curve: AnimationCurve) -> &'static str {
    match curve {
        AnimationCurve::EaseOut => "ease_out",
        AnimationCurve::Spring { .. } => "spring",
    }
}

/// What the overlay currently looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayModel {
    pub snapshot: SnapshotId,
    pub snapshot_offset: f64,
    pub indicator_color: Color,
    pub icon: Option<String>,
    pub icon_alpha: f64,
    pub icon_frame: Option<Rect>,
}

impl OverlayModel {
    fn new(layers: OverlayLayers<SnapshotId>) -> Self {
        Self {
            snapshot: layers.snapshot,
            snapshot_offset: 0.0,
            indicator_color: layers.indicator_color,
            icon: None,
            icon_alpha: 0.0,
            icon_frame: None,
        }
    }

    /// Apply the settled values of `frame`.
    pub fn apply(&mut self, frame: &OverlayFrame) {
        self.snapshot_offset = frame.snapshot_offset;
        if let Some(color) = frame.indicator_color {
            self.indicator_color = color;
        }
        self.icon_alpha = frame.icon_alpha;
        if let Some(rect) = frame.icon_frame {
            self.icon_frame = Some(rect);
        }
    }
}

/// Recording host for one row.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    bounds: Size,
    icon_size: Size,
    commands: Vec<HostCommand>,
    overlay: Option<OverlayModel>,
    pending: VecDeque<AnimationRequest>,
    next_snapshot: u64,
    row_removals: usize,
}

impl RecordingHost {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            bounds: Size::new(width, height),
            icon_size: Size::new(DEFAULT_ICON_SIZE, DEFAULT_ICON_SIZE),
            commands: Vec::new(),
            overlay: None,
            pending: VecDeque::new(),
            next_snapshot: 0,
            row_removals: 0,
        }
    }

    #[must_use]
    pub fn with_icon_size(mut self, size: Size) -> Self {
        self.icon_size = size;
        self
    }

    /// Resize the row, as a table would on rotation.
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
    }

    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Drain the command log.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Names of recorded commands, in order.
    pub fn command_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(HostCommand::name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.commands.iter().filter(|c| c.name() == name).count()
    }

    pub fn overlay(&self) -> Option<&OverlayModel> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut OverlayModel> {
        self.overlay.as_mut()
    }

    pub fn next_animation(&mut self) -> Option<AnimationRequest> {
        self.pending.pop_front()
    }

    pub fn row_removals(&self) -> usize {
        self.row_removals
    }

    /// Number of snapshots captured over the host's lifetime.
    pub fn snapshots_captured(&self) -> u64 {
        self.next_snapshot
    }

    /// Write the command log as one JSON object per line.
    pub fn write_jsonl<W: Write>(&self, mut out: W) -> Result<()> {
        for command in &self.commands {
            serde_json::to_writer(&mut out, command).map_err(SwipeError::ConfigJson)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn to_jsonl(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_jsonl(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn with_overlay(&mut self, f: impl FnOnce(&mut OverlayModel)) {
        if let Some(overlay) = self.overlay.as_mut() {
            f(overlay);
        }
    }
}

impl PresentationHost for RecordingHost {
    type View = String;
    type Image = SnapshotId;

    fn bounds(&self) -> Size {
        self.bounds
    }

    fn view_size(&self, _view: &String) -> Size {
        self.icon_size
    }

    fn capture_snapshot(&mut self) -> SnapshotId {
        let snapshot = SnapshotId(self.next_snapshot);
        self.next_snapshot += 1;
        self.commands.push(HostCommand::CaptureSnapshot { snapshot });
        snapshot
    }

    fn install_overlay(&mut self, layers: OverlayLayers<SnapshotId>) {
        self.commands.push(HostCommand::InstallOverlay {
            snapshot: layers.snapshot,
            indicator_color: layers.indicator_color,
        });
        self.overlay = Some(OverlayModel::new(layers));
    }

    fn remove_overlay(&mut self) {
        self.commands.push(HostCommand::RemoveOverlay);
        self.overlay = None;
    }

    fn set_snapshot_offset(&mut self, offset: f64) {
        self.commands.push(HostCommand::SetSnapshotOffset { offset });
        self.with_overlay(|o| o.snapshot_offset = offset);
    }

    fn set_indicator_color(&mut self, color: Color) {
        self.commands.push(HostCommand::SetIndicatorColor { color });
        self.with_overlay(|o| o.indicator_color = color);
    }

    fn set_icon(&mut self, view: &String) {
        self.commands.push(HostCommand::SetIcon { view: view.clone() });
        self.with_overlay(|o| o.icon = Some(view.clone()));
    }

    fn set_icon_alpha(&mut self, alpha: f64) {
        self.commands.push(HostCommand::SetIconAlpha { alpha });
        self.with_overlay(|o| o.icon_alpha = alpha);
    }

    fn set_icon_frame(&mut self, frame: Rect) {
        self.commands.push(HostCommand::SetIconFrame {
            x: frame.x,
            y: frame.y,
            width: frame.width,
            height: frame.height,
        });
        self.with_overlay(|o| o.icon_frame = Some(frame));
    }

    fn animate(&mut self, request: AnimationRequest) {
        self.commands.push(HostCommand::Animate {
            id: request.id.0,
            kind: kind_name(request.kind),
            curve: curve_name(request.timing.curve),
            duration_ms: request.timing.duration.as_millis(),
            target_offset: request.target.snapshot_offset,
        });
        self.pending.push_back(request);
    }

    fn request_row_removal(&mut self) {
        self.commands.push(HostCommand::RequestRowRemoval);
        self.row_removals += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_without_overlay_are_logged_only() {
        let mut host = RecordingHost::new(320.0, 44.0);
        host.set_snapshot_offset(12.0);
        assert_eq!(host.command_names(), vec!["set_snapshot_offset"]);
        assert!(host.overlay().is_none());
    }

    #[test]
    fn overlay_model_tracks_commands() {
        let mut host = RecordingHost::new(320.0, 44.0);
        let snapshot = host.capture_snapshot();
        host.install_overlay(OverlayLayers {
            snapshot,
            indicator_color: Color::WHITE,
        });
        host.set_snapshot_offset(40.0);
        host.set_indicator_color(Color::GREEN);
        host.set_icon(&"check".to_string());
        host.set_icon_alpha(0.5);

        let overlay = host.overlay().unwrap();
        assert_eq!(overlay.snapshot, SnapshotId(0));
        assert_eq!(overlay.snapshot_offset, 40.0);
        assert_eq!(overlay.indicator_color, Color::GREEN);
        assert_eq!(overlay.icon.as_deref(), Some("check"));
        assert_eq!(overlay.icon_alpha, 0.5);

        host.remove_overlay();
        assert!(host.overlay().is_none());
        assert_eq!(host.count("remove_overlay"), 1);
    }

    #[test]
    fn jsonl_has_one_tagged_object_per_line() {
        let mut host = RecordingHost::new(320.0, 44.0);
        host.capture_snapshot();
        host.set_indicator_color(Color::RED);
        host.request_row_removal();

        let jsonl = host.to_jsonl().unwrap();
        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 3);
        let color: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(color["cmd"], "set_indicator_color");
        assert_eq!(color["color"], "#e83d0eff");
        let removal: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(removal["cmd"], "request_row_removal");
    }
}
