#![forbid(unsafe_code)]

//! Test host and fixtures for swipecell.
//!
//! - [`RecordingHost`]: a [`PresentationHost`](swipecell_core::PresentationHost)
//!   that logs every command and models the overlay.
//! - [`AnimationDriver`]: plays queued animations frame by frame and reports
//!   them finished.
//! - [`GestureScript`]: pan gestures built from pixel distances.
//!
//! ```rust,ignore
//! let mut cell = SwipeCell::new(RecordingHost::new(320.0, 44.0));
//! cell.set_swipe_gesture("check".into(), Color::GREEN, SwipeMode::Switch, SwipeState::State1, |_, _, _| {});
//! GestureScript::swipe(64.0, 4, 0.0).play(&mut cell);
//! AnimationDriver::default().settle(&mut cell);
//! ```

pub mod cli;
pub mod driver;
pub mod recording_host;
pub mod script;

pub use driver::{AnimationDriver, Playback};
pub use recording_host::{HostCommand, OverlayModel, RecordingHost, SnapshotId};
pub use script::GestureScript;
