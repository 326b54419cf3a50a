#![forbid(unsafe_code)]

//! Core: gesture interpretation for swipeable list rows.
//!
//! # Role in swipecell
//! `swipecell-core` turns a horizontal pan gesture on a single list row into
//! one of four action states, decides whether the row leaves the screen or
//! springs back, and fires the bound completion exactly once per session.
//! Drawing is delegated to a [`host::PresentationHost`] supplied by the
//! embedding UI toolkit.
//!
//! # Primary responsibilities
//! - **percentage**: pixel offset ⇄ normalized `[-1, 1]` conversions.
//! - **resolver**: state, mode, color, alpha, and icon resolution.
//! - **session**: the Idle → Tracking → Exiting/Reverting state machine.
//! - **cell**: the configuration surface the host talks to.
//!
//! # How it fits in the system
//! Raw pan samples arrive as [`session::SwipeEvent`]s. The cell feeds them
//! through the resolver and session controller, which issue commands to the
//! host. Animations are run by the host and reported back with
//! [`session::SwipeEvent::AnimationFinished`], so there is no re-entrancy.

pub mod animation;
pub mod cell;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod percentage;
pub mod resolver;
pub mod session;
pub mod slots;
pub mod state;

pub use cell::{SwipeCell, SwipeCompletion};
pub use color::Color;
pub use config::SwipeConfig;
pub use error::{Result, SwipeError};
pub use host::PresentationHost;
pub use session::{SwipeEvent, SwipePhase};
pub use slots::{SlotConfig, SwipeSlots};
pub use state::{SwipeDirection, SwipeMode, SwipeState};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};
