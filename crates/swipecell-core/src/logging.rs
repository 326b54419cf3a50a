#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported and
//! reachable at the crate root. Without it, same-named macros expand to
//! nothing, so call sites never need their own `cfg` attributes.
//!
//! Event names used by the crate:
//!
//! | name | emitted when |
//! |------|--------------|
//! | `swipe.session.begin` | overlay installed, tracking starts |
//! | `swipe.gesture.pinned` | a movement was rejected by travel blocking |
//! | `swipe.release` | gesture ended or was cancelled |
//! | `swipe.exit` / `swipe.revert` | settle animation requested |
//! | `swipe.completion` | a slot completion fired |
//! | `swipe.reuse` | the cell was prepared for reuse |
//! | `swipe.ignored` | an event arrived while exited, animating or unrecognized |

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, info, trace, warn};

/// Span stand-in used when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Mirror of `tracing::Span::entered`.
    #[inline]
    #[must_use]
    pub fn entered(self) -> Self {
        self
    }
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! trace {
    ($($arg:tt)*) => {
        ()
    };
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug {
    ($($arg:tt)*) => {
        ()
    };
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! info {
    ($($arg:tt)*) => {
        ()
    };
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! warn {
    ($($arg:tt)*) => {
        ()
    };
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug_span {
    ($($arg:tt)*) => {
        $crate::logging::NoopSpan
    };
}
