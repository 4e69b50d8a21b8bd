//! Animation - Response Delivery Pacing
//!
//! The only animation the Conductor owns is the typewriter reveal of an
//! already-resolved response. Surfaces decide how a revealed prefix looks;
//! the Conductor decides when each prefix is due.
//!
//! # Timing
//!
//! ```text
//! resolve ──► placeholder ──► tick ──► tick ──► ... ──► tick ──► complete
//!                              "A"     "AB"            "ABC"     (once)
//!             |<-interval->|<-interval->|
//! ```

mod typing;

use std::time::Duration;

pub use typing::{TypingAnimator, TypingFrame};

/// Default reveal cadence, one character per tick
pub const DEFAULT_TYPING_INTERVAL: Duration = Duration::from_millis(30);

/// Surface cursor blink half-period
pub const CURSOR_BLINK_INTERVAL: Duration = Duration::from_millis(500);
