//! Surface Events
//!
//! Events sent from UI surfaces to the Conductor. Surfaces report what the
//! user did; the Conductor decides what it means.

use serde::{Deserialize, Serialize};

/// Events from UI Surface to Conductor
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// Surface connected and wants the current state
    Connected {
        /// Surface type identifier
        surface_type: SurfaceType,
    },

    /// User submitted a line of input
    Submit {
        /// Raw input, untrimmed
        content: String,
    },

    /// User asked to leave
    QuitRequested,
}

/// Kind of surface attached to the Conductor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceType {
    /// Full-screen terminal UI
    Tui,
    /// One-shot command line runner
    Headless,
}

impl SurfaceEvent {
    /// Shorthand for a submit event
    pub fn submit(content: impl Into<String>) -> Self {
        Self::Submit {
            content: content.into(),
        }
    }
}
