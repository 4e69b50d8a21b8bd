//! Conductor Messages
//!
//! Messages sent from the Conductor to UI surfaces. A surface never mutates
//! the transcript on its own; it mirrors what these messages tell it.
//!
//! The typing animation is delivered as a sequence of [`ConductorMessage::TypingUpdate`]
//! messages, each carrying the full revealed prefix so a surface can replace
//! the in-progress entry rather than append to it.

use serde::{Deserialize, Serialize};

use crate::session::{SystemStatus, TranscriptEntry};

/// Messages from Conductor to UI Surface
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ConductorMessage {
    // ============================================
    // Transcript Messages
    // ============================================
    /// A complete entry appended to the transcript
    Message {
        /// Unique message ID for tracking
        id: MessageId,
        /// Who sent this entry
        sender: Sender,
        /// The entry text
        text: String,
    },

    /// An empty AI placeholder was appended; typing into it starts next
    TypingStarted {
        /// ID of the placeholder entry
        message_id: MessageId,
    },

    /// The in-progress entry now reads `partial`
    TypingUpdate {
        /// ID of the entry being typed
        message_id: MessageId,
        /// Text revealed so far (replaces, does not append)
        partial: String,
    },

    /// Typing finished; the entry is final
    TypingComplete {
        /// ID of the entry that completed
        message_id: MessageId,
    },

    /// The whole transcript was replaced (CLEAR)
    TranscriptReset {
        /// The new transcript
        entries: Vec<TranscriptEntry>,
    },

    // ============================================
    // Side Panels
    // ============================================
    /// Command history changed (newest first)
    History {
        /// Normalized commands, most recent first
        commands: Vec<String>,
    },

    /// Cosmetic system status changed
    Status {
        /// New status panel values
        status: SystemStatus,
    },

    // ============================================
    // System Messages
    // ============================================
    /// Show a notification line outside the transcript
    Notify {
        /// Notification level
        level: NotifyLevel,
        /// Notification text
        message: String,
    },

    /// Conductor state changed
    State {
        /// New state
        state: ConductorState,
    },

    /// Session information
    SessionInfo {
        /// Session identifier
        session_id: SessionId,
        /// Base URL of the chat service
        endpoint: String,
    },

    /// Surface should close
    Quit {
        /// Optional farewell line
        message: Option<String>,
    },
}

/// Unique identifier for a transcript entry
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generate a new unique message ID
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        Self(format!("msg_{id}"))
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// Session identifier, forwarded to the primary chat endpoint
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new unique session ID
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::time::{SystemTime, UNIX_EPOCH};

        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let count = COUNTER.fetch_add(1, Ordering::SeqCst);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self(format!("session_{timestamp}_{count}"))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who produced a transcript entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Terminal banner and housekeeping lines
    System,
    /// The person at the keyboard
    User,
    /// The AI core
    Ai,
}

/// Notification severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// Something degraded but recoverable
    Warning,
    /// Something failed
    Error,
}

/// Conductor operational state
///
/// `Idle -> Thinking -> Typing -> Idle`. Submissions are only accepted in `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConductorState {
    /// Ready for input
    Idle,
    /// Artificial delay and/or remote round trip in flight
    Thinking,
    /// Animator revealing the response
    Typing,
    /// Torn down; no further updates
    ShuttingDown,
}

impl ConductorState {
    /// Status line text for this state
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "READY",
            Self::Thinking => "PROCESSING...",
            Self::Typing => "TRANSMITTING...",
            Self::ShuttingDown => "TERMINATING SESSION...",
        }
    }

    /// Whether a response is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Thinking | Self::Typing)
    }
}
