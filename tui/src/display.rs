//! Display State Types
//!
//! Types that represent the current display state for the terminal.
//! These are derived from ConductorMessages and used for rendering.
//!
//! # Design Philosophy
//!
//! The surface is a "thin client" - it just renders what the Conductor tells
//! it to. Display state is the bridge between ConductorMessages and rendering.
//!
//! - DisplayEntry: One transcript line as rendered
//! - DisplayNotice: A transient notification under the input line
//! - DisplayState: Everything the frame needs

use std::time::Duration;

use rand::Rng;

use terminalx_conductor::{
    ConductorMessage, ConductorState, MessageId, NotifyLevel, Sender, SessionId, SystemStatus,
    TranscriptEntry,
};

/// History entries longer than this are shortened in the panel
pub const HISTORY_DISPLAY_WIDTH: usize = 20;

/// Shown in the history panel before the first command
pub const NO_PREVIOUS_COMMANDS: &str = "NO PREVIOUS COMMANDS";

/// How long a notification stays on screen
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

/// A rendered transcript entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayEntry {
    /// Unique message ID
    pub id: MessageId,
    /// Who produced this entry
    pub sender: Sender,
    /// Text as currently revealed
    pub text: String,
    /// Whether the typewriter still owns this entry
    pub typing: bool,
}

impl DisplayEntry {
    /// Create a finished entry
    pub fn new(id: MessageId, sender: Sender, text: String) -> Self {
        Self {
            id,
            sender,
            text,
            typing: false,
        }
    }

    /// Create the empty entry the typewriter writes into
    pub fn typing(id: MessageId) -> Self {
        Self {
            id,
            sender: Sender::Ai,
            text: String::new(),
            typing: true,
        }
    }

    /// Line as shown, with the operator prompt for user input
    pub fn rendered(&self) -> String {
        match self.sender {
            Sender::User => format!("> {}", self.text),
            Sender::System | Sender::Ai => self.text.clone(),
        }
    }
}

impl From<TranscriptEntry> for DisplayEntry {
    fn from(entry: TranscriptEntry) -> Self {
        Self {
            id: entry.id,
            sender: entry.sender,
            text: entry.text,
            typing: entry.typing,
        }
    }
}

/// A notification with a countdown
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayNotice {
    /// Severity
    pub level: NotifyLevel,
    /// Text
    pub message: String,
    /// Time left on screen
    pub remaining: Duration,
}

/// Complete display state for rendering
#[derive(Clone, Debug)]
pub struct DisplayState {
    /// Transcript entries, oldest first
    pub entries: Vec<DisplayEntry>,
    /// Recent commands, newest first
    pub history: Vec<String>,
    /// Status panel values
    pub status: SystemStatus,
    /// Current Conductor state
    pub conductor_state: ConductorState,
    /// Session identifier, once announced
    pub session_id: Option<SessionId>,
    /// Chat service the session talks to
    pub endpoint: Option<String>,
    /// Transient notification
    pub notice: Option<DisplayNotice>,
    /// Farewell line from the Conductor
    pub goodbye: Option<String>,
    /// Whether the Conductor asked the surface to close
    pub quit_requested: bool,
    /// HASH line of the status panel
    pub hash: String,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            history: Vec::new(),
            status: SystemStatus::default(),
            conductor_state: ConductorState::Idle,
            session_id: None,
            endpoint: None,
            notice: None,
            goodbye: None,
            quit_requested: false,
            hash: "00000000".to_string(),
        }
    }
}

impl DisplayState {
    /// Create new display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a conductor message to update state
    pub fn apply_message(&mut self, msg: ConductorMessage) {
        match msg {
            // Transcript
            ConductorMessage::Message { id, sender, text } => {
                self.entries.push(DisplayEntry::new(id, sender, text));
            }
            ConductorMessage::TypingStarted { message_id } => {
                self.entries.push(DisplayEntry::typing(message_id));
            }
            ConductorMessage::TypingUpdate {
                message_id,
                partial,
            } => {
                if let Some(entry) = self.find_typing(&message_id) {
                    entry.text = partial;
                }
            }
            ConductorMessage::TypingComplete { message_id } => {
                if let Some(entry) = self.find_typing(&message_id) {
                    entry.typing = false;
                }
            }
            ConductorMessage::TranscriptReset { entries } => {
                self.entries = entries.into_iter().map(DisplayEntry::from).collect();
            }

            // Panels
            ConductorMessage::History { commands } => {
                self.history = commands;
            }
            ConductorMessage::Status { status } => {
                self.status = status;
            }

            // System
            ConductorMessage::Notify { level, message } => {
                self.notice = Some(DisplayNotice {
                    level,
                    message,
                    remaining: NOTICE_DURATION,
                });
            }
            ConductorMessage::State { state } => {
                self.conductor_state = state;
            }
            ConductorMessage::SessionInfo {
                session_id,
                endpoint,
            } => {
                self.session_id = Some(session_id);
                self.endpoint = Some(endpoint);
            }
            ConductorMessage::Quit { message } => {
                self.goodbye = message;
                self.quit_requested = true;
            }
        }
    }

    fn find_typing(&mut self, id: &MessageId) -> Option<&mut DisplayEntry> {
        self.entries.iter_mut().rev().find(|e| &e.id == id && e.typing)
    }

    /// Advance timers by one frame
    pub fn update(&mut self, delta: Duration) {
        if let Some(notice) = self.notice.as_mut() {
            notice.remaining = notice.remaining.saturating_sub(delta);
            if notice.remaining.is_zero() {
                self.notice = None;
            }
        }
    }

    /// Draw a new HASH value
    pub fn refresh_hash<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.hash = random_hash(rng);
    }

    /// Whether a response is in flight (input disabled, `_` shown)
    pub fn is_busy(&self) -> bool {
        self.conductor_state.is_busy()
    }

    /// Whether the `_` placeholder line should be drawn
    pub fn show_thinking_marker(&self) -> bool {
        self.is_busy()
    }

    /// Lines of the COMMAND HISTORY panel
    pub fn history_lines(&self) -> Vec<String> {
        if self.history.is_empty() {
            return vec![NO_PREVIOUS_COMMANDS.to_string()];
        }
        self.history.iter().map(|c| truncate_command(c)).collect()
    }

    /// Lines of the SYSTEM STATUS panel
    pub fn status_lines(&self) -> Vec<String> {
        vec![
            format!("CPU: {}", self.status.cpu.label()),
            format!("MEMORY: {}", self.status.memory),
            format!("NETWORK: {}", self.status.network.label()),
            format!("USERS: {}", self.status.users),
            format!("HASH: {}", self.hash),
        ]
    }
}

/// Shorten a command for the history panel
///
/// Counts characters, not bytes.
pub fn truncate_command(command: &str) -> String {
    if command.chars().count() > HISTORY_DISPLAY_WIDTH {
        let head: String = command.chars().take(HISTORY_DISPLAY_WIDTH).collect();
        format!("{head}...")
    } else {
        command.to_string()
    }
}

/// Eight random upper-case hex digits
pub fn random_hash<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:08X}", rng.gen::<u32>())
}
