//! Session Management
//!
//! A session is one page-load's worth of terminal state: the transcript,
//! the recent-command log and the cosmetic status panel. It is owned by a
//! single Conductor and never shared or persisted.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::messages::{MessageId, Sender, SessionId};

/// Lines shown when a session opens
pub const WELCOME_BANNER: [&str; 3] = [
    "SYSTEM INITIALIZED: WELCOME TO TERMINALX-9000",
    "ARTIFICIAL INTELLIGENCE UNIT ONLINE",
    "ENTER COMMAND:",
];

/// Lines left behind by CLEAR
pub const CLEARED_BANNER: [&str; 2] = ["SCREEN BUFFER CLEARED", "TERMINAL READY"];

/// Number of commands kept in the history panel
pub const COMMAND_HISTORY_LIMIT: usize = 4;

/// One line of the transcript
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Unique entry ID
    pub id: MessageId,
    /// Who produced the entry
    pub sender: Sender,
    /// Entry text
    pub text: String,
    /// Whether the animator is still writing into this entry
    pub typing: bool,
}

impl TranscriptEntry {
    /// Create a finished entry
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            text: text.into(),
            typing: false,
        }
    }

    /// Create an empty AI entry the animator will type into
    pub fn placeholder() -> Self {
        Self {
            id: MessageId::new(),
            sender: Sender::Ai,
            text: String::new(),
            typing: true,
        }
    }
}

/// Bounded log of recent normalized commands, newest first
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandHistory {
    entries: VecDeque<String>,
}

impl CommandHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command; the oldest entry falls off past the limit
    pub fn push(&mut self, command: impl Into<String>) {
        self.entries.push_front(command.into());
        self.entries.truncate(COMMAND_HISTORY_LIMIT);
    }

    /// Commands, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    /// Snapshot as a vector, most recent first
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// Number of stored commands
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no command has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// CPU line of the status panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CpuStatus {
    /// Nominal
    Operational,
    /// Under load
    Degraded,
}

impl CpuStatus {
    /// Panel label
    pub fn label(self) -> &'static str {
        match self {
            Self::Operational => "OPERATIONAL",
            Self::Degraded => "RUNNING AT 87% CAPACITY",
        }
    }
}

/// Network line of the status panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkStatus {
    /// Link up
    Connected,
    /// Link flapping
    Intermittent,
}

impl NetworkStatus {
    /// Panel label
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "CONNECTED",
            Self::Intermittent => "INTERMITTENT",
        }
    }
}

/// Cosmetic status panel values
///
/// Nothing here reflects real resource usage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// CPU line
    pub cpu: CpuStatus,
    /// Network line
    pub network: NetworkStatus,
    /// Memory line
    pub memory: String,
    /// Connected users
    pub users: u32,
}

impl Default for SystemStatus {
    fn default() -> Self {
        Self {
            cpu: CpuStatus::Operational,
            network: NetworkStatus::Connected,
            memory: "640K (SUFFICIENT)".to_string(),
            users: 1,
        }
    }
}

impl SystemStatus {
    /// Apply one STATUS reshuffle from two independent draws in `[0, 1)`
    pub fn reshuffle(&mut self, cpu_roll: f64, network_roll: f64) {
        self.cpu = if cpu_roll > 0.5 {
            CpuStatus::Operational
        } else {
            CpuStatus::Degraded
        };
        self.network = if network_roll > 0.3 {
            NetworkStatus::Connected
        } else {
            NetworkStatus::Intermittent
        };
    }
}

/// A terminal session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Unique session ID
    pub id: SessionId,
    /// Transcript, oldest first
    transcript: Vec<TranscriptEntry>,
    /// Recent commands
    history: CommandHistory,
    /// Status panel
    status: SystemStatus,
    /// Entry currently being typed (if any)
    typing_id: Option<MessageId>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session showing the welcome banner
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    /// Create a session with a specific ID
    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            transcript: WELCOME_BANNER
                .iter()
                .map(|line| TranscriptEntry::new(Sender::System, *line))
                .collect(),
            history: CommandHistory::new(),
            status: SystemStatus::default(),
            typing_id: None,
        }
    }

    /// Append a user entry and record it in the history
    pub fn add_user_entry(&mut self, normalized: &str) -> &TranscriptEntry {
        self.history.push(normalized);
        self.push(TranscriptEntry::new(Sender::User, normalized))
    }

    /// Append the empty AI entry the animator writes into
    pub fn start_typing(&mut self) -> MessageId {
        let entry = TranscriptEntry::placeholder();
        let id = entry.id.clone();
        self.typing_id = Some(id.clone());
        self.transcript.push(entry);
        id
    }

    /// Replace the in-progress entry's text
    ///
    /// Returns `None` when nothing is being typed, which leaves finished
    /// entries untouched.
    pub fn update_typing(&mut self, partial: &str) -> Option<&TranscriptEntry> {
        let typing_id = self.typing_id.as_ref()?;
        let entry = self.transcript.last_mut()?;
        if &entry.id != typing_id {
            return None;
        }
        partial.clone_into(&mut entry.text);
        Some(entry)
    }

    /// Freeze the in-progress entry
    pub fn complete_typing(&mut self) -> Option<MessageId> {
        let typing_id = self.typing_id.take()?;
        if let Some(entry) = self.transcript.iter_mut().find(|e| e.id == typing_id) {
            entry.typing = false;
        }
        Some(typing_id)
    }

    /// Drop any half-typed entry (teardown)
    pub fn cancel_typing(&mut self) {
        if let Some(typing_id) = self.typing_id.take() {
            self.transcript.retain(|e| e.id != typing_id);
        }
    }

    /// Whether the animator owns the last entry
    pub fn is_typing(&self) -> bool {
        self.typing_id.is_some()
    }

    /// Replace the transcript with the CLEAR banner
    pub fn clear_screen(&mut self) -> &[TranscriptEntry] {
        self.typing_id = None;
        self.transcript = CLEARED_BANNER
            .iter()
            .map(|line| TranscriptEntry::new(Sender::System, *line))
            .collect();
        &self.transcript
    }

    /// The transcript, oldest first
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Last transcript entry
    pub fn last_entry(&self) -> Option<&TranscriptEntry> {
        self.transcript.last()
    }

    /// Recent commands
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Status panel values
    pub fn status(&self) -> &SystemStatus {
        &self.status
    }

    /// Mutable status panel values
    pub fn status_mut(&mut self) -> &mut SystemStatus {
        &mut self.status
    }

    fn push(&mut self, entry: TranscriptEntry) -> &TranscriptEntry {
        self.transcript.push(entry);
        // Non-empty after push
        &self.transcript[self.transcript.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(session: &Session) -> Vec<&str> {
        session.transcript().iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_new_session_shows_banner() {
        let session = Session::new();
        assert_eq!(texts(&session), WELCOME_BANNER.to_vec());
        assert!(session
            .transcript()
            .iter()
            .all(|e| e.sender == Sender::System));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_history_keeps_four_newest_first() {
        let mut history = CommandHistory::new();
        for cmd in ["ONE", "TWO", "THREE", "FOUR", "FIVE"] {
            history.push(cmd);
        }
        assert_eq!(history.to_vec(), vec!["FIVE", "FOUR", "THREE", "TWO"]);
    }

    #[test]
    fn test_user_entry_records_history() {
        let mut session = Session::new();
        session.add_user_entry("HELLO");
        assert_eq!(session.last_entry().unwrap().sender, Sender::User);
        assert_eq!(session.history().to_vec(), vec!["HELLO"]);
    }

    #[test]
    fn test_typing_replaces_in_place() {
        let mut session = Session::new();
        let before = session.transcript().len();
        let id = session.start_typing();

        session.update_typing("H");
        session.update_typing("HI");
        assert_eq!(session.transcript().len(), before + 1);

        let last = session.last_entry().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.sender, Sender::Ai);
        assert_eq!(last.text, "HI");
        assert!(last.typing);

        assert_eq!(session.complete_typing(), Some(id));
        assert!(!session.last_entry().unwrap().typing);
    }

    #[test]
    fn test_completed_entry_is_never_mutated() {
        let mut session = Session::new();
        session.start_typing();
        session.update_typing("DONE");
        session.complete_typing();

        assert!(session.update_typing("LATE").is_none());
        assert_eq!(session.last_entry().unwrap().text, "DONE");
    }

    #[test]
    fn test_cancel_typing_removes_placeholder() {
        let mut session = Session::new();
        session.start_typing();
        session.update_typing("PART");
        session.cancel_typing();
        assert_eq!(texts(&session), WELCOME_BANNER.to_vec());
    }

    #[test]
    fn test_clear_screen() {
        let mut session = Session::new();
        session.add_user_entry("CLEAR");
        session.clear_screen();
        assert_eq!(texts(&session), CLEARED_BANNER.to_vec());
        assert!(session
            .transcript()
            .iter()
            .all(|e| e.sender == Sender::System));
        // History survives a clear
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_status_reshuffle() {
        let mut status = SystemStatus::default();
        status.reshuffle(0.2, 0.1);
        assert_eq!(status.cpu, CpuStatus::Degraded);
        assert_eq!(status.network, NetworkStatus::Intermittent);

        status.reshuffle(0.9, 0.9);
        assert_eq!(status.cpu, CpuStatus::Operational);
        assert_eq!(status.network, NetworkStatus::Connected);
        assert_eq!(status.memory, "640K (SUFFICIENT)");
        assert_eq!(status.users, 1);
    }
}
