//! Command Classifier
//!
//! Decides whether a line of input is one of the reserved terminal commands
//! answered locally, or free text that goes to the remote AI core.
//!
//! Matching is done on the trimmed, upper-cased form. The delegated message
//! keeps its original casing.

use chrono::{DateTime, Local, TimeZone};

/// Reply to CLEAR while the screen buffer is wiped
pub const CLEAR_REPLY: &str = "EXECUTING CLEAR COMMAND...";

/// Reply to STATUS
pub const STATUS_REPLY: &str = "ALL SYSTEMS OPERATIONAL. AI CORE ONLINE. CPU LOAD: 42%";

/// Label in front of the TIME reply
pub const TIME_LABEL: &str = "CURRENT SYSTEM TIME:";

/// Label in front of the DATE reply
pub const DATE_LABEL: &str = "CURRENT SYSTEM DATE:";

/// What to do with a submitted line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Wipe the transcript
    ClearScreen,
    /// Report status and reshuffle the status panel
    ReportStatus,
    /// Report the wall-clock time
    ReportTime,
    /// Report the calendar date
    ReportDate,
    /// Forward the trimmed, original-case message to the AI core
    Delegate(String),
}

/// A submission that survived normalization
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classified {
    /// Trimmed input, original casing
    pub raw: String,
    /// Trimmed, upper-cased input for display and history
    pub normalized: String,
    /// Resolved action
    pub action: Action,
}

/// Trim and upper-case; `None` when nothing is left
pub fn normalize(input: &str) -> Option<(String, String)> {
    let raw = input.trim();
    if raw.is_empty() {
        return None;
    }
    Some((raw.to_string(), raw.to_uppercase()))
}

/// Classify a line of input
///
/// Returns `None` for empty or whitespace-only input.
pub fn classify(input: &str) -> Option<Classified> {
    let (raw, normalized) = normalize(input)?;
    let action = match normalized.as_str() {
        "CLEAR" => Action::ClearScreen,
        "STATUS" => Action::ReportStatus,
        "TIME" => Action::ReportTime,
        "DATE" => Action::ReportDate,
        _ => Action::Delegate(raw.clone()),
    };
    Some(Classified {
        raw,
        normalized,
        action,
    })
}

/// Reply text for a local action at the given instant
///
/// Returns `None` for [`Action::Delegate`].
pub fn local_reply<Tz: TimeZone>(action: &Action, now: &DateTime<Tz>) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    match action {
        Action::ClearScreen => Some(CLEAR_REPLY.to_string()),
        Action::ReportStatus => Some(STATUS_REPLY.to_string()),
        Action::ReportTime => Some(format!(
            "{TIME_LABEL} {}",
            now.format("%-I:%M:%S %p").to_string().to_uppercase()
        )),
        Action::ReportDate => Some(format!(
            "{DATE_LABEL} {}",
            now.format("%-m/%-d/%Y").to_string().to_uppercase()
        )),
        Action::Delegate(_) => None,
    }
}

/// Reply text for a local action using the local clock
pub fn local_reply_now(action: &Action) -> Option<String> {
    local_reply(action, &Local::now())
}
