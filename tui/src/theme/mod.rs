//! Theme and Colors
//!
//! Phosphor palette for the 1983 terminal look: green on black, cyan for
//! what the operator typed.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Phosphor Palette
// ============================================================================

/// Screen background
pub const SCREEN_BLACK: Color = Color::Rgb(0, 0, 0);

/// Main text and borders
pub const PHOSPHOR_GREEN: Color = Color::Rgb(34, 197, 94);

/// Dimmed green for secondary text
pub const PHOSPHOR_DIM: Color = Color::Rgb(21, 128, 61);

/// Operator input lines
pub const OPERATOR_CYAN: Color = Color::Rgb(34, 211, 238);

// ============================================================================
// Notification Colors
// ============================================================================

/// Warning notices
pub const WARNING_AMBER: Color = Color::Rgb(251, 191, 36);

/// Error notices
pub const ERROR_RED: Color = Color::Rgb(248, 113, 113);

// ============================================================================
// Styles
// ============================================================================

/// Default text
pub fn text() -> Style {
    Style::default().fg(PHOSPHOR_GREEN).bg(SCREEN_BLACK)
}

/// Operator lines in the transcript
pub fn operator() -> Style {
    Style::default().fg(OPERATOR_CYAN).bg(SCREEN_BLACK)
}

/// Panel borders
pub fn border() -> Style {
    Style::default().fg(PHOSPHOR_GREEN)
}

/// Header title
pub fn title() -> Style {
    text().add_modifier(Modifier::BOLD)
}

/// Input line while disabled
pub fn disabled() -> Style {
    Style::default().fg(PHOSPHOR_DIM).bg(SCREEN_BLACK)
}
