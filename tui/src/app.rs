//! Main Application
//!
//! The App struct manages the terminal lifecycle as a thin display client:
//! - Event loop (keyboard, frame tick)
//! - ConductorClient for orchestration
//! - DisplayState for rendering
//!
//! The App:
//! 1. Converts key presses to SurfaceEvents
//! 2. Sends events to the embedded Conductor via ConductorClient
//! 3. Receives ConductorMessages and updates DisplayState
//! 4. Renders based on DisplayState

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};

use terminalx_conductor::animation::CURSOR_BLINK_INTERVAL;
use terminalx_conductor::{NotifyLevel, Sender, SurfaceType};

use crate::conductor_client::ConductorClient;
use crate::display::DisplayState;
use crate::theme;

/// Header title line
pub const TITLE: &str = "TERMINALX-9000 ARTIFICIAL INTELLIGENCE SYSTEM";

/// Header copyright line
pub const COPYRIGHT: &str = "© 1983 CYBERDYNE SYSTEMS";

/// Target ~10 FPS for terminal-style animations
const FRAME_DURATION: Duration = Duration::from_millis(100);

/// Height of the bottom status/history panels (5 lines + borders)
const PANEL_HEIGHT: u16 = 7;

/// Lines moved per PageUp/PageDown
const SCROLL_STEP: usize = 5;

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Conductor Integration ===
    /// Client for communicating with the embedded Conductor
    conductor: ConductorClient,
    /// Display state derived from ConductorMessages
    display: DisplayState,

    // === Input State ===
    /// Operator input buffer
    input_buffer: String,
    /// Scroll offset (lines from bottom, 0 = latest)
    scroll_offset: usize,

    // === Cursor Blink ===
    /// Whether the input cursor is lit
    cursor_visible: bool,
    /// Time since the cursor last toggled
    blink_elapsed: Duration,

    // === Misc State ===
    /// Last frame time (for timers)
    last_frame: Instant,
    /// HASH source
    rng: StdRng,
}

impl App {
    /// Create a new App around a Conductor client
    pub fn new(conductor: ConductorClient) -> Self {
        Self {
            running: true,
            conductor,
            display: DisplayState::new(),
            input_buffer: String::new(),
            scroll_offset: 0,
            cursor_visible: true,
            blink_elapsed: Duration::ZERO,
            last_frame: Instant::now(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Connect to the Conductor and mirror its opening snapshot
    pub async fn connect(&mut self) -> anyhow::Result<()> {
        self.conductor.connect(SurfaceType::Tui).await?;
        self.process_conductor_messages();
        self.display.refresh_hash(&mut self.rng);
        Ok(())
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        // Create async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();
        let mut ticker = tokio::time::interval(FRAME_DURATION);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        self.connect().await?;

        // Render initial frame immediately so the operator sees the UI
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Check for terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key).await;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                        None => self.running = false,
                    }
                }

                // Frame tick
                _ = ticker.tick() => {}
            }

            self.tick().await;
            self.render(terminal)?;
        }

        Ok(())
    }

    /// One frame of work: advance the Conductor, mirror its messages, run timers
    pub async fn tick(&mut self) {
        if self.conductor.poll().await {
            self.display.refresh_hash(&mut self.rng);
        }
        self.process_conductor_messages();
        self.update();
    }

    /// Process all pending messages from the Conductor
    fn process_conductor_messages(&mut self) {
        for msg in self.conductor.recv_all() {
            self.display.apply_message(msg);
        }
        if self.display.quit_requested {
            self.running = false;
        }
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            // Quit
            KeyCode::Esc => self.quit().await,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit().await;
            }

            // Transcript scrolling works while busy
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_add(SCROLL_STEP);
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_sub(SCROLL_STEP);
            }

            // Input is disabled while a response is in flight
            _ if self.display.is_busy() => {}

            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input_buffer);
                if let Err(e) = self.conductor.submit(line).await {
                    tracing::warn!("Submit failed: {}", e);
                }
                self.scroll_offset = 0;
                self.process_conductor_messages();
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }

            _ => {}
        }
    }

    async fn quit(&mut self) {
        if let Err(e) = self.conductor.request_quit().await {
            tracing::warn!("Quit request failed: {}", e);
        }
        self.process_conductor_messages();
        self.running = false;
    }

    /// Update timers
    fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;

        self.display.update(delta);

        self.blink_elapsed += delta;
        if self.blink_elapsed >= CURSOR_BLINK_INTERVAL {
            self.blink_elapsed = Duration::ZERO;
            self.cursor_visible = !self.cursor_visible;
        }
    }

    /// Render to the terminal
    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        terminal.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    /// Draw one frame
    pub fn draw(&self, frame: &mut Frame) {
        let [header, transcript, input, notice, panels] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(PANEL_HEIGHT),
        ])
        .areas(frame.area());

        frame.render_widget(
            Block::default().style(theme::text()),
            frame.area(),
        );
        self.draw_header(frame, header);
        self.draw_transcript(frame, transcript);
        self.draw_input(frame, input);
        self.draw_notice(frame, notice);
        self.draw_panels(frame, panels);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(vec![
            Line::styled(TITLE, theme::title()),
            Line::styled(COPYRIGHT, theme::text()),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(theme::border()),
        );
        frame.render_widget(header, area);
    }

    /// Wrapped transcript lines, oldest first
    fn transcript_lines(&self, width: usize) -> Vec<Line<'static>> {
        let width = width.max(1);
        let mut lines = Vec::new();
        for entry in &self.display.entries {
            let style = match entry.sender {
                Sender::User => theme::operator(),
                Sender::System | Sender::Ai => theme::text(),
            };
            let rendered = entry.rendered();
            if rendered.is_empty() {
                lines.push(Line::styled(String::new(), style));
                continue;
            }
            for wrapped in textwrap::wrap(&rendered, width) {
                lines.push(Line::styled(wrapped.into_owned(), style));
            }
        }
        if self.display.show_thinking_marker() {
            lines.push(Line::styled("_", theme::text()));
        }
        lines
    }

    fn draw_transcript(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().border_style(theme::border());
        let inner = block.inner(area);
        let lines = self.transcript_lines(inner.width as usize);

        // Show the tail, shifted up by the scroll offset
        let height = inner.height as usize;
        let max_offset = lines.len().saturating_sub(height);
        let end = lines.len() - self.scroll_offset.min(max_offset);
        let start = end.saturating_sub(height);

        frame.render_widget(Paragraph::new(lines[start..end].to_vec()).block(block), area);
    }

    fn draw_input(&self, frame: &mut Frame, area: Rect) {
        let busy = self.display.is_busy();
        let style = if busy { theme::disabled() } else { theme::text() };
        let cursor = if self.cursor_visible && !busy { "_" } else { " " };

        let line = Line::from(vec![
            Span::styled("> ", theme::text()),
            Span::styled(self.input_buffer.clone(), style),
            Span::styled(cursor, theme::text()),
        ]);
        let input = Paragraph::new(line).block(Block::bordered().border_style(theme::border()));
        frame.render_widget(input, area);
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.display.notice {
            Some(notice) => {
                let color = match notice.level {
                    NotifyLevel::Info => theme::PHOSPHOR_GREEN,
                    NotifyLevel::Warning => theme::WARNING_AMBER,
                    NotifyLevel::Error => theme::ERROR_RED,
                };
                Line::styled(notice.message.clone(), Style::default().fg(color))
            }
            None => match (&self.display.session_id, &self.display.endpoint) {
                (Some(session), Some(endpoint)) => Line::styled(
                    format!("{session} @ {endpoint}"),
                    Style::default().fg(theme::PHOSPHOR_DIM),
                ),
                _ => Line::default(),
            },
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_panels(&self, frame: &mut Frame, area: Rect) {
        let [status, history] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);

        frame.render_widget(
            panel("SYSTEM STATUS", self.display.status_lines()),
            status,
        );
        frame.render_widget(
            panel("COMMAND HISTORY", self.display.history_lines()),
            history,
        );
    }

    /// Check if app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Farewell line to print after the terminal is restored
    pub fn goodbye(&self) -> Option<&str> {
        self.display.goodbye.as_deref()
    }

    /// Current display state
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Current input buffer
    pub fn input(&self) -> &str {
        &self.input_buffer
    }

    /// Current scroll offset
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }
}

/// Bordered panel with a centered title
fn panel(title: &'static str, lines: Vec<String>) -> Paragraph<'static> {
    let lines: Vec<Line<'static>> = lines.into_iter().map(Line::from).collect();
    Paragraph::new(lines).style(theme::text()).block(
        Block::bordered()
            .border_style(theme::border())
            .title(Line::from(title).centered()),
    )
}
