//! Conductor Core - Headless Chat Orchestration for TERMINALX-9000
//!
//! This crate holds everything the retro terminal does that is not drawing:
//! command classification, the remote responder gateway, the typewriter
//! animator, session state and the state machine tying them together, plus
//! clients for the blog and movie collaborators.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         UI Surfaces                          │
//! │        ┌──────────────┐            ┌──────────────┐          │
//! │        │  Terminal UI │            │ Headless ask │          │
//! │        │  (ratatui)   │            │              │          │
//! │        └──────┬───────┘            └──────┬───────┘          │
//! │               └─────────────┬─────────────┘                  │
//! │                     SurfaceEvent (up)                        │
//! │                   ConductorMessage (down)                    │
//! └─────────────────────────────┼────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────┼────────────────────────────────┐
//! │                      CONDUCTOR CORE                          │
//! │  ┌──────────────────────────┴─────────────────────────────┐  │
//! │  │                      Conductor                         │  │
//! │  │  ┌────────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ │  │
//! │  │  │ Classifier │ │ Gateway  │ │ Animator │ │ Session  │ │  │
//! │  │  └────────────┘ └──────────┘ └──────────┘ └──────────┘ │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │        ┌──────────────┐            ┌──────────────┐          │
//! │        │ Blog client  │            │ Movie catalog│          │
//! │        └──────────────┘            └──────────────┘          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use terminalx_conductor::{Conductor, ConductorConfig, ResponderGateway, SurfaceEvent};
//! use terminalx_conductor::config::ApiConfig;
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (tx, mut rx) = mpsc::unbounded_channel();
//!     let gateway = ResponderGateway::from_config(&ApiConfig::default())?;
//!     let mut conductor = Conductor::new(gateway, ConductorConfig::default(), tx);
//!     conductor.start().await?;
//!
//!     conductor.handle_event(SurfaceEvent::submit("time")).await?;
//!     loop {
//!         conductor.poll().await;
//!         while let Ok(msg) = rx.try_recv() {
//!             // Render message to UI
//!         }
//!     }
//! }
//! ```
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod backend;
pub mod blog;
pub mod classifier;
pub mod conductor;
pub mod config;
pub mod events;
pub mod messages;
pub mod movies;
pub mod routing;
pub mod session;

// Re-exports for convenience
pub use animation::{TypingAnimator, TypingFrame};
pub use backend::{
    BackendError, ChatEndpoint, ChatReply, ChatRequest, HttpChatEndpoint, ResponderGateway,
    COMMUNICATION_ERROR,
};
pub use classifier::{classify, Action, Classified};
pub use conductor::{Conductor, ConductorConfig, ERROR_IN_AI_CORE};
pub use events::{SurfaceEvent, SurfaceType};
pub use messages::{
    ConductorMessage, ConductorState, MessageId, NotifyLevel, Sender, SessionId,
};
pub use routing::{resolve_with_fallback, ResolutionSource, Resolved};
pub use session::{
    CommandHistory, CpuStatus, NetworkStatus, Session, SystemStatus, TranscriptEntry,
};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, TerminalConfig,
};
