//! TERMINALX-9000 terminal surface
//!
//! This crate provides the full-screen retro terminal and the `terminalx`
//! command line. All exchange logic lives in `terminalx-conductor`; this
//! crate only turns key presses into surface events and messages into frames.
//!
//! # Architecture
//!
//! - **App**: ratatui frame loop over the crossterm event stream
//! - **DisplayState**: transcript and panels mirrored from Conductor messages
//! - **ConductorClient**: the embedded Conductor and its message channel
//! - **Commands**: headless `ask`, `movies` and `blog` runners
//! - **terminal**: raw mode, alternate screen and the panic hook

pub mod app;
pub mod cli;
pub mod commands;
pub mod conductor_client;
pub mod display;
pub mod terminal;
pub mod theme;

pub use app::App;
pub use conductor_client::ConductorClient;
