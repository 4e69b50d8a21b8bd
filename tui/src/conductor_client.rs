//! Conductor Client
//!
//! Thin wrapper around the Conductor for surface integration.
//! This client embeds the Conductor directly (no network) and provides
//! a convenient interface for sending events and receiving messages.
//!
//! # Architecture
//!
//! Surfaces are thin clients with no exchange logic of their own:
//! 1. Convert terminal input to SurfaceEvents
//! 2. Send SurfaceEvents to the Conductor
//! 3. Receive ConductorMessages
//! 4. Render display state based on messages

use tokio::sync::mpsc;

use terminalx_conductor::{
    Conductor, ConductorConfig, ConductorMessage, ConductorState, ResponderGateway, Session,
    SurfaceEvent, SurfaceType, TerminalConfig,
};

/// Client for communicating with the embedded Conductor
pub struct ConductorClient {
    /// The embedded Conductor instance
    conductor: Conductor,
    /// Receiver for messages from Conductor
    rx: mpsc::UnboundedReceiver<ConductorMessage>,
}

impl ConductorClient {
    /// Create a client whose Conductor talks to the configured chat service
    pub fn new(config: &TerminalConfig) -> anyhow::Result<Self> {
        let gateway = ResponderGateway::from_config(&config.api)?;
        Ok(Self::with_gateway(
            gateway,
            ConductorConfig::from_session(&config.session),
        ))
    }

    /// Create a client over an explicit gateway
    pub fn with_gateway(gateway: ResponderGateway, config: ConductorConfig) -> Self {
        // Create channel for Conductor -> surface messages
        let (tx, rx) = mpsc::unbounded_channel();
        let conductor = Conductor::new(gateway, config, tx);
        Self { conductor, rx }
    }

    /// Start the Conductor (publishes the opening snapshot)
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.conductor.start().await
    }

    /// Connect this surface to the Conductor
    pub async fn connect(&mut self, surface_type: SurfaceType) -> anyhow::Result<()> {
        self.conductor
            .handle_event(SurfaceEvent::Connected { surface_type })
            .await
    }

    /// Send one line of input
    pub async fn submit(&mut self, content: impl Into<String>) -> anyhow::Result<()> {
        self.conductor
            .handle_event(SurfaceEvent::submit(content))
            .await
    }

    /// Notify Conductor that the operator wants to quit
    pub async fn request_quit(&mut self) -> anyhow::Result<()> {
        self.conductor.handle_event(SurfaceEvent::QuitRequested).await
    }

    /// Advance timers (must be called regularly)
    pub async fn poll(&mut self) -> bool {
        self.conductor.poll().await
    }

    /// Drive the current exchange to completion
    pub async fn run_until_idle(&mut self) {
        self.conductor.run_until_idle().await;
    }

    /// Receive all pending messages from the Conductor (non-blocking)
    pub fn recv_all(&mut self) -> Vec<ConductorMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Get the current Conductor state
    pub fn state(&self) -> ConductorState {
        self.conductor.state()
    }

    /// Whether input is accepted right now
    pub fn can_submit(&self) -> bool {
        self.conductor.can_submit()
    }

    /// Session owned by the Conductor
    pub fn session(&self) -> &Session {
        self.conductor.session()
    }
}
