//! Conductor - The Orchestration Core
//!
//! The Conductor owns one terminal session and drives every exchange through
//! the same cycle:
//!
//! ```text
//!        submit (non-empty)          resolved              complete
//! Idle ─────────────────────► Thinking ───────► Typing ───────────► Idle
//!   ▲                            │                 │
//!   └──── submits while busy are dropped ──────────┘
//! ```
//!
//! Resolution (the artificial delay plus either a local reply or a gateway
//! call) runs on a spawned task. Everything else, including every session
//! mutation, happens inside Conductor methods on the surface's task: the
//! surface calls [`Conductor::poll`] from its frame loop and the Conductor
//! advances timers and emits [`ConductorMessage`]s.
//!
//! The Conductor is UI-agnostic. The terminal UI and the headless `ask`
//! runner talk to it the same way.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::animation::{TypingAnimator, TypingFrame, DEFAULT_TYPING_INTERVAL};
use crate::backend::ResponderGateway;
use crate::classifier::{self, Action};
use crate::config::SessionConfig;
use crate::events::SurfaceEvent;
use crate::messages::{ConductorMessage, ConductorState, MessageId, NotifyLevel};
use crate::routing::ResolutionSource;
use crate::session::Session;

/// Reply when the resolution task itself faults
pub const ERROR_IN_AI_CORE: &str = "ERROR IN AI CORE. SYSTEM MALFUNCTION.";

/// Line sent with `Quit`
pub const FAREWELL: &str = "SESSION TERMINATED. GOODBYE.";

/// Notice when the fallback endpoint answered
pub const LINK_FALLBACK_NOTICE: &str = "PRIMARY AI CORE OFFLINE. ROUTED VIA BACKUP LINK.";

/// Notice when neither endpoint answered
pub const LINK_DOWN_NOTICE: &str = "AI CORE LINK DOWN.";

/// Notice when the primary endpoint answers again after a degraded exchange
pub const LINK_RESTORED_NOTICE: &str = "PRIMARY AI CORE LINK RESTORED.";

/// How often `run_until_idle` checks on a pending resolution
const RESOLUTION_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Conductor configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConductorConfig {
    /// Range of the artificial thinking delay
    pub thinking_delay: RangeInclusive<Duration>,
    /// Typewriter interval per character
    pub typing_interval: Duration,
    /// Delay before the STATUS reshuffle lands
    pub status_delay: Duration,
    /// Random seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for ConductorConfig {
    fn default() -> Self {
        Self {
            thinking_delay: Duration::from_millis(500)..=Duration::from_millis(2000),
            typing_interval: DEFAULT_TYPING_INTERVAL,
            status_delay: Duration::from_millis(1000),
            seed: None,
        }
    }
}

impl ConductorConfig {
    /// Pacing from the `[session]` configuration section
    #[must_use]
    pub fn from_session(session: &SessionConfig) -> Self {
        Self {
            thinking_delay: session.thinking_range(),
            typing_interval: session.typing_interval(),
            status_delay: session.status_delay(),
            seed: session.seed,
        }
    }

    /// Fixed thinking delay
    #[must_use]
    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay..=delay;
        self
    }

    /// Set the seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Output of the resolution task
struct Resolution {
    reply: String,
    /// Which endpoint answered; `None` for local commands
    source: Option<ResolutionSource>,
}

/// Submission in the Thinking state
struct PendingExchange {
    /// What the classifier decided
    action: Action,
    /// Delay + reply resolution
    task: JoinHandle<Resolution>,
}

/// Animation in the Typing state
struct ActiveTyping {
    /// Placeholder entry being written
    message_id: MessageId,
    /// Cursor over the reply
    animator: TypingAnimator,
    /// CLEAR resets the transcript once its reply is shown
    clear_on_complete: bool,
}

/// The Conductor - headless orchestration core
pub struct Conductor {
    /// Configuration
    config: ConductorConfig,
    /// Chat endpoints
    gateway: Arc<ResponderGateway>,
    /// Current session
    session: Session,
    /// Current operational state
    state: ConductorState,
    /// Channel to send messages to UI surface
    tx: mpsc::UnboundedSender<ConductorMessage>,
    /// Delay and status randomness
    rng: StdRng,
    /// Last delegated exchange missed the primary endpoint
    link_degraded: bool,
    /// Resolution in flight
    pending: Option<PendingExchange>,
    /// Animation in flight
    typing: Option<ActiveTyping>,
    /// When the STATUS reshuffle lands
    status_due: Option<Instant>,
}

impl Conductor {
    /// Create a new Conductor with the given gateway
    pub fn new(
        gateway: ResponderGateway,
        config: ConductorConfig,
        tx: mpsc::UnboundedSender<ConductorMessage>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            gateway: Arc::new(gateway),
            session: Session::new(),
            state: ConductorState::Idle,
            tx,
            rng,
            link_degraded: false,
            pending: None,
            typing: None,
            status_due: None,
        }
    }

    /// Replace the random source with a seeded one
    #[must_use]
    pub fn with_rng(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Get current state
    pub fn state(&self) -> ConductorState {
        self.state
    }

    /// Get the session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether a submission would be accepted right now
    pub fn can_submit(&self) -> bool {
        self.state == ConductorState::Idle
    }

    /// Whether nothing is scheduled: no resolution, animation or status timer
    pub fn is_settled(&self) -> bool {
        self.pending.is_none() && self.typing.is_none() && self.status_due.is_none()
    }

    /// Start the Conductor and publish the opening snapshot
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.set_state(ConductorState::Idle);
        self.send_snapshot();
        tracing::debug!(session = %self.session.id, "Conductor started");
        Ok(())
    }

    /// Handle an event from the UI surface
    pub async fn handle_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        match event {
            SurfaceEvent::Connected { surface_type } => {
                tracing::debug!(?surface_type, "Surface connected");
                self.send(ConductorMessage::State { state: self.state });
                self.send_snapshot();
            }

            SurfaceEvent::Submit { content } => {
                self.submit(&content);
            }

            SurfaceEvent::QuitRequested => {
                self.shutdown().await?;
            }
        }

        Ok(())
    }

    /// Accept one line of input
    ///
    /// Returns `false` when the line was dropped (empty, or a response is
    /// already in flight).
    fn submit(&mut self, content: &str) -> bool {
        if !self.can_submit() {
            tracing::debug!(state = ?self.state, "Dropping submit while busy");
            return false;
        }
        let Some(classified) = classifier::classify(content) else {
            return false;
        };

        let entry = self.session.add_user_entry(&classified.normalized).clone();
        self.send(ConductorMessage::Message {
            id: entry.id,
            sender: entry.sender,
            text: entry.text,
        });
        self.send(ConductorMessage::History {
            commands: self.session.history().to_vec(),
        });

        let delay = self.thinking_delay();
        let task = self.spawn_resolution(classified.action.clone(), delay);
        self.pending = Some(PendingExchange {
            action: classified.action,
            task,
        });
        self.set_state(ConductorState::Thinking);
        true
    }

    /// Draw the artificial delay for one submission
    fn thinking_delay(&mut self) -> Duration {
        let range = self.config.thinking_delay.clone();
        if range.start() >= range.end() {
            return *range.start();
        }
        self.rng.gen_range(range)
    }

    /// Spawn delay + resolution for an action
    fn spawn_resolution(&self, action: Action, delay: Duration) -> JoinHandle<Resolution> {
        let gateway = Arc::clone(&self.gateway);
        let session_id = self.session.id.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match action {
                Action::Delegate(message) => {
                    let resolved = gateway.resolve_detailed(&message, &session_id).await;
                    Resolution {
                        reply: resolved.value,
                        source: Some(resolved.source),
                    }
                }
                local => Resolution {
                    reply: classifier::local_reply_now(&local).unwrap_or_default(),
                    source: None,
                },
            }
        })
    }

    /// Advance the exchange: collect a finished resolution, emit due typing
    /// frames, land a due status reshuffle
    ///
    /// Call this regularly. Returns true if anything changed.
    pub async fn poll(&mut self) -> bool {
        if self.state == ConductorState::ShuttingDown {
            return false;
        }

        let mut activity = false;

        if self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.task.is_finished())
        {
            if let Some(pending) = self.pending.take() {
                let resolution = match pending.task.await {
                    Ok(resolution) => resolution,
                    Err(e) => {
                        tracing::error!("Resolution task failed: {e}");
                        Resolution {
                            reply: ERROR_IN_AI_CORE.to_string(),
                            source: None,
                        }
                    }
                };
                // The status panel reshuffles a fixed delay after STATUS is answered
                if pending.action == Action::ReportStatus {
                    self.status_due = Some(Instant::now() + self.config.status_delay);
                }
                let clear = pending.action == Action::ClearScreen;
                self.begin_typing(&resolution.reply, clear);
                if let Some(source) = resolution.source {
                    self.report_link(source);
                }
                activity = true;
            }
        }

        let now = Instant::now();
        let frames = match self.typing.as_mut() {
            Some(typing) => typing.animator.due_frames(now),
            None => Vec::new(),
        };
        for frame in frames {
            activity = true;
            match frame {
                TypingFrame::Update(partial) => self.apply_typing_update(partial),
                TypingFrame::Complete => self.finish_typing(),
            }
        }

        if self.status_due.is_some_and(|due| now >= due) {
            self.status_due = None;
            let (cpu_roll, network_roll) = (self.rng.gen::<f64>(), self.rng.gen::<f64>());
            self.session.status_mut().reshuffle(cpu_roll, network_roll);
            self.send(ConductorMessage::Status {
                status: self.session.status().clone(),
            });
            activity = true;
        }

        activity
    }

    /// Poll until nothing is scheduled
    ///
    /// Used by the headless runner and tests; sleeps between deadlines so
    /// paused-clock tests advance deterministically.
    pub async fn run_until_idle(&mut self) {
        while self.state != ConductorState::ShuttingDown && !self.is_settled() {
            let wake = self.next_deadline();
            tokio::time::sleep_until(wake).await;
            self.poll().await;
        }
    }

    /// Earliest moment `poll` has something to do
    fn next_deadline(&self) -> Instant {
        let now = Instant::now();
        let mut deadline = None::<Instant>;
        let mut consider = |t: Instant| {
            deadline = Some(deadline.map_or(t, |d| d.min(t)));
        };

        if self.pending.is_some() {
            consider(now + RESOLUTION_POLL_INTERVAL);
        }
        if let Some(typing) = &self.typing {
            consider(typing.animator.next_tick());
        }
        if let Some(due) = self.status_due {
            consider(due);
        }
        deadline.unwrap_or(now)
    }

    /// Raise a notice when the chat link degrades or recovers
    fn report_link(&mut self, source: ResolutionSource) {
        match source {
            ResolutionSource::Primary => {
                if self.link_degraded {
                    self.link_degraded = false;
                    self.notify(NotifyLevel::Info, LINK_RESTORED_NOTICE);
                }
            }
            ResolutionSource::Fallback => {
                self.link_degraded = true;
                self.notify(NotifyLevel::Warning, LINK_FALLBACK_NOTICE);
            }
            ResolutionSource::Default => {
                self.link_degraded = true;
                self.notify(NotifyLevel::Error, LINK_DOWN_NOTICE);
            }
        }
    }

    /// Thinking -> Typing
    fn begin_typing(&mut self, reply: &str, clear_on_complete: bool) {
        let message_id = self.session.start_typing();
        self.send(ConductorMessage::TypingStarted {
            message_id: message_id.clone(),
        });
        self.typing = Some(ActiveTyping {
            message_id,
            animator: TypingAnimator::new(reply, self.config.typing_interval, Instant::now()),
            clear_on_complete,
        });
        self.set_state(ConductorState::Typing);
    }

    fn apply_typing_update(&mut self, partial: String) {
        let Some(message_id) = self.typing.as_ref().map(|t| t.message_id.clone()) else {
            return;
        };
        if self.session.update_typing(&partial).is_some() {
            self.send(ConductorMessage::TypingUpdate {
                message_id,
                partial,
            });
        }
    }

    /// Typing -> Idle
    fn finish_typing(&mut self) {
        let Some(typing) = self.typing.take() else {
            return;
        };
        self.session.complete_typing();
        self.send(ConductorMessage::TypingComplete {
            message_id: typing.message_id,
        });

        if typing.clear_on_complete {
            let entries = self.session.clear_screen().to_vec();
            self.send(ConductorMessage::TranscriptReset { entries });
        }

        self.set_state(ConductorState::Idle);
    }

    /// Shut down the Conductor
    ///
    /// Aborts any resolution in flight, drops a half-typed entry and cancels
    /// the status timer. Nothing is emitted after the `Quit` message.
    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        if self.state == ConductorState::ShuttingDown {
            return Ok(());
        }
        self.teardown();
        self.set_state(ConductorState::ShuttingDown);
        self.send(ConductorMessage::Quit {
            message: Some(FAREWELL.to_string()),
        });
        Ok(())
    }

    fn teardown(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
        if self.typing.take().is_some() {
            self.session.cancel_typing();
        }
        self.status_due = None;
    }

    /// Send transcript, history, status and session info
    fn send_snapshot(&self) {
        self.send(ConductorMessage::SessionInfo {
            session_id: self.session.id.clone(),
            endpoint: self.gateway.label().to_string(),
        });
        self.send(ConductorMessage::TranscriptReset {
            entries: self.session.transcript().to_vec(),
        });
        self.send(ConductorMessage::History {
            commands: self.session.history().to_vec(),
        });
        self.send(ConductorMessage::Status {
            status: self.session.status().clone(),
        });
    }

    /// Show a notification outside the transcript
    fn notify(&self, level: NotifyLevel, message: &str) {
        self.send(ConductorMessage::Notify {
            level,
            message: message.to_string(),
        });
    }

    /// Set state and notify UI
    fn set_state(&mut self, state: ConductorState) {
        if self.state != state {
            tracing::debug!(from = ?self.state, to = ?state, "State transition");
        }
        self.state = state;
        self.send(ConductorMessage::State { state });
    }

    /// Send a message to the UI surface
    fn send(&self, msg: ConductorMessage) {
        if let Err(e) = self.tx.send(msg) {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}

impl Drop for Conductor {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, ChatEndpoint, ChatReply, ChatRequest};
    use crate::classifier::{CLEAR_REPLY, STATUS_REPLY};
    use crate::messages::Sender;
    use crate::session::{CLEARED_BANNER, WELCOME_BANNER};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    // Mock endpoint for testing
    struct MockEndpoint(Option<&'static str>);

    #[async_trait]
    impl ChatEndpoint for MockEndpoint {
        fn name(&self) -> &str {
            "mock"
        }

        async fn send(&self, _request: &ChatRequest) -> Result<ChatReply, BackendError> {
            match self.0 {
                Some(text) => Ok(ChatReply {
                    response: text.to_string(),
                }),
                None => Err(BackendError::NotConfigured("mock")),
            }
        }
    }

    fn conductor(
        reply: Option<&'static str>,
    ) -> (Conductor, mpsc::UnboundedReceiver<ConductorMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let gateway = ResponderGateway::new(MockEndpoint(reply), MockEndpoint(None));
        let config = ConductorConfig {
            thinking_delay: Duration::from_millis(100)..=Duration::from_millis(100),
            typing_interval: Duration::from_millis(10),
            status_delay: Duration::from_millis(1000),
            seed: Some(7),
        };
        (Conductor::new(gateway, config, tx), rx)
    }

    fn texts(conductor: &Conductor) -> Vec<String> {
        conductor
            .session()
            .transcript()
            .iter()
            .map(|e| e.text.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_conductor_creation() {
        let (conductor, _rx) = conductor(Some("HI"));
        assert_eq!(conductor.state(), ConductorState::Idle);
        assert!(conductor.can_submit());
        assert!(conductor.is_settled());
        assert_eq!(texts(&conductor), WELCOME_BANNER.to_vec());
    }

    #[tokio::test]
    async fn test_conductor_start_sends_snapshot() {
        let (mut conductor, mut rx) = conductor(Some("HI"));
        conductor.start().await.unwrap();

        let msg = rx.recv().await.unwrap();
        assert!(matches!(msg, ConductorMessage::State { .. }));
        let msg = rx.recv().await.unwrap();
        assert!(matches!(msg, ConductorMessage::SessionInfo { .. }));
        match rx.recv().await.unwrap() {
            ConductorMessage::TranscriptReset { entries } => assert_eq!(entries.len(), 3),
            other => panic!("Expected TranscriptReset, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_delegated_exchange() {
        let (mut conductor, _rx) = conductor(Some("AFFIRMATIVE"));
        conductor
            .handle_event(SurfaceEvent::submit("hello"))
            .await
            .unwrap();
        assert_eq!(conductor.state(), ConductorState::Thinking);
        assert!(!conductor.can_submit());

        conductor.run_until_idle().await;

        assert_eq!(conductor.state(), ConductorState::Idle);
        let transcript = conductor.session().transcript();
        let user = &transcript[transcript.len() - 2];
        let ai = &transcript[transcript.len() - 1];
        assert_eq!((user.sender, user.text.as_str()), (Sender::User, "HELLO"));
        assert_eq!((ai.sender, ai.text.as_str()), (Sender::Ai, "AFFIRMATIVE"));
        assert!(!ai.typing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_resets_after_animation() {
        let (mut conductor, _rx) = conductor(None);
        conductor
            .handle_event(SurfaceEvent::submit("  Clear "))
            .await
            .unwrap();

        // Resolved at 100ms, first tick due at 160ms
        tokio::time::sleep(Duration::from_millis(150)).await;
        conductor.poll().await;
        assert_eq!(conductor.state(), ConductorState::Typing);

        // Partway through the animation the reply is still visible
        tokio::time::sleep(Duration::from_millis(35)).await;
        conductor.poll().await;
        let last = conductor.session().last_entry().unwrap().text.clone();
        assert_eq!(last, &CLEAR_REPLY[..3]);

        conductor.run_until_idle().await;
        assert_eq!(texts(&conductor), CLEARED_BANNER.to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_reply_and_reshuffle() {
        let (mut conductor, mut rx) = conductor(None);
        conductor
            .handle_event(SurfaceEvent::submit("status"))
            .await
            .unwrap();
        conductor.run_until_idle().await;

        assert!(conductor.can_submit());
        assert_eq!(
            conductor.session().last_entry().unwrap().text,
            STATUS_REPLY
        );

        let mut saw_status = false;
        while let Ok(msg) = rx.try_recv() {
            if matches!(msg, ConductorMessage::Status { .. }) {
                saw_status = true;
            }
        }
        assert!(saw_status);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_while_busy_is_dropped() {
        let (mut conductor, _rx) = conductor(Some("ONE"));
        conductor
            .handle_event(SurfaceEvent::submit("first"))
            .await
            .unwrap();
        conductor
            .handle_event(SurfaceEvent::submit("second"))
            .await
            .unwrap();
        conductor.run_until_idle().await;

        assert_eq!(conductor.session().history().to_vec(), vec!["FIRST"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_aborts_pending() {
        let (mut conductor, mut rx) = conductor(Some("NEVER SHOWN"));
        conductor
            .handle_event(SurfaceEvent::submit("hello"))
            .await
            .unwrap();
        conductor
            .handle_event(SurfaceEvent::QuitRequested)
            .await
            .unwrap();
        assert_eq!(conductor.state(), ConductorState::ShuttingDown);
        assert!(conductor.is_settled());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!conductor.poll().await);

        let mut last = None;
        while let Ok(msg) = rx.try_recv() {
            last = Some(msg);
        }
        assert!(matches!(last, Some(ConductorMessage::Quit { .. })));
        assert!(!texts(&conductor).contains(&"NEVER SHOWN".to_string()));
    }

    #[tokio::test]
    async fn test_seeded_delays_repeat() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let gateway = ResponderGateway::new(MockEndpoint(None), MockEndpoint(None));
        let mut a = Conductor::new(gateway.clone(), ConductorConfig::default(), tx.clone())
            .with_rng(42);
        let mut b = Conductor::new(gateway, ConductorConfig::default(), tx).with_rng(42);

        for _ in 0..5 {
            let delay = a.thinking_delay();
            assert_eq!(delay, b.thinking_delay());
            assert!(ConductorConfig::default().thinking_delay.contains(&delay));
        }
    }
}
