//! Panic hook tests
//!
//! The hook is process-wide, so this binary holds a single test. It runs the
//! Conductor on a multi-threaded runtime the way the binary does, with the
//! test thread playing the UI thread.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use terminalx_conductor::{
    BackendError, ChatEndpoint, ChatReply, ChatRequest, ConductorConfig, ResponderGateway,
    ERROR_IN_AI_CORE,
};
use terminalx_tui::terminal::install_panic_hook_with;
use terminalx_tui::ConductorClient;

/// Endpoint that panics on every request
struct FaultyEndpoint;

#[async_trait]
impl ChatEndpoint for FaultyEndpoint {
    fn name(&self) -> &str {
        "faulty"
    }

    async fn send(&self, _request: &ChatRequest) -> Result<ChatReply, BackendError> {
        panic!("endpoint fault");
    }
}

#[test]
fn test_resolution_fault_leaves_terminal_alone() {
    let restores = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&restores);
    install_panic_hook_with(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();

    let last = runtime.block_on(async {
        let gateway = ResponderGateway::new(FaultyEndpoint, FaultyEndpoint);
        let config = ConductorConfig {
            thinking_delay: Duration::from_millis(5)..=Duration::from_millis(5),
            typing_interval: Duration::from_millis(1),
            ..ConductorConfig::default()
        };
        let mut client = ConductorClient::with_gateway(gateway, config);
        client.submit("hello").await.unwrap();
        client.run_until_idle().await;
        client.session().last_entry().map(|e| e.text.clone())
    });

    assert_eq!(last.as_deref(), Some(ERROR_IN_AI_CORE));
    assert_eq!(restores.load(Ordering::SeqCst), 0);

    // A panic on the UI thread itself still restores the terminal
    let result = std::panic::catch_unwind(|| panic!("frame loop fault"));
    assert!(result.is_err());
    assert_eq!(restores.load(Ordering::SeqCst), 1);
}
