//! Remote Responder Gateway
//!
//! Turns a delegated message into a reply string. It never fails: both
//! endpoints going down produces [`COMMUNICATION_ERROR`], which is animated
//! like any other reply.

use std::sync::Arc;

use super::error::BackendError;
use super::http::HttpChatEndpoint;
use super::traits::{ChatEndpoint, ChatRequest};
use crate::config::ApiConfig;
use crate::messages::SessionId;
use crate::routing::{resolve_with_fallback, Resolved};

/// Reply when neither endpoint answered
pub const COMMUNICATION_ERROR: &str =
    "COMMUNICATION ERROR. AI CORE UNRESPONSIVE. RETRY TRANSMISSION.";

/// Primary + fallback chat endpoints
#[derive(Clone)]
pub struct ResponderGateway {
    primary: Arc<dyn ChatEndpoint>,
    fallback: Arc<dyn ChatEndpoint>,
    /// Whether the primary request carries `sessionId`
    send_session_id: bool,
    /// Shown to surfaces in `SessionInfo`
    label: String,
}

impl std::fmt::Debug for ResponderGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponderGateway")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .field("send_session_id", &self.send_session_id)
            .field("label", &self.label)
            .finish()
    }
}

impl ResponderGateway {
    /// Compose a gateway from two endpoints
    pub fn new(primary: impl ChatEndpoint + 'static, fallback: impl ChatEndpoint + 'static) -> Self {
        Self {
            label: primary.name().to_string(),
            primary: Arc::new(primary),
            fallback: Arc::new(fallback),
            send_session_id: true,
        }
    }

    /// HTTP gateway for a configuration
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Client`] if the HTTP client cannot be built.
    pub fn from_config(api: &ApiConfig) -> Result<Self, BackendError> {
        let gateway = Self::new(
            HttpChatEndpoint::primary(api)?,
            HttpChatEndpoint::fallback(api)?,
        )
        .with_session_id(api.send_session_id)
        .with_label(api.base_url.clone());
        Ok(gateway)
    }

    /// Toggle `sessionId` on the primary request
    #[must_use]
    pub fn with_session_id(mut self, enabled: bool) -> Self {
        self.send_session_id = enabled;
        self
    }

    /// Set the label reported to surfaces
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Label reported to surfaces
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Resolve a message to reply text
    pub async fn resolve(&self, message: &str, session_id: &SessionId) -> String {
        self.resolve_detailed(message, session_id).await.into_value()
    }

    /// Resolve a message, keeping track of which stage answered
    pub async fn resolve_detailed(&self, message: &str, session_id: &SessionId) -> Resolved<String> {
        let mut primary_request = ChatRequest::new(message);
        if self.send_session_id {
            primary_request = primary_request.with_session_id(session_id.to_string());
        }
        let fallback_request = ChatRequest::new(message);

        let primary = &self.primary;
        let fallback = &self.fallback;

        let resolved = resolve_with_fallback(
            "chat",
            || async move {
                primary
                    .send(&primary_request)
                    .await
                    .map(|reply| reply.response)
            },
            || async move {
                fallback
                    .send(&fallback_request)
                    .await
                    .map(|reply| reply.response)
            },
            || COMMUNICATION_ERROR.to_string(),
        )
        .await;

        tracing::debug!(source = ?resolved.source, "Chat reply resolved");
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ChatReply;
    use crate::routing::ResolutionSource;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records requests; answers with `reply` or a 500
    struct RecordingEndpoint {
        name: &'static str,
        reply: Option<&'static str>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl RecordingEndpoint {
        fn new(name: &'static str, reply: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                name,
                reply,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatEndpoint for RecordingEndpoint {
        fn name(&self) -> &str {
            self.name
        }

        async fn send(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
            self.requests.lock().unwrap().push(request.clone());
            match self.reply {
                Some(text) => Ok(ChatReply {
                    response: text.to_string(),
                }),
                None => Err(BackendError::Status {
                    url: self.name.to_string(),
                    status: 500,
                    body: String::new(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_primary_reply_with_session_id() {
        let primary = RecordingEndpoint::new("primary", Some("GREETINGS"));
        let fallback = RecordingEndpoint::new("fallback", Some("UNUSED"));
        let gateway = ResponderGateway::new(primary.clone(), fallback.clone());
        let session_id = SessionId("session_1_0".into());

        let resolved = gateway.resolve_detailed("Hello There", &session_id).await;
        assert_eq!(resolved.value, "GREETINGS");
        assert_eq!(resolved.source, ResolutionSource::Primary);

        assert_eq!(
            primary.requests(),
            vec![ChatRequest::new("Hello There").with_session_id("session_1_0")]
        );
        assert!(fallback.requests().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_gets_same_message_without_session() {
        let primary = RecordingEndpoint::new("primary", None);
        let fallback = RecordingEndpoint::new("fallback", Some("BACKUP ONLINE"));
        let gateway = ResponderGateway::new(primary.clone(), fallback.clone());

        let reply = gateway.resolve("what is 2+2", &SessionId::new()).await;
        assert_eq!(reply, "BACKUP ONLINE");
        assert_eq!(fallback.requests(), vec![ChatRequest::new("what is 2+2")]);
    }

    #[tokio::test]
    async fn test_both_down_gives_communication_error() {
        let gateway = ResponderGateway::new(
            RecordingEndpoint::new("primary", None),
            RecordingEndpoint::new("fallback", None),
        );
        let resolved = gateway.resolve_detailed("HELLO", &SessionId::new()).await;
        assert_eq!(resolved.value, COMMUNICATION_ERROR);
        assert_eq!(resolved.source, ResolutionSource::Default);
    }

    #[tokio::test]
    async fn test_session_id_can_be_disabled() {
        let primary = RecordingEndpoint::new("primary", Some("OK"));
        let gateway = ResponderGateway::new(primary.clone(), RecordingEndpoint::new("fb", None))
            .with_session_id(false);
        gateway.resolve("hi", &SessionId::new()).await;
        assert_eq!(primary.requests()[0].session_id, None);
    }

    #[tokio::test]
    async fn test_unreachable_http_gateway_degrades_to_fixed_reply() {
        let api = ApiConfig {
            timeout_ms: 2000,
            ..ApiConfig::with_base_url("http://127.0.0.1:1")
        };
        let gateway = ResponderGateway::from_config(&api).unwrap();
        assert_eq!(gateway.label(), "http://127.0.0.1:1");
        let reply = gateway.resolve("HELLO", &SessionId::new()).await;
        assert_eq!(reply, COMMUNICATION_ERROR);
    }
}
