//! Chat Endpoint Trait
//!
//! A chat endpoint takes one message and returns one complete reply. The
//! gateway composes two of them (primary and fallback); tests substitute
//! in-memory endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::BackendError;

/// Body posted to a chat endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message, trimmed, original casing
    pub message: String,
    /// Session identifier (primary endpoint only)
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none", default)]
    pub session_id: Option<String>,
}

impl ChatRequest {
    /// Request without a session identifier
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: None,
        }
    }

    /// Attach a session identifier
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Body returned by a chat endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Complete reply text
    pub response: String,
}

/// A remote (or mock) chat service
#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    /// Name used in logs (e.g. "primary", "fallback")
    fn name(&self) -> &str;

    /// Send one message and wait for the complete reply
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, BackendError>;
}

#[async_trait]
impl<T: ChatEndpoint + ?Sized> ChatEndpoint for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
        (**self).send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_session_id_camel_case() {
        let request = ChatRequest::new("Hello").with_session_id("session_1_0");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "Hello", "sessionId": "session_1_0" })
        );
    }

    #[test]
    fn test_request_without_session_id_omits_field() {
        let json = serde_json::to_string(&ChatRequest::new("Hi")).unwrap();
        assert_eq!(json, r#"{"message":"Hi"}"#);
    }

    #[test]
    fn test_reply_ignores_extra_fields() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response":"OK","model":"x"}"#).unwrap();
        assert_eq!(reply.response, "OK");
    }
}
