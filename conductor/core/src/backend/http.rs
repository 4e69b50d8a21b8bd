//! HTTP Chat Endpoint
//!
//! `POST {url}` with a JSON [`ChatRequest`], expecting `{ "response": ... }`.
//! Any non-2xx status or undecodable body is an error; the gateway decides
//! what happens next.
//!
//! The helpers here are shared by the blog and movie clients.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::error::BackendError;
use super::traits::{ChatEndpoint, ChatReply, ChatRequest};
use crate::config::ApiConfig;

/// Build a client with a fixed per-request timeout
///
/// # Errors
///
/// Returns [`BackendError::Client`] if the TLS backend cannot initialize.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, BackendError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(BackendError::Client)
}

/// Send a prepared request and decode a JSON body
///
/// # Errors
///
/// Transport failures, non-success statuses and bodies that do not decode
/// into `T` each map to their own [`BackendError`] variant.
pub async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    url: &str,
) -> Result<T, BackendError> {
    let body = send_text(request, url).await?;
    serde_json::from_str(&body).map_err(|e| BackendError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Send a prepared request and return the raw body of a success response
///
/// # Errors
///
/// See [`send_json`].
pub async fn send_text(request: reqwest::RequestBuilder, url: &str) -> Result<String, BackendError> {
    let response = request.send().await.map_err(|e| BackendError::Transport {
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| BackendError::Transport {
        url: url.to_string(),
        source: e,
    })?;

    if !status.is_success() {
        return Err(BackendError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Chat endpoint reached over HTTP
#[derive(Clone, Debug)]
pub struct HttpChatEndpoint {
    /// Name used in logs
    name: String,
    /// Full endpoint URL
    url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpChatEndpoint {
    /// Create an endpoint for a full URL
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Client`] if the HTTP client cannot be built.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        Ok(Self {
            name: name.into(),
            url: url.into(),
            http_client: build_client(timeout)?,
        })
    }

    /// The primary chat endpoint for a configuration
    ///
    /// # Errors
    ///
    /// See [`HttpChatEndpoint::new`].
    pub fn primary(api: &ApiConfig) -> Result<Self, BackendError> {
        Self::new("primary", api.chat_url(), api.timeout())
    }

    /// The fallback chat endpoint for a configuration
    ///
    /// # Errors
    ///
    /// See [`HttpChatEndpoint::new`].
    pub fn fallback(api: &ApiConfig) -> Result<Self, BackendError> {
        Self::new("fallback", api.fallback_url(), api.timeout())
    }

    /// Endpoint URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatEndpoint for HttpChatEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
        let builder = self.http_client.post(&self.url).json(request);
        send_json(builder, &self.url).await
    }
}
