//! Remote Collaborators
//!
//! Chat endpoints behind a common trait, the gateway that chains them, and
//! the HTTP plumbing shared with the blog and movie clients.
//!
//! # Usage
//!
//! ```ignore
//! use terminalx_conductor::backend::ResponderGateway;
//! use terminalx_conductor::config::ApiConfig;
//!
//! let gateway = ResponderGateway::from_config(&ApiConfig::default())?;
//! let reply = gateway.resolve("Hello", &session_id).await;
//! ```

mod error;
mod gateway;
mod http;
mod traits;

pub use error::BackendError;
pub use gateway::{ResponderGateway, COMMUNICATION_ERROR};
pub use http::{build_client, send_json, send_text, HttpChatEndpoint};
pub use traits::{ChatEndpoint, ChatReply, ChatRequest};
