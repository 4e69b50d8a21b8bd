//! Request Routing
//!
//! Every remote collaborator is reached through the same degrade path:
//! primary, then one fallback, then a fixed local value.

pub mod fallback;

pub use fallback::{resolve_with_fallback, ResolutionSource, Resolved};
