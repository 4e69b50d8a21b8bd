//! Fallback Chain
//!
//! A single shape shared by every remote collaborator:
//!
//! ```text
//! primary() ──ok──► value (Primary)
//!    │
//!   err
//!    ▼
//! fallback() ──ok──► value (Fallback)
//!    │
//!   err
//!    ▼
//! default ─────────► value (Default)
//! ```
//!
//! Exactly one fallback attempt, no backoff. Errors never escape: each failed
//! stage is logged and the chain moves on.

use std::fmt::Display;
use std::future::Future;

// ============================================================================
// Resolution
// ============================================================================

/// Which stage of the chain produced a value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionSource {
    /// The primary source answered
    Primary,
    /// The primary failed and the fallback answered
    Fallback,
    /// Both failed; the fixed default was used
    Default,
}

impl ResolutionSource {
    /// Whether any remote stage failed on the way
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !matches!(self, Self::Primary)
    }
}

/// A value plus the stage that produced it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where it came from
    pub source: ResolutionSource,
}

impl<T> Resolved<T> {
    /// Discard the source
    pub fn into_value(self) -> T {
        self.value
    }
}

// ============================================================================
// Chain
// ============================================================================

/// Run `primary`, then `fallback` if it fails, then fall back to `default`
///
/// `label` names the collaborator in log lines. `default` is only built when
/// both remote stages fail.
pub async fn resolve_with_fallback<T, E1, E2, P, PF, F, FF, D>(
    label: &str,
    primary: P,
    fallback: F,
    default: D,
) -> Resolved<T>
where
    P: FnOnce() -> PF,
    PF: Future<Output = Result<T, E1>>,
    F: FnOnce() -> FF,
    FF: Future<Output = Result<T, E2>>,
    D: FnOnce() -> T,
    E1: Display,
    E2: Display,
{
    match primary().await {
        Ok(value) => {
            return Resolved {
                value,
                source: ResolutionSource::Primary,
            }
        }
        Err(e) => tracing::warn!("{label}: primary failed, trying fallback: {e}"),
    }

    match fallback().await {
        Ok(value) => Resolved {
            value,
            source: ResolutionSource::Fallback,
        },
        Err(e) => {
            tracing::warn!("{label}: fallback failed, using default: {e}");
            Resolved {
                value: default(),
                source: ResolutionSource::Default,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_primary_wins() {
        let fallback_calls = AtomicUsize::new(0);
        let resolved = resolve_with_fallback(
            "test",
            || async { Ok::<_, String>("primary") },
            || async {
                fallback_calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>("fallback")
            },
            || "default",
        )
        .await;

        assert_eq!(resolved.value, "primary");
        assert_eq!(resolved.source, ResolutionSource::Primary);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_after_primary_failure() {
        let resolved = resolve_with_fallback(
            "test",
            || async { Err::<&str, _>("down") },
            || async { Ok::<_, String>("fallback") },
            || "default",
        )
        .await;

        assert_eq!(resolved.value, "fallback");
        assert_eq!(resolved.source, ResolutionSource::Fallback);
        assert!(resolved.source.is_degraded());
    }

    #[tokio::test]
    async fn test_default_when_both_fail() {
        let resolved = resolve_with_fallback(
            "test",
            || async { Err::<String, _>("down") },
            || async { Err::<String, _>("also down") },
            || "default".to_string(),
        )
        .await;

        assert_eq!(resolved.source, ResolutionSource::Default);
        assert_eq!(resolved.into_value(), "default");
    }
}
