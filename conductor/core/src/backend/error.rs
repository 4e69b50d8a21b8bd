//! Backend error type shared by every HTTP collaborator

use thiserror::Error;

/// Errors from a remote collaborator
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection, timeout or other transport failure
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Request URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{url} returned {status}: {body}")]
    Status {
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body (may be empty)
        body: String,
    },

    /// Body was not the expected shape
    #[error("could not decode response from {url}: {reason}")]
    Decode {
        /// Request URL
        url: String,
        /// Decoder message
        reason: String,
    },

    /// A required setting is missing
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// Building the HTTP client failed
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl BackendError {
    /// Whether the server said the resource does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_and_not_found() {
        let err = BackendError::Status {
            url: "http://x/api/blog/posts/1".into(),
            status: 404,
            body: "Post not found".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "http://x/api/blog/posts/1 returned 404: Post not found"
        );
        assert!(!BackendError::NotConfigured("TMDB API key").is_not_found());
    }
}
