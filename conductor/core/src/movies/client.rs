//! TMDB v3 client
//!
//! Every request carries `api_key` and `language` as query parameters.

use std::time::Duration;

use super::types::{MovieDetails, MoviePage};
use crate::backend::{build_client, send_json, BackendError};
use crate::config::MovieConfig;

/// Thin TMDB client; errors are handed to the catalog to absorb
#[derive(Clone, Debug)]
pub struct TmdbClient {
    base_url: String,
    api_key: Option<String>,
    language: String,
    http_client: reqwest::Client,
}

impl TmdbClient {
    /// Create a client for a configuration
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &MovieConfig, timeout: Duration) -> Result<Self, BackendError> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            http_client: build_client(timeout)?,
        })
    }

    fn get(&self, path: &str) -> Result<(reqwest::RequestBuilder, String), BackendError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(BackendError::NotConfigured("TMDB API key"))?;
        let url = format!("{}{path}", self.base_url);
        let builder = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key), ("language", self.language.as_str())]);
        Ok((builder, url))
    }

    /// `GET /movie/top_rated?page=N`
    ///
    /// # Errors
    ///
    /// Missing API key, transport, status or decode failures.
    pub async fn top_rated(&self, page: u32) -> Result<MoviePage, BackendError> {
        let (builder, url) = self.get("/movie/top_rated")?;
        let builder = builder.query(&[("page", page.max(1))]);
        send_json(builder, &url).await
    }

    /// `GET /movie/{id}?append_to_response=videos,credits`
    ///
    /// # Errors
    ///
    /// Missing API key, transport, status or decode failures.
    pub async fn movie_details(&self, id: u64) -> Result<MovieDetails, BackendError> {
        let (builder, url) = self.get(&format!("/movie/{id}"))?;
        let builder = builder.query(&[("append_to_response", "videos,credits")]);
        send_json(builder, &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let client = TmdbClient::new(&MovieConfig::default(), Duration::from_secs(1)).unwrap();
        let err = client.top_rated(1).await.unwrap_err();
        assert!(matches!(err, BackendError::NotConfigured(_)));
    }
}
