//! Movie Catalog
//!
//! Top-rated listings and detail records from TMDB, degrading to a small
//! local database. Callers always get something to show; when the data is
//! local the result carries a notice line for the user.
//!
//! ```text
//! TMDB ──err──► local database ──miss──► placeholder
//! ```

mod client;
mod fallback;
mod types;

use std::time::Duration;

pub use client::TmdbClient;
pub use fallback::UNAVAILABLE_TITLE;
pub use types::{
    backdrop_url, format_rating, format_runtime, poster_url, CastMember, Credits, Genre, Movie,
    MovieDetails, MoviePage, Video, Videos, BACKDROP_BASE_URL, CAST_LIMIT, MAX_TOP_RATED_PAGES,
    POSTER_BASE_URL,
};

use crate::backend::BackendError;
use crate::config::MovieConfig;
use crate::routing::{resolve_with_fallback, Resolved};

/// Shown when a listing comes from the local database
pub const LISTING_NOTICE: &str = "CONNECTION LOST. USING LOCAL DATABASE...";

/// Shown when a detail record comes from the local database
pub const DETAILS_NOTICE: &str = "ACCESSING SECURE FILM DATABASE... CONNECTION FAILED";

/// TMDB with a local safety net
#[derive(Clone, Debug)]
pub struct MovieCatalog {
    client: TmdbClient,
}

impl MovieCatalog {
    /// Create a catalog over a client
    pub fn new(client: TmdbClient) -> Self {
        Self { client }
    }

    /// Create a catalog for a configuration
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Client`] if the HTTP client cannot be built.
    pub fn from_config(config: &MovieConfig, timeout: Duration) -> Result<Self, BackendError> {
        Ok(Self::new(TmdbClient::new(config, timeout)?))
    }

    /// One page of the top-rated listing
    ///
    /// The local database only has a first page; later pages resolve to an
    /// empty page.
    pub async fn top_rated(&self, page: u32) -> Resolved<MoviePage> {
        let page = page.max(1);
        resolve_with_fallback(
            "movies",
            || self.client.top_rated(page),
            || async move {
                if page == 1 {
                    Ok(fallback::top_movies())
                } else {
                    Err(format!("local database has no page {page}"))
                }
            },
            || MoviePage {
                page,
                results: Vec::new(),
                total_pages: 1,
                total_results: 0,
            },
        )
        .await
    }

    /// Full record for one movie
    pub async fn movie_details(&self, id: u64) -> Resolved<MovieDetails> {
        resolve_with_fallback(
            "movie details",
            || self.client.movie_details(id),
            || async move {
                fallback::movie_details(id).ok_or_else(|| format!("movie {id} not in local database"))
            },
            || fallback::unavailable(id),
        )
        .await
    }
}

/// Notice for a listing result, if it is not live data
#[must_use]
pub fn listing_notice(resolved: &Resolved<MoviePage>) -> Option<&'static str> {
    resolved.source.is_degraded().then_some(LISTING_NOTICE)
}

/// Notice for a detail result, if it is not live data
#[must_use]
pub fn details_notice(resolved: &Resolved<MovieDetails>) -> Option<&'static str> {
    resolved.source.is_degraded().then_some(DETAILS_NOTICE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::ResolutionSource;

    fn offline_catalog() -> MovieCatalog {
        let config = MovieConfig {
            base_url: "http://127.0.0.1:1/3".to_string(),
            api_key: Some("test-key".to_string()),
            language: "en-US".to_string(),
        };
        MovieCatalog::from_config(&config, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_listing_falls_back_to_local_database() {
        let resolved = offline_catalog().top_rated(1).await;
        assert_eq!(resolved.source, ResolutionSource::Fallback);
        assert_eq!(resolved.value.results.len(), 5);
        assert_eq!(listing_notice(&resolved), Some(LISTING_NOTICE));
    }

    #[tokio::test]
    async fn test_later_page_offline_is_empty() {
        let resolved = offline_catalog().top_rated(3).await;
        assert_eq!(resolved.source, ResolutionSource::Default);
        assert!(resolved.value.results.is_empty());
        assert_eq!(resolved.value.page, 3);
    }

    #[tokio::test]
    async fn test_details_fall_back_then_placeholder() {
        let catalog = MovieCatalog::from_config(&MovieConfig::default(), Duration::from_secs(1))
            .unwrap();

        let known = catalog.movie_details(1).await;
        assert_eq!(known.source, ResolutionSource::Fallback);
        assert_eq!(known.value.title, "THE SHAWSHANK REDEMPTION");
        assert_eq!(details_notice(&known), Some(DETAILS_NOTICE));

        let unknown = catalog.movie_details(424).await;
        assert_eq!(unknown.source, ResolutionSource::Default);
        assert_eq!(unknown.value.title, UNAVAILABLE_TITLE);
        assert_eq!(unknown.value.id, 424);
    }
}
