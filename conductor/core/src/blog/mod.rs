//! Blog Client
//!
//! CRUD over the `/api/blog/*` collaborator plus the listing behaviour the
//! terminal applies on top: tag/category/text filtering and five posts per
//! page. Unlike chat and movies, blog errors are returned to the caller.

mod filter;
mod types;

use std::time::Duration;

pub use filter::{paginate, Page, PostFilter, POSTS_PER_PAGE};
pub use types::{parse_tags, Category, Media, MediaKind, Post, PostDraft};

use crate::backend::{build_client, send_json, send_text, BackendError};
use crate::config::ApiConfig;

/// Blog REST client
#[derive(Clone, Debug)]
pub struct BlogClient {
    api: ApiConfig,
    http_client: reqwest::Client,
}

impl BlogClient {
    /// Create a client for a configuration
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Client`] if the HTTP client cannot be built.
    pub fn new(api: &ApiConfig) -> Result<Self, BackendError> {
        Ok(Self {
            api: api.clone(),
            http_client: build_client(api.timeout())?,
        })
    }

    fn posts_url(&self) -> String {
        self.api.url("/api/blog/posts")
    }

    fn post_url(&self, id: &str) -> String {
        format!("{}/{id}", self.posts_url())
    }

    /// `GET /api/blog/posts`
    ///
    /// # Errors
    ///
    /// Transport, status or decode failures.
    pub async fn list_posts(&self) -> Result<Vec<Post>, BackendError> {
        let url = self.posts_url();
        send_json(self.http_client.get(&url), &url).await
    }

    /// Fetch every post, filter, and return one page
    ///
    /// # Errors
    ///
    /// See [`BlogClient::list_posts`].
    pub async fn browse(&self, filter: &PostFilter, page: usize) -> Result<Page<Post>, BackendError> {
        let posts = self.list_posts().await?;
        let selected: Vec<Post> = filter.apply(&posts).into_iter().cloned().collect();
        Ok(paginate(&selected, page, POSTS_PER_PAGE))
    }

    /// `GET /api/blog/posts/:id`
    ///
    /// # Errors
    ///
    /// Transport, status (404 for an unknown id) or decode failures.
    pub async fn get_post(&self, id: &str) -> Result<Post, BackendError> {
        let url = self.post_url(id);
        send_json(self.http_client.get(&url), &url).await
    }

    /// `POST /api/blog/posts`
    ///
    /// # Errors
    ///
    /// Transport, status or decode failures.
    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post, BackendError> {
        let url = self.posts_url();
        tracing::info!(title = %draft.title, "Creating blog post");
        send_json(self.http_client.post(&url).json(draft), &url).await
    }

    /// `PUT /api/blog/posts/:id`
    ///
    /// # Errors
    ///
    /// Transport, status or decode failures.
    pub async fn update_post(&self, id: &str, draft: &PostDraft) -> Result<Post, BackendError> {
        let url = self.post_url(id);
        tracing::info!(%id, "Updating blog post");
        send_json(self.http_client.put(&url).json(draft), &url).await
    }

    /// `DELETE /api/blog/posts/:id`
    ///
    /// # Errors
    ///
    /// Transport or status failures.
    pub async fn delete_post(&self, id: &str) -> Result<(), BackendError> {
        let url = self.post_url(id);
        tracing::info!(%id, "Deleting blog post");
        send_text(self.http_client.delete(&url), &url).await?;
        Ok(())
    }

    /// `GET /api/blog/tags`
    ///
    /// # Errors
    ///
    /// Transport, status or decode failures.
    pub async fn tags(&self) -> Result<Vec<String>, BackendError> {
        let url = self.api.url("/api/blog/tags");
        send_json(self.http_client.get(&url), &url).await
    }

    /// `GET /api/blog/categories`
    ///
    /// # Errors
    ///
    /// Transport, status or decode failures.
    pub async fn categories(&self) -> Result<Vec<String>, BackendError> {
        let url = self.api.url("/api/blog/categories");
        send_json(self.http_client.get(&url), &url).await
    }

    /// Request timeout in use
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.api.timeout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = BlogClient::new(&ApiConfig::with_base_url("http://blog.test/")).unwrap();
        assert_eq!(client.posts_url(), "http://blog.test/api/blog/posts");
        assert_eq!(client.post_url("abc"), "http://blog.test/api/blog/posts/abc");
        assert_eq!(client.timeout(), Duration::from_millis(5000));
    }

    #[tokio::test]
    async fn test_offline_errors_are_returned() {
        let client = BlogClient::new(&ApiConfig::with_base_url("http://127.0.0.1:1")).unwrap();
        let err = client.list_posts().await.unwrap_err();
        assert!(matches!(err, BackendError::Transport { .. }));
        assert!(client.delete_post("x").await.is_err());
    }
}
