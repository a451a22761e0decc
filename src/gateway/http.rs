/*
 * Responsibility
 * - reqwest-backed PostGateway against the real service
 * - Normalizes the two deployed pagination conventions into PostPage
 * - Remembers which convention the endpoint speaks after the first list
 *   response (shared across clones)
 */
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::gateway::client::{GatewayResult, PostGateway};
use crate::gateway::dto::{PageEnvelope, Post, PostInput, PostPage};
use crate::gateway::error::GatewayError;
use crate::state::SearchStrategy;

/// Page index convention of the configured endpoint.
///
/// Spring-style backends are zero-based (`page=0` is the first page) and
/// answer with a `content`/`totalPages` envelope; the older backend is
/// one-based with a `data`/`total`/`limit` envelope. We cannot know which one
/// we are talking to until the first list response arrives, so:
/// - before detection, requests go out zero-based (what the shipped client
///   always sent);
/// - the first response's envelope shape locks the convention in.
///
/// The first list is always page 1, where both conventions serve the first
/// page, so nothing is ever mis-indexed by the late detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageConvention {
    Unknown = 0,
    ZeroBased = 1,
    OneBased = 2,
}

impl PageConvention {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::ZeroBased,
            2 => Self::OneBased,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: Url,
    convention: Arc<AtomicU8>,
}

impl HttpGateway {
    /// `base_url` is the API root, e.g. `http://localhost:3000/api`.
    /// `timeout` applies per request.
    pub fn new(base_url: Url, timeout: Duration) -> GatewayResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        // `Url::join` resolves relative to the last path segment, so the
        // base must end in a slash for `posts` to land under it.
        let mut base_url = base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            convention: Arc::new(AtomicU8::new(PageConvention::Unknown as u8)),
        })
    }

    fn endpoint(&self, path: &str) -> GatewayResult<Url> {
        self.base_url
            .join(path)
            .map_err(|_| GatewayError::InvalidEndpoint(path.to_string()))
    }

    fn convention(&self) -> PageConvention {
        PageConvention::from_u8(self.convention.load(Ordering::Relaxed))
    }

    fn record_convention(&self, envelope: &PageEnvelope) {
        let detected = match envelope {
            PageEnvelope::Paged { .. } => PageConvention::ZeroBased,
            PageEnvelope::Offset { .. } => PageConvention::OneBased,
        };
        self.convention.store(detected as u8, Ordering::Relaxed);
    }

    /// Status handling shared by every JSON endpoint: 404 means the target
    /// is gone (stale id), any other non-2xx is unexpected.
    async fn expect_json<T: DeserializeOwned>(
        response: reqwest::Response,
        resource: &'static str,
    ) -> GatewayResult<T> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound { resource });
        }
        if !status.is_success() {
            return Err(GatewayError::UnexpectedStatus { resource, status });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PostGateway for HttpGateway {
    async fn list(&self, page: u32, page_size: u32) -> GatewayResult<PostPage> {
        let wire_page = match self.convention() {
            PageConvention::OneBased => page,
            // Zero-based, and also the pre-detection default.
            _ => page.saturating_sub(1),
        };

        // Both page-size parameter names are sent; each backend reads its
        // own and ignores the other.
        let response = self
            .http
            .get(self.endpoint("posts")?)
            .query(&[
                ("page", wire_page),
                ("size", page_size),
                ("limit", page_size),
            ])
            .send()
            .await?;

        let envelope: PageEnvelope = Self::expect_json(response, "posts").await?;
        self.record_convention(&envelope);

        tracing::debug!(page, page_size, "listed posts");
        Ok(envelope.into_page())
    }

    async fn search(&self, term: &str, strategy: SearchStrategy) -> GatewayResult<Vec<Post>> {
        let url = match strategy {
            SearchStrategy::Jpql => self.endpoint("posts/search")?,
            SearchStrategy::Procedure => self.endpoint("posts/search/procedure")?,
        };

        let response = self.http.get(url).query(&[("title", term)]).send().await?;

        Self::expect_json(response, "search results").await
    }

    async fn get(&self, id: i64) -> GatewayResult<Post> {
        let response = self
            .http
            .get(self.endpoint(&format!("posts/{id}"))?)
            .send()
            .await?;

        Self::expect_json(response, "post").await
    }

    async fn create(&self, input: &PostInput) -> GatewayResult<Post> {
        let response = self
            .http
            .post(self.endpoint("posts")?)
            .json(input)
            .send()
            .await?;

        Self::expect_json(response, "post").await
    }

    async fn update(&self, id: i64, input: &PostInput) -> GatewayResult<Post> {
        let response = self
            .http
            .put(self.endpoint(&format!("posts/{id}"))?)
            .json(input)
            .send()
            .await?;

        Self::expect_json(response, "post").await
    }

    async fn delete(&self, id: i64) -> GatewayResult<()> {
        let response = self
            .http
            .delete(self.endpoint(&format!("posts/{id}"))?)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound { resource: "post" });
        }
        if !status.is_success() {
            return Err(GatewayError::UnexpectedStatus {
                resource: "post",
                status,
            });
        }

        Ok(())
    }
}
