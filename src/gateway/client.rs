//! Gateway interface the list controller talks to.
use async_trait::async_trait;

use crate::gateway::dto::{Post, PostInput, PostPage};
use crate::gateway::error::GatewayError;
use crate::state::SearchStrategy;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Typed façade over the remote posts service.
///
/// This is intentionally the whole remote surface and nothing else:
/// - The controller only ever sees the normalized `PostPage` shape, never a
///   raw envelope.
/// - No retry logic here; each call is a single attempt and failures
///   propagate immediately. Retry policy, if one ever exists, belongs to the
///   caller.
///
/// Implementations must be cheap to clone (typically `Arc<...>` inside).
#[async_trait]
pub trait PostGateway: Clone + Send + Sync + 'static {
    // One page of posts, newest first. `page` is one-based from the caller's
    // point of view; implementations translate to whatever the backend wants.
    async fn list(&self, page: u32, page_size: u32) -> GatewayResult<PostPage>;

    // Free-text title search, flat and unpaged. The strategy is routed, not
    // chosen, here.
    async fn search(&self, term: &str, strategy: SearchStrategy) -> GatewayResult<Vec<Post>>;

    // Single post by id.
    async fn get(&self, id: i64) -> GatewayResult<Post>;

    async fn create(&self, input: &PostInput) -> GatewayResult<Post>;

    async fn update(&self, id: i64, input: &PostInput) -> GatewayResult<Post>;

    async fn delete(&self, id: i64) -> GatewayResult<()>;
}
