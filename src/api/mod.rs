//! Content API
//!
//! The client seam the controller fetches through, plus the HTTP implementation.

mod tagplay;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PostPage;
use crate::pagination::POSTS_PER_PAGE;

pub use tagplay::TagplayClient;

/// Limit/offset slice of a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub limit: u32,
    pub offset: u64,
}

impl PageRange {
    /// Slice holding 1-based `page`
    pub fn for_page(page: u32) -> Self {
        Self {
            limit: POSTS_PER_PAGE,
            offset: u64::from(POSTS_PER_PAGE) * u64::from(page.max(1) - 1),
        }
    }
}

/// Access to a project's feed. Runs on the UI thread, so futures need not be `Send`.
#[async_trait(?Send)]
pub trait ContentClient {
    async fn list_posts(&self, project: &str, feed: &str, range: PageRange) -> Result<PostPage>;

    async fn like_post(&self, project: &str, feed: &str, post_id: &str) -> Result<()>;

    async fn flag_post(&self, project: &str, feed: &str, post_id: &str) -> Result<()>;
}
