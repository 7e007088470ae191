//! Tagplay HTTP Client
//!
//! REST bindings for the post endpoints of the Tagplay API.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};

use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};
use crate::models::PostPage;

use super::{ContentClient, PageRange};

pub struct TagplayClient {
    api_base: String,
    access_token: Option<String>,
}

impl TagplayClient {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone().filter(|t| !t.is_empty()),
        }
    }

    fn posts_url(&self, project: &str, feed: &str) -> String {
        format!("{}/project/{}/feed/{}/post/", self.api_base, project, feed)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| GalleryError::Transport(e.to_string()))?;
        if !response.ok() {
            let message = response.text().await.unwrap_or_else(|_| response.status_text());
            return Err(GalleryError::Api { status: response.status(), message });
        }
        Ok(response)
    }

    async fn post_action(
        &self,
        project: &str,
        feed: &str,
        post_id: &str,
        action: &str,
    ) -> Result<()> {
        let url = format!("{}{}/{}", self.posts_url(project, feed), post_id, action);
        self.send(Request::post(&url)).await?;
        Ok(())
    }
}

/// Decode a listing body; an empty body is an empty listing
pub(crate) fn decode_post_page(body: &str) -> Result<PostPage> {
    if body.trim().is_empty() {
        return Ok(PostPage::default());
    }
    Ok(serde_json::from_str(body)?)
}

#[async_trait(?Send)]
impl ContentClient for TagplayClient {
    async fn list_posts(&self, project: &str, feed: &str, range: PageRange) -> Result<PostPage> {
        let limit = range.limit.to_string();
        let offset = range.offset.to_string();
        let request = Request::get(&self.posts_url(project, feed))
            .query([("limit", limit.as_str()), ("offset", offset.as_str())]);

        let response = self.send(request).await?;
        let body = response.text().await.map_err(|e| GalleryError::Transport(e.to_string()))?;
        decode_post_page(&body)
    }

    async fn like_post(&self, project: &str, feed: &str, post_id: &str) -> Result<()> {
        self.post_action(project, feed, post_id, "like").await
    }

    async fn flag_post(&self, project: &str, feed: &str, post_id: &str) -> Result<()> {
        self.post_action(project, feed, post_id, "flag").await
    }
}
