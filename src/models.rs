//! API Models
//!
//! Post listing structures as returned by the content API.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A single post. Only `id` carries meaning for navigation; everything else is display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<PostImage>,
    #[serde(default, deserialize_with = "lenient")]
    pub video: Option<PostVideo>,
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<PostUser>,
    #[serde(default, deserialize_with = "lenient")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub like_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub link: Option<LinkMetadata>,
    #[serde(default, deserialize_with = "lenient")]
    pub source_url: Option<String>,
}

impl Post {
    /// Bare post with only an id, mostly useful for tests and placeholders
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
            text: None,
            image: None,
            video: None,
            user: None,
            created: None,
            like_count: None,
            link: None,
            source_url: None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.username.as_deref())
    }

    /// Best still image: the photo itself, or the video's poster frame
    pub fn display_image(&self) -> Option<&ImageResolution> {
        self.image
            .as_ref()
            .and_then(|i| i.standard_resolution.as_ref())
            .or_else(|| self.video.as_ref().and_then(|v| v.poster.as_ref()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostImage {
    #[serde(default, deserialize_with = "lenient")]
    pub standard_resolution: Option<ImageResolution>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: Option<ImageResolution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResolution {
    pub url: String,
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostVideo {
    pub url: String,
    #[serde(default, deserialize_with = "lenient")]
    pub poster: Option<ImageResolution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostUser {
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub profile_picture: Option<String>,
}

/// Open Graph style preview of a link shared in the post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkMetadata {
    pub url: String,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
}

/// Body of a post listing response. Both halves may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPage {
    #[serde(default, deserialize_with = "posts_skipping_invalid")]
    pub data: Option<Vec<Post>>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl PostPage {
    pub fn new(posts: Vec<Post>, total: Option<u64>) -> Self {
        Self {
            data: Some(posts),
            pagination: Some(Pagination { total }),
        }
    }

    pub fn total(&self) -> Option<u64> {
        self.pagination.as_ref().and_then(|p| p.total)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: Option<u64>,
}

/// Decode an optional display field; a malformed value reads as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value::<Option<T>>(value).ok().flatten())
}

/// Decode a post list, dropping entries that are not posts (no string `id`)
fn posts_skipping_invalid<'de, D>(deserializer: D) -> Result<Option<Vec<Post>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(entries) = Option::<Vec<serde_json::Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let posts = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Post>(entry) {
            Ok(post) => Some(post),
            Err(err) => {
                log::warn!("[models] skipping malformed post: {}", err);
                None
            }
        })
        .collect();
    Ok(Some(posts))
}
