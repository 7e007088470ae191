//! Gallery Configuration
//!
//! Typed settings read from the host page. Every display toggle defaults to enabled.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "https://api.tagplay.co/v1";

/// Settings shared by the controller, the content client and the post widget.
///
/// Field names on the wire follow the embed snippet keys (`include-usernames`, ...),
/// except `include_captions`, which has always been spelled with an underscore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub feed: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(rename = "include-usernames", default = "default_true")]
    pub include_usernames: bool,
    #[serde(rename = "include-like", default = "default_true")]
    pub include_like: bool,
    #[serde(rename = "include-flag", default = "default_true")]
    pub include_flag: bool,
    #[serde(rename = "include-dates", default = "default_true")]
    pub include_dates: bool,
    #[serde(rename = "include-times", default = "default_true")]
    pub include_times: bool,
    #[serde(alias = "include-captions", default = "default_true")]
    pub include_captions: bool,
    #[serde(rename = "include-link-metadata", default = "default_true")]
    pub include_link_metadata: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            project: String::new(),
            feed: String::new(),
            access_token: None,
            api_base: default_api_base(),
            include_usernames: true,
            include_like: true,
            include_flag: true,
            include_dates: true,
            include_times: true,
            include_captions: true,
            include_link_metadata: true,
            log_level: default_log_level(),
        }
    }
}

impl GalleryConfig {
    /// Config for a project/feed pair with every default in place
    pub fn new(project: impl Into<String>, feed: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            feed: feed.into(),
            ..Default::default()
        }
    }

    /// Parse caller overrides from JSON; missing keys fall back to defaults
    #[cfg(test)]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Force the project and feed ids, ignoring empty values
    pub fn with_identifiers(mut self, project: Option<String>, feed: Option<String>) -> Self {
        if let Some(project) = project.filter(|p| !p.trim().is_empty()) {
            self.project = project;
        }
        if let Some(feed) = feed.filter(|f| !f.trim().is_empty()) {
            self.feed = feed;
        }
        self
    }

    /// Reject configs the API client could never serve
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.project = self.project.trim().to_string();
        self.feed = self.feed.trim().to_string();
        if self.project.is_empty() {
            return Err(ConfigError::MissingProject);
        }
        if self.feed.is_empty() {
            return Err(ConfigError::MissingFeed);
        }
        let base = self.api_base.trim().trim_end_matches('/');
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "api_base must be an http(s) url, got {:?}",
                self.api_base
            )));
        }
        self.api_base = base.to_string();
        Ok(self)
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
