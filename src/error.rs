//! Error Types
//!
//! Failures surfaced by the content client, the controller and startup configuration.

use thiserror::Error;

/// Result alias for gallery operations
pub type Result<T> = std::result::Result<T, GalleryError>;

/// Errors raised while talking to the content API or applying its responses
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GalleryError {
    /// The request never produced a response (network, CORS, aborted)
    #[error("request failed: {0}")]
    Transport(String),

    /// The API answered with a non-success status
    #[error("API responded with status {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not a valid post listing
    #[error("malformed response: {0}")]
    Decode(String),

    /// A newer fetch was issued before this one settled
    #[error("response for page {page} discarded, a newer request is in flight")]
    Superseded { page: u32 },
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        GalleryError::Decode(err.to_string())
    }
}

/// Errors found while reading the startup configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("configuration is missing a project id")]
    MissingProject,

    #[error("configuration is missing a feed id")]
    MissingFeed,

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
