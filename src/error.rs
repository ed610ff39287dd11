// src/error.rs
//! Error taxonomy for the analysis core.
//!
//! A comment rejected by the relevance filter or an empty corpus is *not* an error;
//! only provider failures, a missing video and export I/O surface here.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Failure of a single comment-listing call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Provider call failed mid-fetch. `collected` comments had been gathered before `page`.
    #[error("fetching comments for {video_id} failed on page {page} after {collected} comments: {source}")]
    FetchFailed {
        video_id: String,
        page: usize,
        collected: usize,
        #[source]
        source: ProviderError,
    },

    #[error("video not found or unavailable: {0}")]
    VideoNotFound(String),

    #[error("invalid video reference: {0:?}")]
    InvalidVideoId(String),

    #[error("writing {path} failed: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalyzerError {
    /// Short, user-facing message for the presentation layer.
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalyzerError::FetchFailed { .. } => {
                "Comments could not be retrieved for this video. Please try again later."
            }
            AnalyzerError::VideoNotFound(_) => "Video not found or unavailable.",
            AnalyzerError::InvalidVideoId(_) => "That does not look like a YouTube video link.",
            AnalyzerError::Export { .. } => "The analysis finished but its files could not be saved.",
        }
    }
}
