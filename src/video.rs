// src/video.rs
//! Inbound video references.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AnalyzerError;

pub const VIDEO_ID_LEN: usize = 11;

/// Validated 11-character YouTube video id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Accepts a bare id or a full watch URL; the id is the trailing 11 characters.
    pub fn parse(input: &str) -> Result<Self, AnalyzerError> {
        let s = input.trim();
        let n = s.chars().count();
        if n < VIDEO_ID_LEN {
            return Err(AnalyzerError::InvalidVideoId(input.to_string()));
        }
        let tail: String = s.chars().skip(n - VIDEO_ID_LEN).collect();
        if !tail
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(AnalyzerError::InvalidVideoId(input.to_string()));
        }
        Ok(Self(tail))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of the (external) metadata lookup that resolves the owning channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoLookup {
    Found { channel_id: String },
    /// Sentinel for an empty metadata result.
    NotFound,
}

impl VideoLookup {
    pub fn found(channel_id: impl Into<String>) -> Self {
        VideoLookup::Found {
            channel_id: channel_id.into(),
        }
    }
}
