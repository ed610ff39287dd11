// src/ingest/types.rs
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// One top-level comment as returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawComment {
    pub text: String,
    pub author_id: String, // author's channel id, empty if the provider omits it
}

/// One page of a comment-thread listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentPage {
    pub items: Vec<RawComment>,
    pub next_page_token: Option<String>,
}

/// Comment-listing capability. Injected into the fetcher so tests and concurrent
/// pipelines never share a process-wide client.
#[async_trait::async_trait]
pub trait CommentProvider: Send + Sync {
    /// List one page of top-level comments. `page_size` is at most 100.
    async fn list_comment_threads(
        &self,
        video_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<CommentPage, ProviderError>;

    fn name(&self) -> &'static str;
}
