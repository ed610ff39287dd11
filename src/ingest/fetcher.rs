// src/ingest/fetcher.rs
//! Paginated comment retrieval with owner exclusion and a hard collection cap.

use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use metrics::counter;
use std::sync::Arc;

use crate::config::analyzer::{AnalyzerConfig, DEFAULT_MAX_COMMENTS, HARD_MAX_COMMENTS, MAX_PAGE_SIZE};
use crate::error::{AnalyzerError, Result};
use crate::ingest::types::{CommentProvider, RawComment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    pub max_comments: usize,
    pub page_size: u32,
    /// On provider failure, return what was collected instead of `FetchFailed`
    /// (only when at least one comment was collected).
    pub allow_partial: bool,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            max_comments: DEFAULT_MAX_COMMENTS,
            page_size: MAX_PAGE_SIZE,
            allow_partial: false,
        }
    }
}

impl FetchLimits {
    pub fn from_config(cfg: &AnalyzerConfig) -> Self {
        Self {
            max_comments: cfg.max_comments,
            page_size: cfg.page_size,
            allow_partial: cfg.allow_partial_results,
        }
        .bounded()
    }

    fn bounded(mut self) -> Self {
        self.max_comments = self.max_comments.clamp(1, HARD_MAX_COMMENTS);
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }
}

struct PageCursor {
    token: Option<String>,
    page: usize,
    collected: usize,
    done: bool,
}

pub struct CommentFetcher {
    provider: Arc<dyn CommentProvider>,
    limits: FetchLimits,
}

impl CommentFetcher {
    pub fn new(provider: Arc<dyn CommentProvider>, limits: FetchLimits) -> Self {
        Self {
            provider,
            limits: limits.bounded(),
        }
    }

    pub fn limits(&self) -> &FetchLimits {
        &self.limits
    }

    /// Lazy page stream. Each yielded batch holds the non-owner comments of one provider
    /// page, in arrival order, truncated so the running total never exceeds the cap.
    /// Calling this again restarts from the first page.
    pub fn pages<'a>(
        &'a self,
        video_id: &'a str,
        channel_id: &'a str,
    ) -> impl Stream<Item = Result<Vec<RawComment>>> + Send + 'a {
        let start = PageCursor {
            token: None,
            page: 0,
            collected: 0,
            done: false,
        };
        stream::try_unfold(start, move |cur| async move {
            if cur.done || cur.collected >= self.limits.max_comments {
                return Ok::<_, AnalyzerError>(None);
            }

            let page = match self
                .provider
                .list_comment_threads(video_id, self.limits.page_size, cur.token.as_deref())
                .await
            {
                Ok(p) => p,
                Err(source) => {
                    return Err(AnalyzerError::FetchFailed {
                        video_id: video_id.to_string(),
                        page: cur.page,
                        collected: cur.collected,
                        source,
                    })
                }
            };

            let fetched = page.items.len();
            let room = self.limits.max_comments - cur.collected;
            let mut batch: Vec<RawComment> = page
                .items
                .into_iter()
                .filter(|c| c.author_id != channel_id)
                .collect();
            let owner_skipped = fetched - batch.len();
            batch.truncate(room);

            counter!("comments_fetched_total").increment(batch.len() as u64);
            counter!("comments_owner_skipped_total").increment(owner_skipped as u64);
            tracing::debug!(
                target: "ingest",
                page = cur.page,
                fetched,
                owner_skipped,
                kept = batch.len(),
                provider = self.provider.name(),
                "comment page"
            );

            let next = PageCursor {
                collected: cur.collected + batch.len(),
                page: cur.page + 1,
                done: page.next_page_token.is_none(),
                token: page.next_page_token,
            };
            Ok(Some((batch, next)))
        })
    }

    /// Comment-level view of [`pages`](Self::pages).
    pub fn comments<'a>(
        &'a self,
        video_id: &'a str,
        channel_id: &'a str,
    ) -> impl Stream<Item = Result<RawComment>> + Send + 'a {
        self.pages(video_id, channel_id)
            .map_ok(|batch| stream::iter(batch.into_iter().map(Ok)))
            .try_flatten()
    }

    /// Collect every comment up to the cap. A provider failure aborts with `FetchFailed`
    /// unless partial results are allowed and something was already collected.
    pub async fn fetch_all(&self, video_id: &str, channel_id: &str) -> Result<Vec<RawComment>> {
        let mut out = Vec::new();
        let pages = self.pages(video_id, channel_id);
        futures::pin_mut!(pages);

        while let Some(next) = pages.next().await {
            match next {
                Ok(batch) => out.extend(batch),
                Err(err) => {
                    if self.limits.allow_partial && !out.is_empty() {
                        tracing::warn!(
                            target: "ingest",
                            error = %err,
                            collected = out.len(),
                            "provider failed mid-fetch; keeping partial result"
                        );
                        break;
                    }
                    return Err(err);
                }
            }
        }
        Ok(out)
    }
}
