// src/ingest/providers/youtube.rs
//! YouTube Data API v3 `commentThreads.list` provider.

use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Deserialize;
use std::time::Duration;

use crate::config::AnalyzerConfig;
use crate::error::ProviderError;
use crate::ingest::types::{CommentPage, CommentProvider, RawComment};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadListResponse {
    #[serde(default)]
    items: Vec<Thread>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thread {
    snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
    top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    #[serde(default)]
    text_display: String,
    author_channel_id: Option<AuthorChannelId>,
}

#[derive(Debug, Deserialize)]
struct AuthorChannelId {
    value: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Decode one `commentThreads.list` response body.
pub fn parse_thread_page(body: &str) -> Result<CommentPage, ProviderError> {
    let resp: ThreadListResponse = serde_json::from_str(body)?;
    let items = resp
        .items
        .into_iter()
        .map(|t| {
            let s = t.snippet.top_level_comment.snippet;
            RawComment {
                text: s.text_display,
                author_id: s.author_channel_id.map(|a| a.value).unwrap_or_default(),
            }
        })
        .collect();
    Ok(CommentPage {
        items,
        next_page_token: resp.next_page_token.filter(|t| !t.is_empty()),
    })
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.chars().take(300).collect())
}

pub struct YouTubeProvider {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeProvider {
    pub fn new(config: &AnalyzerConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent("yt-comment-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CommentProvider for YouTubeProvider {
    async fn list_comment_threads(
        &self,
        video_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<CommentPage, ProviderError> {
        let t0 = std::time::Instant::now();
        let url = format!("{}/commentThreads", self.base_url);
        let max_results = page_size.clamp(1, 100).to_string();

        let mut query: Vec<(&str, &str)> = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", max_results.as_str()),
            ("textFormat", "plainText"),
            ("key", self.api_key.as_str()),
        ];
        if let Some(tok) = page_token {
            query.push(("pageToken", tok));
        }

        let resp = match self.http.get(&url).query(&query).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(target: "ingest", error = %e, provider = "youtube", "provider http error");
                counter!("provider_errors_total").increment(1);
                return Err(e.into());
            }
        };

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            counter!("provider_errors_total").increment(1);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let page = parse_thread_page(&body)?;
        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("fetch_page_ms").record(ms);
        Ok(page)
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}
