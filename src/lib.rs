// src/lib.rs
//! YouTube comment analysis core: paginated ingestion, relevance filtering,
//! sentiment classification and corpus statistics.
//!
//! Presentation (routing, charts, word clouds) lives outside this crate; it receives an
//! [`AnalysisRun`] and the plain-text corpus written by [`export`].

pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod pipeline;
pub mod relevance;
pub mod sentiment;
pub mod stats;
pub mod telemetry;
pub mod text;
pub mod video;

// ---- Re-exports for stable public API ----
pub use crate::config::AnalyzerConfig;
pub use crate::error::{AnalyzerError, ProviderError};
pub use crate::ingest::{CommentFetcher, CommentPage, CommentProvider, FetchLimits, RawComment};
pub use crate::pipeline::{Analysis, AnalysisResult, AnalysisRun, Pipeline, SentimentBuckets};
pub use crate::relevance::{FilteredComment, RelevanceFilter, RelevanceParams};
pub use crate::sentiment::{
    LabelThresholds, PolarityScorer, ScoredComment, SentimentClassifier, SentimentLabel,
    VaderScorer,
};
pub use crate::stats::{calculate_text_stats, CorpusStats, SentimentDistribution, StatsParams};
pub use crate::video::{VideoId, VideoLookup};

use std::sync::Arc;

/// Build a YouTube-backed pipeline from `cfg`.
pub fn youtube_pipeline(cfg: &AnalyzerConfig) -> Result<Pipeline, ProviderError> {
    if !cfg.has_api_key() {
        tracing::warn!(target: "ingest", "no YouTube API key configured; requests will be rejected");
    }
    let provider = ingest::providers::YouTubeProvider::new(cfg)?;
    Ok(Pipeline::from_config(cfg, Arc::new(provider)))
}
