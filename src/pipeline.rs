// src/pipeline.rs
//! Analysis orchestrator: fetch -> relevance filter -> sentiment -> statistics.
//!
//! Every `run` owns its accumulators; a `Pipeline` can be shared across concurrent
//! requests. Nothing is committed before the whole filtered set is assembled, so
//! dropping the future mid-fetch leaves no partial state behind.

use chrono::{DateTime, Utc};
use metrics::{counter, gauge};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use crate::ingest::{CommentFetcher, CommentProvider, FetchLimits, RawComment};
use crate::relevance::{FilteredComment, RelevanceFilter, RelevanceParams};
use crate::sentiment::{
    Classification, LabelThresholds, SentimentClassifier, SentimentLabel, VaderScorer,
};
use crate::stats::{aggregate, CorpusStats, StatsParams};
use crate::telemetry::ensure_metrics_described;
use crate::text::WordCount;
use crate::video::{VideoId, VideoLookup};

/// Comment texts grouped by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentBuckets {
    #[serde(rename = "Positive")]
    pub positive: Vec<String>,
    #[serde(rename = "Negative")]
    pub negative: Vec<String>,
    #[serde(rename = "Neutral")]
    pub neutral: Vec<String>,
}

impl SentimentBuckets {
    fn from_classification(c: &Classification) -> Self {
        let mut b = Self::default();
        for s in &c.scored {
            let bucket = match s.label {
                SentimentLabel::Positive => &mut b.positive,
                SentimentLabel::Negative => &mut b.negative,
                SentimentLabel::Neutral => &mut b.neutral,
            };
            bucket.push(s.text.clone());
        }
        b
    }

    pub fn get(&self, label: SentimentLabel) -> &[String] {
        match label {
            SentimentLabel::Positive => &self.positive,
            SentimentLabel::Negative => &self.negative,
            SentimentLabel::Neutral => &self.neutral,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub corpus_stats: CorpusStats,
    pub per_sentiment_buckets: SentimentBuckets,
    pub top_positive_words: Vec<WordCount>,
    pub top_negative_words: Vec<WordCount>,
    pub average_polarity: f64,
}

/// Filtered corpus plus its analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub corpus: Vec<FilteredComment>,
    pub result: AnalysisResult,
}

/// Output of one video analysis, handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    pub video_id: VideoId,
    pub analyzed_at: DateTime<Utc>,
    /// Comments returned by the provider after owner exclusion, before filtering.
    pub fetched_count: usize,
    pub corpus: Vec<FilteredComment>,
    pub result: AnalysisResult,
}

pub struct Pipeline {
    fetcher: CommentFetcher,
    filter: RelevanceFilter,
    classifier: SentimentClassifier,
    stats: StatsParams,
}

impl Pipeline {
    pub fn new(
        fetcher: CommentFetcher,
        filter: RelevanceFilter,
        classifier: SentimentClassifier,
        stats: StatsParams,
    ) -> Self {
        Self {
            fetcher,
            filter,
            classifier,
            stats,
        }
    }

    /// Wire every stage from `cfg` around the given provider, scoring with VADER.
    pub fn from_config(cfg: &AnalyzerConfig, provider: Arc<dyn CommentProvider>) -> Self {
        Self::new(
            CommentFetcher::new(provider, FetchLimits::from_config(cfg)),
            RelevanceFilter::new(RelevanceParams {
                text_ratio_threshold: cfg.text_ratio_threshold,
            }),
            SentimentClassifier::new(
                Arc::new(VaderScorer),
                LabelThresholds {
                    positive: cfg.positive_threshold,
                    negative: cfg.negative_threshold,
                },
            ),
            StatsParams {
                top_n: cfg.top_n,
                min_readability_words: cfg.min_readability_words,
            },
        )
    }

    /// Full analysis of one video. `lookup` is the owner resolution done upstream;
    /// `NotFound` short-circuits with `VideoNotFound`.
    pub async fn run(&self, video: &VideoId, lookup: &VideoLookup) -> Result<AnalysisRun> {
        ensure_metrics_described();
        let channel_id = match lookup {
            VideoLookup::Found { channel_id } => channel_id,
            VideoLookup::NotFound => {
                return Err(AnalyzerError::VideoNotFound(video.to_string()));
            }
        };

        let raw = self.fetcher.fetch_all(video.as_str(), channel_id).await?;
        let fetched_count = raw.len();
        let Analysis { corpus, result } = self.analyze_comments(raw);

        let analyzed_at = Utc::now();
        counter!("analysis_runs_total").increment(1);
        gauge!("analysis_last_run_ts").set(analyzed_at.timestamp() as f64);
        info!(
            target: "pipeline",
            video = %video,
            fetched = fetched_count,
            kept = corpus.len(),
            average_polarity = result.average_polarity,
            "analysis finished"
        );

        Ok(AnalysisRun {
            video_id: video.clone(),
            analyzed_at,
            fetched_count,
            corpus,
            result,
        })
    }

    /// Filter, classify and aggregate already-fetched comments.
    pub fn analyze_comments<I>(&self, raw: I) -> Analysis
    where
        I: IntoIterator<Item = RawComment>,
    {
        let corpus = self.filter.filter_all(raw.into_iter().map(|c| c.text));
        counter!("comments_kept_total").increment(corpus.len() as u64);
        let result = self.analyze_filtered(&corpus);
        Analysis { corpus, result }
    }

    pub fn analyze_filtered(&self, corpus: &[FilteredComment]) -> AnalysisResult {
        let classification = self.classifier.classify_all(corpus);
        let corpus_stats = aggregate(&classification.scored, &self.stats);

        AnalysisResult {
            corpus_stats,
            per_sentiment_buckets: SentimentBuckets::from_classification(&classification),
            top_positive_words: classification.top_positive_words(self.stats.top_n),
            top_negative_words: classification.top_negative_words(self.stats.top_n),
            average_polarity: classification.average_polarity(),
        }
    }

    pub fn fetcher(&self) -> &CommentFetcher {
        &self.fetcher
    }

    pub fn filter(&self) -> &RelevanceFilter {
        &self.filter
    }

    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }
}
