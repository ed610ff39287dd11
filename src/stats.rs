// src/stats.rs
//! Corpus-level descriptive statistics over labeled comments.
//!
//! One aggregator serves both paths: the live pipeline passes the labels it already
//! computed, and [`calculate_text_stats`] classifies arbitrary (possibly unfiltered) text first.
//! Downstream of the relevance gate `link_count` is always 0, since linked comments never pass.

use serde::{Deserialize, Serialize};

use crate::config::analyzer::DEFAULT_TOP_N;
use crate::sentiment::{ScoredComment, SentimentClassifier, SentimentLabel};
use crate::text::readability::word_count;
use crate::text::{
    contains_link, corpus_words, emoji_count, flesch_reading_ease, mean, round_to, top_words,
    WordCount,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsParams {
    pub top_n: usize,
    /// Readability only for comments with more whitespace-separated words than this.
    pub min_readability_words: usize,
}

impl Default for StatsParams {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_readability_words: 5,
        }
    }
}

/// Count of comments per label. Serialized as `{"Positive": n, "Negative": n, "Neutral": n}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn from_labels(labels: &[SentimentLabel]) -> Self {
        let mut d = Self::default();
        for l in labels {
            match l {
                SentimentLabel::Positive => d.positive += 1,
                SentimentLabel::Negative => d.negative += 1,
                SentimentLabel::Neutral => d.neutral += 1,
            }
        }
        d
    }

    pub fn get(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_count: usize,
    pub average_length: f64,
    pub top_words: Vec<WordCount>,
    pub average_readability: f64,
    pub emoji_count: usize,
    pub link_count: usize,
    pub sentiment_distribution: SentimentDistribution,
}

/// Aggregate statistics over classifier output. Each comment carries its own label,
/// so the distribution always sums to `total_count`.
pub fn aggregate(scored: &[ScoredComment], params: &StatsParams) -> CorpusStats {
    let texts: Vec<&str> = scored.iter().map(|s| s.text.as_str()).collect();
    let total_count = texts.len();

    let lengths: Vec<f64> = texts.iter().map(|t| t.chars().count() as f64).collect();
    let average_length = mean(&lengths).map(|m| round_to(m, 2)).unwrap_or(0.0);

    let top = top_words(corpus_words(&texts), params.top_n);

    // punctuation-only text passes the token gate but has nothing to score
    let readability: Vec<f64> = texts
        .iter()
        .filter(|t| t.split_whitespace().count() > params.min_readability_words)
        .filter(|t| word_count(t) > 0)
        .map(|t| flesch_reading_ease(t))
        .collect();
    let average_readability = mean(&readability).map(|m| round_to(m, 2)).unwrap_or(0.0);

    let emoji_total = texts.iter().map(|t| emoji_count(t)).sum();
    let link_count = texts.iter().filter(|t| contains_link(t)).count();
    let labels: Vec<SentimentLabel> = scored.iter().map(|s| s.label).collect();

    CorpusStats {
        total_count,
        average_length,
        top_words: top,
        average_readability,
        emoji_count: emoji_total,
        link_count,
        sentiment_distribution: SentimentDistribution::from_labels(&labels),
    }
}

/// Classify `texts` first, then aggregate. Works on unfiltered input.
pub fn calculate_text_stats<S: AsRef<str>>(
    texts: &[S],
    classifier: &SentimentClassifier,
    params: &StatsParams,
) -> CorpusStats {
    let classification = classifier.classify_texts(texts);
    aggregate(&classification.scored, params)
}
