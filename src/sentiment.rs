// src/sentiment.rs
//! Sentiment classification of filtered comments.
//!
//! The compound polarity comes from a valence-aware lexicon scorer (VADER), which handles
//! negation, intensifiers and punctuation emphasis. Labels use exclusive thresholds:
//! `> positive` is Positive, `< negative` is Negative, everything else Neutral.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::relevance::FilteredComment;
use crate::text::{content_words, mean, round_to, top_words, WordCount};

/// Anything that maps text to a compound polarity in `[-1, 1]`.
pub trait PolarityScorer: Send + Sync {
    fn compound(&self, text: &str) -> f64;
    fn name(&self) -> &'static str;
}

/// VADER compound score.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderScorer;

impl PolarityScorer for VaderScorer {
    fn compound(&self, text: &str) -> f64 {
        // The analyzer only borrows the static lexicons, so building it per call is cheap.
        let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "vader"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelThresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            positive: 0.05,
            negative: -0.05,
        }
    }
}

impl LabelThresholds {
    pub fn label_for(&self, score: f64) -> SentimentLabel {
        if score > self.positive {
            SentimentLabel::Positive
        } else if score < self.negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredComment {
    pub text: String,
    pub polarity: f64,
    pub label: SentimentLabel,
}

/// Result of one classification pass: scored comments in input order plus the
/// content words of Positive and Negative comments, accumulated in the same pass.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub scored: Vec<ScoredComment>,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
}

impl Classification {
    fn push(&mut self, scored: ScoredComment) {
        match scored.label {
            SentimentLabel::Positive => self.positive_words.extend(content_words(&scored.text)),
            SentimentLabel::Negative => self.negative_words.extend(content_words(&scored.text)),
            SentimentLabel::Neutral => {}
        }
        self.scored.push(scored);
    }

    pub fn labels(&self) -> Vec<SentimentLabel> {
        self.scored.iter().map(|s| s.label).collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.scored.iter().map(|s| s.text.as_str()).collect()
    }

    /// Mean compound score, 3 decimals; `0.0` when empty.
    pub fn average_polarity(&self) -> f64 {
        let p: Vec<f64> = self.scored.iter().map(|s| s.polarity).collect();
        mean(&p).map(|m| round_to(m, 3)).unwrap_or(0.0)
    }

    pub fn top_positive_words(&self, n: usize) -> Vec<WordCount> {
        top_words(&self.positive_words, n)
    }

    pub fn top_negative_words(&self, n: usize) -> Vec<WordCount> {
        top_words(&self.negative_words, n)
    }
}

#[derive(Clone)]
pub struct SentimentClassifier {
    scorer: Arc<dyn PolarityScorer>,
    thresholds: LabelThresholds,
}

impl fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentClassifier")
            .field("scorer", &self.scorer.name())
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(Arc::new(VaderScorer), LabelThresholds::default())
    }
}

impl SentimentClassifier {
    pub fn new(scorer: Arc<dyn PolarityScorer>, thresholds: LabelThresholds) -> Self {
        Self { scorer, thresholds }
    }

    pub fn thresholds(&self) -> &LabelThresholds {
        &self.thresholds
    }

    /// Score arbitrary text (used by the standalone statistics path).
    pub fn classify_text(&self, text: &str) -> ScoredComment {
        let polarity = self.scorer.compound(text);
        ScoredComment {
            text: text.to_string(),
            polarity,
            label: self.thresholds.label_for(polarity),
        }
    }

    pub fn classify(&self, comment: &FilteredComment) -> ScoredComment {
        self.classify_text(comment.as_str())
    }

    /// Label every comment and fill the per-label word accumulators in one pass.
    pub fn classify_all<'a, I>(&self, comments: I) -> Classification
    where
        I: IntoIterator<Item = &'a FilteredComment>,
    {
        let mut out = Classification::default();
        for c in comments {
            out.push(self.classify(c));
        }
        out
    }

    /// Same as [`classify_all`](Self::classify_all) for text that did not go through the gate.
    pub fn classify_texts<I, S>(&self, texts: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Classification::default();
        for t in texts {
            out.push(self.classify_text(t.as_ref()));
        }
        out
    }
}
