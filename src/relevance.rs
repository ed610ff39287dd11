// src/relevance.rs
//! Relevance gate for raw comments: keeps "signal", discards link spam,
//! comments without any alphanumeric character and emoji-dominated reactions.
//!
//! Order of checks:
//! 1) lowercase + trim
//! 2) at least one alphanumeric character
//! 3) no http(s) URL anywhere
//! 4) emoji share: keep if `E == 0` or `C / (C + E) > text_ratio_threshold`,
//!    where `C` = non-whitespace code points and `E` = emoji count.

use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::analyzer::DEFAULT_TEXT_RATIO;
use crate::text::{contains_link, emoji_count, non_whitespace_count};

/// Tunables for the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceParams {
    /// Exclusive lower bound on the text share of an emoji-bearing comment.
    pub text_ratio_threshold: f64,
}

impl Default for RelevanceParams {
    fn default() -> Self {
        Self {
            text_ratio_threshold: DEFAULT_TEXT_RATIO,
        }
    }
}

/// A comment that passed the gate: lowercased, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilteredComment(String);

impl FilteredComment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for FilteredComment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NoAlphanumeric,
    ContainsLink,
    EmojiHeavy,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::NoAlphanumeric => "no_alphanumeric",
            RejectReason::ContainsLink => "link",
            RejectReason::EmojiHeavy => "emoji_heavy",
        }
    }
}

/// Gate outcome. Rejection is an ordinary branch, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Keep(FilteredComment),
    Reject(RejectReason),
}

#[derive(Debug, Clone, Default)]
pub struct RelevanceFilter {
    params: RelevanceParams,
}

impl RelevanceFilter {
    pub fn new(mut params: RelevanceParams) -> Self {
        if !params.text_ratio_threshold.is_finite() {
            params.text_ratio_threshold = DEFAULT_TEXT_RATIO;
        }
        params.text_ratio_threshold = params.text_ratio_threshold.clamp(0.0, 1.0);
        Self { params }
    }

    pub fn params(&self) -> &RelevanceParams {
        &self.params
    }

    pub fn evaluate(&self, raw: &str) -> Verdict {
        let text = raw.to_lowercase();
        let text = text.trim();

        if !text.chars().any(char::is_alphanumeric) {
            return Verdict::Reject(RejectReason::NoAlphanumeric);
        }
        if contains_link(text) {
            return Verdict::Reject(RejectReason::ContainsLink);
        }

        let emojis = emoji_count(text);
        if emojis > 0 {
            let chars = non_whitespace_count(text) as f64;
            let ratio = chars / (chars + emojis as f64);
            if ratio <= self.params.text_ratio_threshold {
                return Verdict::Reject(RejectReason::EmojiHeavy);
            }
        }

        Verdict::Keep(FilteredComment(text.to_string()))
    }

    /// `Some` if the comment is signal.
    pub fn filter(&self, raw: &str) -> Option<FilteredComment> {
        match self.evaluate(raw) {
            Verdict::Keep(c) => Some(c),
            Verdict::Reject(reason) => {
                counter!("comments_rejected_total", "reason" => reason.as_str()).increment(1);
                dev_log_reject(raw, reason);
                None
            }
        }
    }

    /// Filter a batch, preserving input order.
    pub fn filter_all<I, S>(&self, items: I) -> Vec<FilteredComment>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        items
            .into_iter()
            .filter_map(|s| self.filter(s.as_ref()))
            .collect()
    }
}

// Short stable id for a comment so logs never carry raw text.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn dev_log_reject(raw: &str, reason: RejectReason) {
    let id = anon_hash(raw);
    debug!(target: "relevance", %id, reason = reason.as_str(), "comment rejected");
}
