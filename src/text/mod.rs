// src/text/mod.rs
//! Text primitives shared by the relevance filter, the classifier and the aggregator.

pub mod emoji;
pub mod readability;
pub mod stopwords;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use emoji::{emoji_count, non_whitespace_count};
pub use readability::flesch_reading_ease;
pub use stopwords::is_stopword;

static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("link regex"));
static RE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("word regex"));

/// True if the text contains an http(s) URL anywhere.
pub fn contains_link(text: &str) -> bool {
    RE_LINK.is_match(text)
}

pub fn is_alphabetic_word(w: &str) -> bool {
    !w.is_empty() && w.chars().all(char::is_alphabetic)
}

/// Content words of one comment: word tokens, lowercased, purely alphabetic,
/// longer than two characters and not a stopword.
pub fn content_words(text: &str) -> Vec<String> {
    RE_WORD
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| !is_stopword(w) && w.chars().count() > 2 && is_alphabetic_word(w))
        .collect()
}

/// Whitespace tokens of a whole corpus, lowercased, purely alphabetic, stopwords dropped.
pub fn corpus_words<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
    texts
        .iter()
        .flat_map(|t| t.as_ref().split_whitespace())
        .map(str::to_lowercase)
        .filter(|w| is_alphabetic_word(w) && !is_stopword(w))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Top `n` words by count, descending; ties keep first-seen order.
pub fn top_words<I, S>(words: I, n: usize) -> Vec<WordCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut order: Vec<WordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for w in words {
        let w = w.as_ref();
        match index.get(w) {
            Some(&i) => order[i].count += 1,
            None => {
                index.insert(w.to_string(), order.len());
                order.push(WordCount {
                    word: w.to_string(),
                    count: 1,
                });
            }
        }
    }
    // stable sort keeps insertion order among equal counts
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(n);
    order
}

pub(crate) fn round_to(x: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (x * f).round() / f
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_detection() {
        assert!(contains_link("see https://example.com/x"));
        assert!(contains_link("http://a.b"));
        assert!(!contains_link("https:// nothing"));
        assert!(!contains_link("example.com"));
    }

    #[test]
    fn content_words_drop_short_numeric_and_stopwords() {
        let w = content_words("I really LOVED the 2nd part, it's so good!!");
        assert_eq!(w, vec!["really", "loved", "part", "good"]);
    }

    #[test]
    fn corpus_words_require_pure_alphabetic_tokens() {
        let w = corpus_words(&["great video!!", "Great song", "the end"]);
        assert_eq!(w, vec!["great", "great", "song", "end"]);
    }

    #[test]
    fn top_words_ties_keep_first_seen_order() {
        let top = top_words(["b", "a", "c", "a", "b", "d"], 3);
        let got: Vec<(&str, usize)> = top.iter().map(|w| (w.word.as_str(), w.count)).collect();
        assert_eq!(got, vec![("b", 2), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn top_words_caps_length() {
        let words: Vec<String> = (0..30).map(|i| format!("w{i}")).collect();
        assert_eq!(top_words(&words, 10).len(), 10);
    }

    #[test]
    fn rounding_and_mean() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0]), Some(1.5));
    }
}
