// tests/stats_properties.rs
// Corpus statistics: empty input, stopword exclusion, and the classify-first wrapper.

use std::sync::Arc;

use yt_comment_analyzer::stats::aggregate;
use yt_comment_analyzer::text::stopwords::is_stopword;
use yt_comment_analyzer::{
    calculate_text_stats, LabelThresholds, PolarityScorer, ScoredComment, SentimentClassifier,
    SentimentLabel, StatsParams,
};

fn labeled<S: AsRef<str>>(texts: &[S], labels: &[SentimentLabel]) -> Vec<ScoredComment> {
    assert_eq!(texts.len(), labels.len());
    texts
        .iter()
        .zip(labels)
        .map(|(t, l)| ScoredComment {
            text: t.as_ref().to_string(),
            polarity: 0.0,
            label: *l,
        })
        .collect()
}

struct ZeroScorer;

impl PolarityScorer for ZeroScorer {
    fn compound(&self, _text: &str) -> f64 {
        0.0
    }
    fn name(&self) -> &'static str {
        "zero"
    }
}

#[test]
fn empty_input_defaults() {
    let empty: Vec<String> = Vec::new();
    let s = calculate_text_stats(&empty, &SentimentClassifier::default(), &StatsParams::default());
    assert_eq!(s.total_count, 0);
    assert_eq!(s.average_length, 0.0);
    assert!(s.top_words.is_empty());
    assert_eq!(s.average_readability, 0.0);
    assert_eq!(s.sentiment_distribution.positive, 0);
    assert_eq!(s.sentiment_distribution.negative, 0);
    assert_eq!(s.sentiment_distribution.neutral, 0);
}

#[test]
fn top_words_never_exceed_ten_or_contain_stopwords() {
    let texts: Vec<String> = (0..40)
        .map(|i| format!("the and word{} alpha beta gamma delta {} of to", i % 7, ["x"; 3].join(" ")))
        .chain((0..25).map(|i| format!("topic{} is what we are and the best", (b'a' + (i % 26) as u8) as char)))
        .collect();
    let labels = vec![SentimentLabel::Neutral; texts.len()];
    let s = aggregate(&labeled(&texts, &labels), &StatsParams::default());

    assert!(s.top_words.len() <= 10);
    for w in &s.top_words {
        assert!(!is_stopword(&w.word), "stopword leaked: {}", w.word);
        assert!(w.word.chars().all(char::is_alphabetic));
    }
    // counts are non-increasing
    assert!(s.top_words.windows(2).all(|p| p[0].count >= p[1].count));
}

#[test]
fn distribution_sums_to_total() {
    let texts = ["a b c", "d e f", "g h i", "j k l"];
    let labels = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
    ];
    let s = aggregate(&labeled(&texts, &labels), &StatsParams::default());
    assert_eq!(s.sentiment_distribution.total(), s.total_count);
    assert_eq!(s.sentiment_distribution.get(SentimentLabel::Positive), 2);
}

#[test]
fn standalone_stats_report_links_on_unfiltered_text() {
    let classifier = SentimentClassifier::new(Arc::new(ZeroScorer), LabelThresholds::default());
    let texts = [
        "check https://example.com/x",
        "no link here",
        "two http://a.b links http://c.d",
    ];
    let s = calculate_text_stats(&texts, &classifier, &StatsParams::default());
    assert_eq!(s.link_count, 2);
    assert_eq!(s.sentiment_distribution.neutral, 3);
}

#[test]
fn custom_top_n_is_honoured() {
    let texts = ["alpha beta gamma delta epsilon"];
    let params = StatsParams {
        top_n: 2,
        ..StatsParams::default()
    };
    let s = aggregate(&labeled(&texts, &[SentimentLabel::Neutral]), &params);
    let words: Vec<&str> = s.top_words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["alpha", "beta"]);
}

#[test]
fn standalone_stats_distribution_matches_total() {
    let classifier = SentimentClassifier::new(Arc::new(ZeroScorer), LabelThresholds::default());
    let texts = ["a b", "c d", "e f"];
    let s = calculate_text_stats(&texts, &classifier, &StatsParams::default());
    assert_eq!(s.total_count, 3);
    assert_eq!(s.sentiment_distribution.total(), s.total_count);
}

#[test]
fn standalone_readability_ignores_punctuation_only_text() {
    let classifier = SentimentClassifier::new(Arc::new(ZeroScorer), LabelThresholds::default());
    let texts = ["! ! ! ! ! !", "the cat sat on the mat today"];
    let s = calculate_text_stats(&texts, &classifier, &StatsParams::default());
    assert!(s.average_readability > 100.0, "got {}", s.average_readability);
}
