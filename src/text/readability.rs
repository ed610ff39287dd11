// src/text/readability.rs
//! Flesch reading ease:
//! `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`.
//!
//! Sentences with two words or fewer do not count as sentences (at least one is assumed).
//! Syllables come from a vowel-group heuristic.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[^.!?]+[.!?]*").expect("sentence regex"));

/// Strip punctuation (apostrophes kept) and split on whitespace.
fn lexicon(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| !c.is_ascii_punctuation() || *c == '\'')
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

pub fn word_count(text: &str) -> usize {
    lexicon(text).len()
}

pub fn sentence_count(text: &str) -> usize {
    let mut total = 0usize;
    for m in RE_SENTENCE.find_iter(text) {
        if word_count(m.as_str()) > 2 {
            total += 1;
        }
    }
    total.max(1)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

pub fn syllable_count(word: &str) -> usize {
    let w: Vec<char> = word
        .chars()
        .flat_map(|c| c.to_lowercase())
        .filter(|c| c.is_alphabetic())
        .collect();
    if w.is_empty() {
        return if word.is_empty() { 0 } else { 1 };
    }

    let mut count = 0usize;
    let mut prev_vowel = false;
    for &c in &w {
        let v = is_vowel(c);
        if v && !prev_vowel {
            count += 1;
        }
        prev_vowel = v;
    }

    // silent final "e" ("make"), but "-le" keeps its syllable ("table")
    let n = w.len();
    if n > 2 && w[n - 1] == 'e' && !is_vowel(w[n - 2]) && w[n - 2] != 'l' && count > 1 {
        count -= 1;
    }
    count.max(1)
}

/// Reading-ease score rounded to 2 decimals. `0.0` for text without words.
pub fn flesch_reading_ease(text: &str) -> f64 {
    let words = lexicon(text);
    if words.is_empty() {
        return 0.0;
    }
    let n_words = words.len() as f64;
    let n_sentences = sentence_count(text) as f64;
    let n_syllables: usize = words.iter().map(|w| syllable_count(w)).sum();

    let score = 206.835 - 1.015 * (n_words / n_sentences) - 84.6 * (n_syllables as f64 / n_words);
    super::round_to(score, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syllables_follow_vowel_groups() {
        assert_eq!(syllable_count("cat"), 1);
        assert_eq!(syllable_count("video"), 2);
        assert_eq!(syllable_count("make"), 1);
        assert_eq!(syllable_count("table"), 2);
        assert_eq!(syllable_count("beautiful"), 3);
        assert_eq!(syllable_count("the"), 1);
    }

    #[test]
    fn short_fragments_do_not_count_as_sentences() {
        assert_eq!(sentence_count("wow. this video is great. ok!"), 1);
        assert_eq!(sentence_count("this video is great. i watched it twice."), 2);
        assert_eq!(sentence_count(""), 1);
    }

    #[test]
    fn simple_text_reads_easier_than_dense_text() {
        let easy = flesch_reading_ease("the cat sat on the mat and it was fun to see");
        let hard = flesch_reading_ease(
            "institutional considerations regarding comprehensive international regulation",
        );
        assert!(easy > hard, "easy={easy} hard={hard}");
    }

    #[test]
    fn known_value_for_monosyllabic_sentence() {
        // 6 words, 1 sentence, 6 syllables: 206.835 - 6.09 - 84.6
        assert_eq!(flesch_reading_ease("the cat sat on the mat"), 116.15);
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(flesch_reading_ease("  "), 0.0);
    }
}
