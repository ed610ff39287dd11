// src/text/emoji.rs
//! Emoji counting over extended grapheme clusters.
//!
//! A ZWJ sequence or skin-tone variant is one emoji; `C` in the relevance ratio still
//! counts every non-whitespace code point, emoji included.

use unicode_segmentation::UnicodeSegmentation;

/// True when the grapheme cluster is a single emoji (fully or minimally qualified).
pub fn is_emoji(grapheme: &str) -> bool {
    if emojis::get(grapheme).is_some() {
        return true;
    }
    let bare = grapheme.trim_end_matches('\u{FE0F}');
    if bare.len() != grapheme.len() && !bare.is_empty() && emojis::get(bare).is_some() {
        return true;
    }
    // Unqualified form of an emoji that is normally written with VS16.
    let mut qualified = String::with_capacity(grapheme.len() + 3);
    qualified.push_str(grapheme);
    qualified.push('\u{FE0F}');
    !grapheme.chars().all(|c| c.is_ascii()) && emojis::get(&qualified).is_some()
}

pub fn emoji_count(text: &str) -> usize {
    text.graphemes(true).filter(|g| is_emoji(g)).count()
}

/// Non-whitespace code points, emoji included.
pub fn non_whitespace_count(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_simple_emoji() {
        assert_eq!(emoji_count("great video 😀😀"), 2);
        assert_eq!(emoji_count("no emoji here"), 0);
    }

    #[test]
    fn joined_sequences_count_once() {
        // family (ZWJ) and thumbs-up with skin tone
        assert_eq!(emoji_count("👨\u{200D}👩\u{200D}👧"), 1);
        assert_eq!(emoji_count("👍🏽"), 1);
    }

    #[test]
    fn emoji_adjacent_to_text_is_counted() {
        assert_eq!(emoji_count("wow😀"), 1);
    }

    #[test]
    fn ascii_digits_and_hash_are_not_emoji() {
        assert_eq!(emoji_count("#1 in 2024"), 0);
    }

    #[test]
    fn non_whitespace_counts_code_points() {
        assert_eq!(non_whitespace_count(" a b\tc\n"), 3);
        assert_eq!(non_whitespace_count("😀 ok"), 3);
    }
}
