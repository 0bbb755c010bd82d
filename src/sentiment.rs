use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Score returned when no polarity word is present at all.
pub const NEUTRAL_SENTIMENT: f64 = 50.0;

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "great", "excellent", "amazing", "wonderful", "fantastic", "love", "best",
        "perfect", "awesome", "brilliant", "outstanding", "success", "growth", "profit",
        "increase", "boost", "strong", "opportunity", "potential", "promising", "positive",
        "win",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bad", "poor", "terrible", "awful", "horrible", "worst", "hate", "fail", "loss",
        "decrease", "decline", "weak", "risk", "danger", "problem", "issue", "negative",
        "concern", "difficult", "challenge", "struggle", "threat",
    ]
    .into_iter()
    .collect()
});

/// Lexicon polarity score over [0, 100]: the share of matched polarity
/// words that are positive, or 50 when nothing matches.
///
/// Matching is over whitespace-split lowercase tokens, so punctuation glued
/// to a word ("growth!") hides it from the lexicon. Intentional: the score
/// is a coarse signal, not an NLP model, and the cheap tokenization keeps
/// it predictable.
pub fn score_sentiment(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let mut pos = 0u32;
    let mut neg = 0u32;
    for word in lowered.split_whitespace() {
        if POSITIVE_WORDS.contains(word) {
            pos += 1;
        } else if NEGATIVE_WORDS.contains(word) {
            neg += 1;
        }
    }
    let total = pos + neg;
    if total == 0 {
        return NEUTRAL_SENTIMENT;
    }
    f64::from(pos) / f64::from(total) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_when_no_polarity_words() {
        assert_eq!(score_sentiment("the quarterly meeting convened"), 50.0);
        assert_eq!(score_sentiment(""), 50.0);
    }

    #[test]
    fn all_positive_scores_100() {
        assert_eq!(score_sentiment("great growth strong opportunity"), 100.0);
    }

    #[test]
    fn all_negative_scores_0() {
        assert_eq!(score_sentiment("terrible decline weak loss"), 0.0);
    }

    #[test]
    fn mixed_text_is_proportional() {
        // 3 positive, 1 negative.
        let score = score_sentiment("good great strong problem");
        assert!((score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn adding_positive_words_never_lowers_the_score() {
        let base = "problem with the launch";
        let mut text = base.to_string();
        let mut prev = score_sentiment(&text);
        for _ in 0..5 {
            text.push_str(" good");
            let next = score_sentiment(&text);
            assert!(next >= prev);
            prev = next;
        }
    }

    #[test]
    fn punctuation_blocks_whitespace_matching() {
        // "growth!" is not a lexicon token under whitespace splitting.
        assert_eq!(score_sentiment("growth!"), 50.0);
    }
}
