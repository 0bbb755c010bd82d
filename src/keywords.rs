use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::models::KeywordRecord;

pub const DEFAULT_TOP_N: usize = 20;

/// Minimum keyword length is 4; shorter tokens are almost always noise in
/// meeting notes.
const MIN_KEYWORD_LEN: usize = 4;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]+\b").unwrap());

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "is", "are",
        "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
        "would", "could", "should", "may", "might", "can", "this", "that", "these", "those", "i",
        "you", "he", "she", "it", "we", "they", "what", "which", "who", "when", "where", "why",
        "how", "all", "each", "every", "both", "few", "more", "most", "other", "some", "such",
        "no", "nor", "not", "only", "same", "so", "than", "too", "very", "just", "as", "with",
        "from", "up", "about", "out", "if", "because", "by", "down", "through", "during",
    ]
    .into_iter()
    .collect()
});

/// Extracts the `top_n` most frequent content words from free text.
///
/// Tokens are ascii-lowercase alphabetic runs, at least four characters,
/// with stopwords removed. Ordering is frequency descending; equal
/// frequencies keep the order in which the terms first appeared, so output
/// is stable for a given input.
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<KeywordRecord> {
    let normalized: String = text.nfc().collect::<String>().to_lowercase();

    // (frequency, first-seen rank) per term.
    let mut counts: HashMap<String, (u32, usize)> = HashMap::new();
    for m in TOKEN_RE.find_iter(&normalized) {
        let token = m.as_str();
        if token.len() < MIN_KEYWORD_LEN || STOPWORDS.contains(token) {
            continue;
        }
        let next_rank = counts.len();
        let entry = counts.entry(token.to_string()).or_insert((0, next_rank));
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, u32, usize)> = counts
        .into_iter()
        .map(|(term, (freq, seen))| (term, freq, seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|(term, frequency, _)| KeywordRecord { term, frequency })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_stopwords_and_short_tokens() {
        let kws = extract_keywords("the cat sat on the market market mat", 10);
        let terms: Vec<&str> = kws.iter().map(|k| k.term.as_str()).collect();
        assert_eq!(terms, vec!["market"]);
        assert_eq!(kws[0].frequency, 2);
    }

    #[test]
    fn sorts_by_frequency_then_first_seen() {
        let kws = extract_keywords("alpha beta alpha gamma beta delta", 10);
        assert_eq!(kws[0].term, "alpha");
        assert_eq!(kws[1].term, "beta");
        // gamma and delta tie at 1; gamma appeared first.
        assert_eq!(kws[2].term, "gamma");
        assert_eq!(kws[3].term, "delta");
    }

    #[test]
    fn respects_top_n() {
        let kws = extract_keywords("alpha beta gamma delta epsilon", 2);
        assert_eq!(kws.len(), 2);
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(extract_keywords("", DEFAULT_TOP_N).is_empty());
        assert!(extract_keywords("a to of 123 !!", DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn mixed_case_and_punctuation_fold_together() {
        let kws = extract_keywords("Lagos, LAGOS! lagos?", 5);
        assert_eq!(kws[0].term, "lagos");
        assert_eq!(kws[0].frequency, 3);
    }
}
