use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Intent, IntentResult, QuerySentiment};

/// At most this many key terms are carried forward from a query.
pub const MAX_KEY_TERMS: usize = 5;

/// Cue words per intent, checked in declaration order with first match
/// winning. Bias cues outrank decline cues so a query like "team focused on
/// premium but sales are down" reads as a bias check, not a sales issue.
struct MatchRule {
    intent: Intent,
    cues: &'static [&'static str],
}

static RULES: Lazy<Vec<MatchRule>> = Lazy::new(|| {
    vec![
        MatchRule {
            intent: Intent::BiasCheck,
            cues: &[
                "bias", "biased", "echo", "focus", "focused", "ignore", "ignoring", "overlook",
                "overlooking", "blind", "skew", "skewed",
            ],
        },
        MatchRule {
            intent: Intent::SalesIssue,
            cues: &[
                "drop", "dropped", "dropping", "down", "decline", "declining", "fall", "falling",
                "issue", "issues", "problem", "problems", "loss", "losses", "bad",
            ],
        },
        MatchRule {
            intent: Intent::Forecast,
            cues: &[
                "forecast", "predict", "future", "expect", "grow", "growing", "growth", "rise",
                "rising", "projection", "next",
            ],
        },
    ]
});

static QUERY_POSITIVE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "great", "excellent", "amazing", "growing", "growth", "boost", "opportunity",
        "strong", "profit", "win", "improve", "improving", "gain", "gains", "up", "rise",
        "rising", "best", "success",
    ]
    .into_iter()
    .collect()
});

static QUERY_NEGATIVE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "drop", "dropped", "dropping", "down", "decline", "declining", "unhappy", "problem",
        "problems", "issue", "issues", "loss", "losses", "bad", "poor", "fail", "failing",
        "worst", "struggle", "struggling", "low", "concern", "concerns",
    ]
    .into_iter()
    .collect()
});

/// Filler words excluded from key terms even when long enough.
static TERM_EXCLUDE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "what", "which", "where", "when", "there", "their", "should", "could", "would", "about",
        "these", "those", "going", "doing", "happening", "please", "help",
    ]
    .into_iter()
    .collect()
});

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]+\b").unwrap());

/// Classifies a short business query into an intent, a coarse sentiment
/// tag, and the salient key terms. Deterministic keyword rules; an empty or
/// cue-free query falls back to general advice with neutral sentiment.
pub fn classify_intent(query: &str) -> IntentResult {
    let lowered = query.to_lowercase();
    let words: Vec<&str> = WORD_RE.find_iter(&lowered).map(|m| m.as_str()).collect();
    let word_set: HashSet<&str> = words.iter().copied().collect();

    let intent = RULES
        .iter()
        .find(|rule| rule.cues.iter().any(|cue| word_set.contains(cue)))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::GeneralAdvice);

    let pos = words.iter().filter(|w| QUERY_POSITIVE.contains(**w)).count();
    let neg = words.iter().filter(|w| QUERY_NEGATIVE.contains(**w)).count();
    let sentiment = if neg > pos {
        QuerySentiment::Negative
    } else if pos > neg {
        QuerySentiment::Positive
    } else {
        QuerySentiment::Neutral
    };

    let mut seen: HashSet<&str> = HashSet::new();
    let key_terms: Vec<String> = words
        .iter()
        .filter(|w| w.len() > 4 && !TERM_EXCLUDE.contains(**w) && seen.insert(**w))
        .take(MAX_KEY_TERMS)
        .map(|w| (*w).to_string())
        .collect();

    IntentResult {
        intent,
        sentiment,
        key_terms,
        query: query.to_string(),
    }
}
