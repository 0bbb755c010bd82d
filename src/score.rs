use crate::models::{EchoRecord, QuerySentiment};

/// Score awarded to echo-free discussion before the mismatch penalty is
/// even considered.
const NO_ECHO_SCORE: f64 = 85.0;

/// Overall alignment score for the notes-plus-data flow, on [0, 100].
/// Starts from 100 and subtracts an echo penalty (5 per repetition of the
/// loudest echo, capped at 50) and 30% of the mismatch score. No echoes at
/// all short-circuits to a flat 85.
pub fn nexus_document_score(echoes: &[EchoRecord], mismatch: f64) -> f64 {
    let Some(top) = echoes.first() else {
        return NO_ECHO_SCORE;
    };
    let echo_penalty = f64::from(top.frequency * 5).min(50.0);
    let alignment_penalty = mismatch * 0.3;
    (100.0 - echo_penalty - alignment_penalty).clamp(0.0, 100.0)
}

/// Confidence score for the query flow, on [0, 95]. Negative queries score
/// slightly higher than positive ones: a named problem gives the analysis
/// more to bite on than vague optimism. Each insight adds 5, capped at 20.
pub fn nexus_query_score(sentiment: QuerySentiment, insight_count: usize) -> f64 {
    let base = 70.0;
    let sentiment_bonus = match sentiment {
        QuerySentiment::Negative => 15.0,
        QuerySentiment::Positive => 10.0,
        QuerySentiment::Neutral => 0.0,
    };
    let insight_bonus = (insight_count as f64 * 5.0).min(20.0);
    (base + sentiment_bonus + insight_bonus).min(95.0)
}
