use crate::keywords::extract_keywords;
use crate::models::EchoRecord;

/// A keyword must recur at least this often to count as an echo.
pub const ECHO_THRESHOLD: u32 = 3;

/// Strength contributed per mention, capped at 100.
const STRENGTH_PER_MENTION: u32 = 15;

/// Candidate pool scanned for echoes; wider than the default keyword view
/// so threshold-crossing terms outside the top 20 are still caught.
const ECHO_CANDIDATES: usize = 30;

/// Flags repeated ideas in discussion text. Scans the top candidate
/// keywords and keeps every term at or above [`ECHO_THRESHOLD`], ordered by
/// frequency descending (the keyword ordering is already stable).
pub fn detect_echoes(text: &str) -> Vec<EchoRecord> {
    extract_keywords(text, ECHO_CANDIDATES)
        .into_iter()
        .filter(|kw| kw.frequency >= ECHO_THRESHOLD)
        .map(|kw| EchoRecord {
            echo_strength: (kw.frequency * STRENGTH_PER_MENTION).min(100),
            term: kw.term,
            frequency: kw.frequency,
        })
        .collect()
}
