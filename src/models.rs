use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

/// A term surfaced by the keyword extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub term: String,
    pub frequency: u32, // >= 1
}

/// A keyword repeated often enough to flag as an echo-chamber signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoRecord {
    pub term: String,
    pub frequency: u32,     // >= ECHO_THRESHOLD
    pub echo_strength: u32, // min(100, frequency * 15)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SalesIssue,
    Forecast,
    BiasCheck,
    GeneralAdvice,
}

impl Intent {
    pub fn label(self) -> &'static str {
        match self {
            Intent::SalesIssue => "sales_issue",
            Intent::Forecast => "forecast",
            Intent::BiasCheck => "bias_check",
            Intent::GeneralAdvice => "general_advice",
        }
    }
}

/// Sentiment tag for a short query (distinct from the document sentiment
/// score, which is a 0-100 float).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuerySentiment {
    Positive,
    Negative,
    Neutral,
}

/// Classification of a natural-language query. Produced once per query,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: Intent,
    pub sentiment: QuerySentiment,
    pub key_terms: Vec<String>, // <= 5, encounter order
    pub query: String,
}

/// Summary of a Monte Carlo outcome simulation. All samples are floored at
/// zero (revenue cannot be negative), so the realized mean can drift above
/// the input mean for low-mean/high-std data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub samples: Vec<f64>,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub percentile_25: f64,
    pub percentile_75: f64,
}

/// One templated strategic path with attached growth/risk metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryBranch {
    pub title: String,
    pub description: String,
    pub outcome: String,
    pub growth: i32, // signed percent
    pub risk: u32,   // 0-100
    pub recommendation: String,
    /// Simulated mean attached for display on the contextual branch.
    pub sim_mean: Option<f64>,
    /// 25th-75th percentile band from the simulation, when available.
    pub sim_band: Option<(f64, f64)>,
}

/// Full output of the document-pair (notes + data) analysis flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub echoes: Vec<EchoRecord>,
    pub sentiment: f64, // [0,100], 50 neutral
    pub mismatch: f64,  // [0,100], 50 neutral
    pub nexus_score: f64,
    pub simulation: Option<SimulationSummary>,
    pub branches: Vec<StoryBranch>,
    pub generated_at: DateTime<Utc>,
}

/// Full output of the natural-language-query flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub intent: IntentResult,
    /// The dataset the insights/branches were derived from. When no real
    /// data was supplied this is synthetic and `dataset_is_mock` is true;
    /// callers must label it accordingly.
    pub dataset: Dataset,
    pub dataset_is_mock: bool,
    pub insights: Vec<String>,
    pub simulation: Option<SimulationSummary>,
    pub branches: Vec<StoryBranch>,
    pub nexus_score: f64,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
