//! Narrative Nexus - analysis engine fusing qualitative discussion text with
//! quantitative sales metrics.
//!
//! The core is synchronous, stateless, and pure: callers hand in validated
//! text and an already-parsed [`dataset::Dataset`], and get back typed value
//! objects (echo records, scores, simulated outcome distributions, story
//! branches). Monte Carlo sampling is the only stochastic component and
//! accepts an optional seed.

pub mod analysis;
pub mod branches;
pub mod dataset;
pub mod echo;
pub mod input;
pub mod insights;
pub mod intent;
pub mod keywords;
pub mod mismatch;
pub mod mockdata;
pub mod models;
pub mod render;
pub mod score;
pub mod sentiment;
pub mod simulate;

pub use analysis::{health_check, run_document_analysis, run_query_analysis, AnalysisOptions};
pub use branches::{generate_document_branches, generate_query_branches};
pub use dataset::{Dataset, Value};
pub use echo::detect_echoes;
pub use intent::classify_intent;
pub use keywords::extract_keywords;
pub use mismatch::{score_mismatch, MismatchPolicy};
pub use mockdata::generate_mock_dataset;
pub use score::{nexus_document_score, nexus_query_score};
pub use sentiment::score_sentiment;
pub use simulate::{run_simulation, SimulationConfig};
