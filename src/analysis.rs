use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info};

use crate::branches::{generate_document_branches, generate_query_branches};
use crate::dataset::Dataset;
use crate::echo::detect_echoes;
use crate::insights::generate_insights;
use crate::intent::classify_intent;
use crate::mismatch::{score_mismatch, MismatchPolicy};
use crate::mockdata::generate_mock_dataset;
use crate::models::{DocumentAnalysis, HealthStatus, QueryAnalysis};
use crate::score::{nexus_document_score, nexus_query_score};
use crate::sentiment::score_sentiment;
use crate::simulate::{run_simulation, SimulationConfig};

/// Knobs for a single analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub mismatch_policy: MismatchPolicy,
    pub simulation: SimulationConfig,
}

/// Full notes-plus-data pipeline: echoes, sentiment, mismatch, what-if
/// simulation, story branches, and the overall alignment score. The
/// dataset is optional; text-only runs fall back to neutral data scores
/// and skip the simulation.
pub fn run_document_analysis(
    text: &str,
    dataset: Option<&Dataset>,
    options: &AnalysisOptions,
) -> Result<DocumentAnalysis> {
    let pipeline_start = std::time::Instant::now();
    info!(
        "Document analysis started - words={}, has_data={}",
        text.split_whitespace().count(),
        dataset.is_some()
    );

    // 1) repeated-idea scan
    let stage_start = std::time::Instant::now();
    let echoes = detect_echoes(text);
    debug!(
        "Echo scan completed - duration={:.2}s, echoes={}",
        stage_start.elapsed().as_secs_f32(),
        echoes.len()
    );

    // 2) polarity + data alignment
    let sentiment = score_sentiment(text);
    let mismatch = score_mismatch(text, dataset, options.mismatch_policy);
    debug!(
        "Scoring completed - sentiment={:.1}, mismatch={:.1}, policy={:?}",
        sentiment, mismatch, options.mismatch_policy
    );

    // 3) what-if simulation (advisory; None is fine)
    let stage_start = std::time::Instant::now();
    let simulation = run_simulation(dataset, &options.simulation);
    if let Some(sim) = &simulation {
        info!(
            "Simulation completed - duration={:.2}s, runs={}, mean={:.0}",
            stage_start.elapsed().as_secs_f32(),
            sim.samples.len(),
            sim.mean
        );
    } else {
        debug!("Simulation skipped - no usable outcome data");
    }

    // 4) narrative branches + final score
    let branches = generate_document_branches(&echoes, simulation.as_ref());
    let nexus_score = nexus_document_score(&echoes, mismatch);

    info!(
        "Document analysis completed - duration={:.2}s, nexus_score={:.1}, branches={}",
        pipeline_start.elapsed().as_secs_f32(),
        nexus_score,
        branches.len()
    );

    Ok(DocumentAnalysis {
        echoes,
        sentiment,
        mismatch,
        nexus_score,
        simulation,
        branches,
        generated_at: Utc::now(),
    })
}

/// Full query pipeline: intent classification, dataset selection (real or
/// synthetic), insights, simulation, branches, and the advice score.
pub fn run_query_analysis(
    query: &str,
    dataset: Option<&Dataset>,
    options: &AnalysisOptions,
) -> Result<QueryAnalysis> {
    let pipeline_start = std::time::Instant::now();
    info!("Query analysis started - query_len={}", query.len());

    // 1) classify
    let intent = classify_intent(query);
    info!(
        "Intent classified - intent={}, sentiment={:?}, key_terms={}",
        intent.intent.label(),
        intent.sentiment,
        intent.key_terms.len()
    );

    // 2) choose data: caller's, or synthetic shaped to the intent
    let (dataset, dataset_is_mock) = match dataset {
        Some(df) => (df.clone(), false),
        None => {
            debug!("No dataset supplied - generating synthetic data");
            (generate_mock_dataset(&intent, options.simulation.seed), true)
        }
    };

    // 3) insights
    let insights = generate_insights(&intent, &dataset);
    debug!("Insights generated - count={}", insights.len());

    // 4) simulation (advisory)
    let stage_start = std::time::Instant::now();
    let simulation = run_simulation(Some(&dataset), &options.simulation);
    if let Some(sim) = &simulation {
        debug!(
            "Simulation completed - duration={:.2}s, mean={:.0}",
            stage_start.elapsed().as_secs_f32(),
            sim.mean
        );
    }

    // 5) branches + score
    let branches = generate_query_branches(&intent, &dataset, simulation.as_ref());
    let nexus_score = nexus_query_score(intent.sentiment, insights.len());

    info!(
        "Query analysis completed - duration={:.2}s, nexus_score={:.1}, mock_data={}",
        pipeline_start.elapsed().as_secs_f32(),
        nexus_score,
        dataset_is_mock
    );

    Ok(QueryAnalysis {
        intent,
        dataset,
        dataset_is_mock,
        insights,
        simulation,
        branches,
        nexus_score,
        generated_at: Utc::now(),
    })
}

/// Liveness probe for embedding contexts.
pub fn health_check() -> HealthStatus {
    HealthStatus {
        status: "Nexus Alive!".to_string(),
        timestamp: Utc::now(),
    }
}
