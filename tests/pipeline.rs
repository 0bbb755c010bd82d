//! End-to-end flows through the public API: notes-plus-data scans and
//! natural-language queries, with and without supplied datasets.

use narrative_nexus::models::{Intent, QuerySentiment};
use narrative_nexus::render::{render_document_report, render_query_report};
use narrative_nexus::{
    classify_intent, detect_echoes, run_document_analysis, run_query_analysis, run_simulation,
    score_mismatch, AnalysisOptions, Dataset, MismatchPolicy, SimulationConfig, Value,
};

fn seeded_options(seed: u64) -> AnalysisOptions {
    AnalysisOptions {
        simulation: SimulationConfig {
            seed: Some(seed),
            ..SimulationConfig::default()
        },
        ..AnalysisOptions::default()
    }
}

/// Sales data where Kano quietly outperforms while the meeting notes
/// obsess over Lagos.
fn skewed_sales_data() -> Dataset {
    let rows = vec![
        ("2025-10-01", "Lagos", 4000.0),
        ("2025-10-02", "Abuja", 3500.0),
        ("2025-10-03", "Kano", 9000.0),
        ("2025-10-04", "Lagos", 4100.0),
        ("2025-10-05", "Abuja", 3600.0),
        ("2025-10-06", "Kano", 9200.0),
    ];
    Dataset::new(
        vec!["Date".into(), "Region".into(), "Revenue".into()],
        rows.into_iter()
            .map(|(d, r, v)| {
                vec![
                    Value::Text(d.into()),
                    Value::Text(r.into()),
                    Value::Number(v),
                ]
            })
            .collect(),
    )
}

#[test]
fn echo_chamber_scan_flags_the_fixation() {
    let notes = "Lagos is our market. Lagos customers love us. We must expand in Lagos. \
                 Lagos Lagos Lagos. The lagos strategy is working.";
    let data = skewed_sales_data();

    let result = run_document_analysis(notes, Some(&data), &seeded_options(1)).unwrap();

    let top = &result.echoes[0];
    assert_eq!(top.term, "lagos");
    assert!(top.frequency >= 4);
    assert_eq!(top.echo_strength, 100);

    // Lagos is mentioned but Kano is the top performer.
    assert_eq!(result.mismatch, 70.0);
    assert!(result.nexus_score < 60.0);
    assert_eq!(result.branches.len(), 6);
    assert!(result.branches[0].description.contains("lagos"));
}

#[test]
fn balanced_notes_against_aligned_data_score_well() {
    let notes = "Kano is delivering strong growth and deserves continued attention, \
                 while Abuja and Lagos hold steady.";
    let data = skewed_sales_data();

    let result = run_document_analysis(notes, Some(&data), &seeded_options(2)).unwrap();

    assert!(result.echoes.is_empty());
    assert_eq!(result.mismatch, 20.0);
    assert_eq!(result.nexus_score, 85.0);
}

#[test]
fn coverage_policy_penalizes_narrow_discussion() {
    let data = skewed_sales_data();
    let narrow = score_mismatch("Only Lagos matters.", Some(&data), MismatchPolicy::Coverage);
    let broad = score_mismatch(
        "Lagos, Abuja and Kano all reviewed.",
        Some(&data),
        MismatchPolicy::Coverage,
    );
    assert!(narrow > broad);
    assert_eq!(broad, 0.0);
}

#[test]
fn query_flow_classifies_and_advises() {
    let result = run_query_analysis(
        "Sales dropping in rural areas, major problems",
        None,
        &seeded_options(3),
    )
    .unwrap();

    assert_eq!(result.intent.intent, Intent::SalesIssue);
    assert_eq!(result.intent.sentiment, QuerySentiment::Negative);
    assert!(result.dataset_is_mock);

    // synthetic sales-issue data declines
    let revenue = result.dataset.numeric_column("Revenue").unwrap();
    assert!(revenue.first().unwrap() > revenue.last().unwrap());

    assert!(result.insights.len() >= 3);
    assert_eq!(result.branches.len(), 4);
    assert!(result.simulation.is_some());
    assert!(result.nexus_score > 70.0 && result.nexus_score <= 95.0);
}

#[test]
fn forecast_query_builds_growing_mock_data() {
    let result = run_query_analysis(
        "What growth can I expect next quarter?",
        None,
        &seeded_options(4),
    )
    .unwrap();

    assert_eq!(result.intent.intent, Intent::Forecast);
    let revenue = result.dataset.numeric_column("Revenue").unwrap();
    assert!(revenue.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn query_with_real_data_uses_it() {
    let data = skewed_sales_data();
    let result = run_query_analysis(
        "Team focused on Lagos but is that right?",
        Some(&data),
        &seeded_options(5),
    )
    .unwrap();

    assert_eq!(result.intent.intent, Intent::BiasCheck);
    assert!(!result.dataset_is_mock);
    let joined = result.insights.join(" ");
    assert!(joined.contains("Kano"));
}

#[test]
fn bias_flip_simulation_projects_an_uplift() {
    let data = skewed_sales_data();
    let base = SimulationConfig {
        n_runs: 5000,
        seed: Some(6),
        ..SimulationConfig::default()
    };
    let flipped = SimulationConfig {
        bias_flip: true,
        ..base.clone()
    };

    let baseline = run_simulation(Some(&data), &base).unwrap();
    let uplifted = run_simulation(Some(&data), &flipped).unwrap();

    assert!(uplifted.mean > baseline.mean);
    assert!(baseline.samples.iter().all(|s| *s >= 0.0));
    assert!(uplifted.samples.iter().all(|s| *s >= 0.0));
}

#[test]
fn reports_render_for_both_flows() {
    let data = skewed_sales_data();
    let doc = run_document_analysis(
        "Lagos Lagos Lagos Lagos strategy meeting",
        Some(&data),
        &seeded_options(7),
    )
    .unwrap();
    let doc_md = render_document_report(&doc);
    assert!(doc_md.contains("# Narrative Nexus Report"));
    assert!(doc_md.contains("What-If Simulation"));

    let query = run_query_analysis("any advice?", None, &seeded_options(8)).unwrap();
    let query_md = render_query_report(&query);
    assert!(query_md.contains("# Narrative Nexus Advice"));
    assert!(query_md.contains("general_advice"));
}

#[test]
fn empty_notes_still_analyze_as_neutral() {
    // Validation rejects empty text upstream, but the core must stay total.
    let result = run_document_analysis("", None, &AnalysisOptions::default()).unwrap();
    assert!(result.echoes.is_empty());
    assert_eq!(result.sentiment, 50.0);
    assert_eq!(result.mismatch, 50.0);
    assert_eq!(result.nexus_score, 85.0);
}

#[test]
fn intent_rule_order_prefers_bias_over_decline() {
    let result = classify_intent("We are focused on premium but sales are down");
    assert_eq!(result.intent, Intent::BiasCheck);
}

#[test]
fn echoes_require_real_repetition() {
    let echoes = detect_echoes("one two buckle my shoe, three four knock at the door");
    assert!(echoes.is_empty());
}
