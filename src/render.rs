use crate::models::{DocumentAnalysis, QueryAnalysis, StoryBranch};

pub fn render_document_report(analysis: &DocumentAnalysis) -> String {
    let mut md = String::new();
    md.push_str("# Narrative Nexus Report\n\n");
    md.push_str(&format!(
        "Generated: {}\n\n",
        analysis.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    md.push_str("## Nexus Score\n");
    md.push_str(&format!("**{:.1} / 100**\n\n", analysis.nexus_score));

    md.push_str("## Echo Chambers\n");
    if analysis.echoes.is_empty() {
        md.push_str("No repeated-idea echoes detected.\n\n");
    } else {
        for echo in &analysis.echoes {
            md.push_str(&format!(
                "- **{}** — mentioned {} times (strength {}/100)\n",
                echo.term, echo.frequency, echo.echo_strength
            ));
        }
        md.push('\n');
    }

    md.push_str("## Scores\n");
    md.push_str(&format!("- Sentiment: {:.1} / 100\n", analysis.sentiment));
    md.push_str(&format!("- Data mismatch: {:.1} / 100\n\n", analysis.mismatch));

    if let Some(sim) = &analysis.simulation {
        md.push_str("## What-If Simulation\n");
        md.push_str(&format!(
            "- Simulated mean revenue: {:.0} (runs: {})\n",
            sim.mean,
            sim.samples.len()
        ));
        md.push_str(&format!(
            "- Middle band (25th-75th percentile): {:.0} to {:.0}\n",
            sim.percentile_25, sim.percentile_75
        ));
        md.push_str(&format!("- Range: {:.0} to {:.0}\n\n", sim.min, sim.max));
    }

    render_branches(&mut md, &analysis.branches);
    md
}

pub fn render_query_report(analysis: &QueryAnalysis) -> String {
    let mut md = String::new();
    md.push_str("# Narrative Nexus Advice\n\n");
    md.push_str(&format!("> {}\n\n", analysis.intent.query.trim()));
    md.push_str(&format!(
        "Generated: {}\n\n",
        analysis.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    md.push_str("## Reading of the Question\n");
    md.push_str(&format!("- Intent: {}\n", analysis.intent.intent.label()));
    md.push_str(&format!("- Sentiment: {:?}\n", analysis.intent.sentiment));
    if !analysis.intent.key_terms.is_empty() {
        md.push_str(&format!(
            "- Key terms: {}\n",
            analysis.intent.key_terms.join(", ")
        ));
    }
    md.push('\n');

    if analysis.dataset_is_mock {
        md.push_str("*No data was supplied; the figures below come from an illustrative synthetic dataset.*\n\n");
    }

    md.push_str("## Nexus Advice Score\n");
    md.push_str(&format!("**{:.1} / 100**\n\n", analysis.nexus_score));

    md.push_str("## Insights\n");
    for insight in &analysis.insights {
        md.push_str(&format!("- {}\n", insight));
    }
    md.push('\n');

    if let Some(sim) = &analysis.simulation {
        md.push_str("## What-If Simulation\n");
        md.push_str(&format!("- Simulated mean revenue: {:.0}\n", sim.mean));
        md.push_str(&format!(
            "- Middle band (25th-75th percentile): {:.0} to {:.0}\n\n",
            sim.percentile_25, sim.percentile_75
        ));
    }

    render_branches(&mut md, &analysis.branches);
    md
}

fn render_branches(md: &mut String, branches: &[StoryBranch]) {
    md.push_str("## Story Branches\n\n");
    for branch in branches {
        md.push_str(&format!("### {}\n", branch.title));
        md.push_str(&format!("{}\n\n", branch.description));
        md.push_str(&format!("- Outcome: {}\n", branch.outcome));
        md.push_str(&format!(
            "- Growth: {:+}% | Risk: {}/100\n",
            branch.growth, branch.risk
        ));
        md.push_str(&format!("- Recommendation: {}\n", branch.recommendation));
        if let Some(mean) = branch.sim_mean {
            md.push_str(&format!("- Simulated mean: {:.0}\n", mean));
        }
        if let Some((lo, hi)) = branch.sim_band {
            md.push_str(&format!("- Simulated band: {:.0} to {:.0}\n", lo, hi));
        }
        md.push('\n');
    }
}
