use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use narrative_nexus::analysis::{run_document_analysis, run_query_analysis, AnalysisOptions};
use narrative_nexus::input::{load_csv, validate_query, validate_text};
use narrative_nexus::mismatch::MismatchPolicy;
use narrative_nexus::render::{render_document_report, render_query_report};
use narrative_nexus::simulate::{self, SimulationConfig};

/// Narrative Nexus - fuses discussion text with sales data to surface
/// biases, simulate outcomes, and weave strategy branches
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Output directory for generated reports (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan meeting notes (optionally against a CSV) for echo chambers and
    /// text/data mismatches
    Scan {
        /// Path to a text file of meeting notes or discussion
        notes: PathBuf,

        /// Path to a CSV of sales data to compare against
        #[arg(short, long)]
        data: Option<PathBuf>,

        #[command(flatten)]
        common: CommonOpts,
    },
    /// Ask a business question in plain language
    Ask {
        /// The question, e.g. "why are sales dropping?"
        query: String,

        /// Path to a CSV of sales data; synthetic data is generated if omitted
        #[arg(short, long)]
        data: Option<PathBuf>,

        #[command(flatten)]
        common: CommonOpts,
    },
}

#[derive(ClapArgs, Debug)]
struct CommonOpts {
    /// How text/data misalignment is scored
    #[arg(long, value_enum, default_value_t = PolicyArg::TopPerformer)]
    mismatch_policy: PolicyArg,

    /// Simulate the counterfactual where the detected bias is removed
    #[arg(long)]
    bias_flip: bool,

    /// Monte Carlo runs for the what-if simulation
    #[arg(long, default_value_t = simulate::DEFAULT_N_RUNS)]
    runs: usize,

    /// Fixed RNG seed for reproducible simulations and synthetic data
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    TopPerformer,
    Coverage,
}

impl From<PolicyArg> for MismatchPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::TopPerformer => MismatchPolicy::TopPerformer,
            PolicyArg::Coverage => MismatchPolicy::Coverage,
        }
    }
}

impl CommonOpts {
    fn to_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            mismatch_policy: self.mismatch_policy.into(),
            simulation: SimulationConfig {
                bias_flip: self.bias_flip,
                n_runs: self.runs,
                seed: self.seed,
                ..SimulationConfig::default()
            },
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting narrative-nexus");

    let args = Args::parse();

    let (report_md, report_json) = match &args.command {
        Command::Scan { notes, data, common } => {
            let raw = std::fs::read_to_string(notes)
                .with_context(|| format!("failed to read notes from {}", notes.display()))?;
            let text = validate_text(&raw)?;
            let dataset = data.as_deref().map(load_csv).transpose()?;
            debug!(
                "Scan inputs ready - words={}, data_rows={:?}",
                text.split_whitespace().count(),
                dataset.as_ref().map(|d| d.len())
            );

            let result = run_document_analysis(&text, dataset.as_ref(), &common.to_options())?;
            (render_document_report(&result), serde_json::to_string_pretty(&result)?)
        }
        Command::Ask { query, data, common } => {
            let query = validate_query(query)?;
            let dataset = data.as_deref().map(load_csv).transpose()?;

            let result = run_query_analysis(&query, dataset.as_ref(), &common.to_options())?;
            (render_query_report(&result), serde_json::to_string_pretty(&result)?)
        }
    };

    // Persist report.md + report.json under a date-scoped directory
    let day_dir = PathBuf::from(&args.output_dir).join(Utc::now().format("%Y-%m-%d").to_string());
    std::fs::create_dir_all(&day_dir)
        .with_context(|| format!("failed to create output dir {}", day_dir.display()))?;

    let md_path = day_dir.join("report.md");
    let json_path = day_dir.join("report.json");
    std::fs::write(&md_path, &report_md)
        .with_context(|| format!("failed to write {}", md_path.display()))?;
    std::fs::write(&json_path, &report_json)
        .with_context(|| format!("failed to write {}", json_path.display()))?;

    info!(
        "Reports written - markdown={}, json={}",
        md_path.display(),
        json_path.display()
    );

    println!("{report_md}");
    Ok(())
}
