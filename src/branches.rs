use itertools::Itertools;

use crate::dataset::Dataset;
use crate::models::{EchoRecord, Intent, IntentResult, SimulationSummary, StoryBranch};

/// Label used when no echo exists to anchor the narrative on.
const FALLBACK_THEME: &str = "market bias";

/// Builds the six fixed strategy paths for the notes-plus-data flow, each
/// parameterized by the dominant echo term. Simulation results, when
/// present, annotate the first path; a missing simulation never suppresses
/// the narrative.
pub fn generate_document_branches(
    echoes: &[EchoRecord],
    simulation: Option<&SimulationSummary>,
) -> Vec<StoryBranch> {
    let theme = echoes
        .first()
        .map(|e| e.term.as_str())
        .unwrap_or(FALLBACK_THEME);

    let mut branches = vec![
        StoryBranch {
            title: "Path 1: The Echo Trap".to_string(),
            description: format!(
                "The team's fixation on '{theme}' crowds out emerging signals. Staying the course cements the blind spot."
            ),
            outcome: "Revenue plateaus. Market share erodes.".to_string(),
            growth: -5,
            risk: 75,
            recommendation: "Break the loop: assign someone to argue the opposite case next review.".to_string(),
            sim_mean: None,
            sim_band: None,
        },
        StoryBranch {
            title: "Path 2: The Bold Pivot".to_string(),
            description: format!(
                "Challenge the '{theme}' narrative outright and move budget into the markets the data favors."
            ),
            outcome: "Revenue surges +15%. New customer segments unlock.".to_string(),
            growth: 15,
            risk: 35,
            recommendation: "Reallocate a meaningful budget slice to the strongest overlooked segment.".to_string(),
            sim_mean: None,
            sim_band: None,
        },
        StoryBranch {
            title: "Path 3: The Hybrid Strategy".to_string(),
            description: format!(
                "Keep '{theme}' as the anchor while routing roughly a third of resources into testing alternatives."
            ),
            outcome: "Revenue grows +8%. Reduces single-market dependency.".to_string(),
            growth: 8,
            risk: 45,
            recommendation: "Ring-fence an experimentation budget with explicit success criteria.".to_string(),
            sim_mean: None,
            sim_band: None,
        },
        StoryBranch {
            title: "Path 4: The Data-Driven Pivot".to_string(),
            description: format!(
                "Set the '{theme}' sentiment aside and follow the metrics, which already name the winners."
            ),
            outcome: "Revenue grows +20%. Establishes market leadership.".to_string(),
            growth: 20,
            risk: 50,
            recommendation: "Rank segments purely by measured performance and fund the top two.".to_string(),
            sim_mean: None,
            sim_band: None,
        },
        StoryBranch {
            title: "Path 5: The Gradual Shift".to_string(),
            description: format!(
                "Wind down the '{theme}' focus slowly while building parallel operations in high-potential regions."
            ),
            outcome: "Revenue grows +10%. Smooth transition, low churn.".to_string(),
            growth: 10,
            risk: 30,
            recommendation: "Stage the shift quarter by quarter with rollback points.".to_string(),
            sim_mean: None,
            sim_band: None,
        },
        StoryBranch {
            title: "Path 6: The Contrarian Play".to_string(),
            description: format!(
                "Treat '{theme}' as an edge worth exploiting deliberately rather than a habit to apologize for."
            ),
            outcome: "Revenue grows +12%. Dominates current market.".to_string(),
            growth: 12,
            risk: 40,
            recommendation: "Double down only where the data confirms the advantage is real.".to_string(),
            sim_mean: None,
            sim_band: None,
        },
    ];

    attach_simulation(&mut branches, simulation);
    branches
}

/// Builds the four strategy paths for the query flow, shaped by intent and
/// parameterized by the query's key terms and the dataset's average
/// outcome.
pub fn generate_query_branches(
    intent: &IntentResult,
    dataset: &Dataset,
    simulation: Option<&SimulationSummary>,
) -> Vec<StoryBranch> {
    let focus = if intent.key_terms.is_empty() {
        "the business".to_string()
    } else {
        intent.key_terms.iter().join(", ")
    };
    let baseline = dataset
        .numeric_column("Revenue")
        .map(|v| v.iter().sum::<f64>() / v.len() as f64);
    let baseline_text = baseline
        .map(|b| format!("{b:.0}"))
        .unwrap_or_else(|| "the current level".to_string());

    let mut branches = match intent.intent {
        Intent::SalesIssue => vec![
            branch(
                "Path 1: Stop the Bleed",
                format!("Triage the decline around {focus} first; find the single worst segment and stabilize it before anything else."),
                "Revenue decline halts within two periods.",
                5, 40,
                "Freeze discretionary spend in the weakest segment and investigate it this week.",
            ),
            branch(
                "Path 2: Win Back the Base",
                format!("Existing customers already chose you once; targeted retention around {focus} beats chasing new demand."),
                "Churn drops, revenue recovers toward its prior level.",
                8, 35,
                "Launch a win-back offer for customers lost in the last quarter.",
            ),
            branch(
                "Path 3: Reprice and Repackage",
                format!("If volume is intact but revenue is not, the problem near {focus} is price realization, not demand."),
                "Margin recovers without new acquisition cost.",
                10, 50,
                "Run a price test on one segment before changing the list price.",
            ),
            branch(
                "Path 4: Controlled Retreat",
                format!("Exit the unprofitable corner dragging {focus} down and concentrate on what still works."),
                "Smaller but healthier revenue base.",
                -3, 30,
                "Set exit criteria now so the retreat stays controlled.",
            ),
        ],
        Intent::Forecast => vec![
            branch(
                "Path 1: Ride the Trend",
                format!("The trajectory around {focus} supports leaning in while it lasts, from a baseline near {baseline_text}."),
                "Growth continues at the observed rate.",
                12, 35,
                "Commit capacity one step ahead of the trend, not three.",
            ),
            branch(
                "Path 2: Conservative Base Case",
                format!("Plan on the baseline near {baseline_text} holding flat and treat growth in {focus} as upside."),
                "Plans survive even if the trend stalls.",
                4, 20,
                "Budget to the flat case and pre-approve the upside spend.",
            ),
            branch(
                "Path 3: Invest Ahead of Demand",
                format!("If the growth in {focus} is structural, capacity built now compounds later."),
                "Higher growth captured, at the cost of exposure.",
                18, 55,
                "Stage the investment with a kill switch tied to two consecutive flat periods.",
            ),
            branch(
                "Path 4: Hedge the Downside",
                "Forecasts fail at turning points; keep a reserve against the optimistic case being wrong.",
                "Modest growth with protected downside.",
                6, 25,
                "Hold a reserve sized to one period of the projected gap.",
            ),
        ],
        Intent::BiasCheck => vec![
            branch(
                "Path 1: Audit the Narrative",
                format!("Put the numbers beside the story about {focus} and let the gap speak for itself."),
                "Decision-making realigns with measured performance.",
                10, 30,
                "Open the next review with the regional table before any commentary.",
            ),
            branch(
                "Path 2: Back the Underdog",
                format!("The overlooked segment outside the {focus} conversation is often the growth engine already."),
                "Hidden performer gets resources and accelerates.",
                15, 45,
                "Shift a pilot budget to the best-performing ignored segment.",
            ),
            branch(
                "Path 3: Stress-Test the Favorite",
                format!("Ask what evidence would change the team's mind about {focus}, then go collect it."),
                "Either the favorite survives scrutiny or the bias surfaces.",
                8, 35,
                "Define a falsifying metric for the favored narrative this week.",
            ),
            branch(
                "Path 4: Rebalance the Inputs",
                "Rotate data ownership and widen the dashboard so one voice cannot set the frame.",
                "Structural fix outlasts any single debate.",
                6, 25,
                "Rotate who presents the numbers each cycle.",
            ),
        ],
        Intent::GeneralAdvice => vec![
            branch(
                "Path 1: Instrument First",
                format!("Before changing anything around {focus}, make sure the basics are measured weekly."),
                "Decisions start resting on data instead of recall.",
                5, 20,
                "Stand up a weekly revenue, units, and satisfaction readout.",
            ),
            branch(
                "Path 2: Double Down on Strength",
                format!("Find what already works near {focus} at a baseline of {baseline_text} and do more of it."),
                "Compounding gains from proven ground.",
                10, 30,
                "Identify the top-performing segment and fund its obvious bottleneck.",
            ),
            branch(
                "Path 3: Fix the Weakest Link",
                "The lowest-performing area usually offers the cheapest improvement available.",
                "Floor rises; averages follow.",
                8, 35,
                "Pick the single weakest metric and assign it an owner.",
            ),
            branch(
                "Path 4: Run One Experiment",
                format!("Pick the riskiest assumption about {focus} and test it small before betting big."),
                "Cheap learning before expensive commitment.",
                7, 25,
                "Design one two-week experiment with a pass/fail threshold.",
            ),
        ],
    };

    attach_simulation(&mut branches, simulation);
    branches
}

fn branch(
    title: &str,
    description: impl Into<String>,
    outcome: &str,
    growth: i32,
    risk: u32,
    recommendation: &str,
) -> StoryBranch {
    StoryBranch {
        title: title.to_string(),
        description: description.into(),
        outcome: outcome.to_string(),
        growth,
        risk,
        recommendation: recommendation.to_string(),
        sim_mean: None,
        sim_band: None,
    }
}

fn attach_simulation(branches: &mut [StoryBranch], simulation: Option<&SimulationSummary>) {
    if let (Some(first), Some(sim)) = (branches.first_mut(), simulation) {
        first.sim_mean = Some(sim.mean);
        first.sim_band = Some((sim.percentile_25, sim.percentile_75));
    }
}
