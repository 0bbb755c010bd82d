use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

/// Score returned whenever the data cannot support a comparison (no
/// dataset, empty dataset, or missing grouping/outcome columns).
pub const NEUTRAL_MISMATCH: f64 = 50.0;

/// Grouping column the top-performer comparison keys on.
pub const GROUP_COLUMN: &str = "Region";

/// Outcome column the top-performer comparison averages.
pub const OUTCOME_COLUMN: &str = "Revenue";

/// How text/data misalignment is scored. The two policies answer different
/// questions and are never blended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Does the discussion acknowledge the best-performing group?
    /// Three-tier score: 70 when groups are discussed but the top performer
    /// is not among them, 20 when it is, 50 otherwise.
    #[default]
    TopPerformer,
    /// What share of the data's categorical values does the discussion
    /// ignore? Ratio of unmentioned to total values, over every
    /// categorical column.
    Coverage,
}

/// Scores how far the discussion text has drifted from what the data
/// says, on [0, 100]. Higher is worse. Degrades to [`NEUTRAL_MISMATCH`]
/// instead of erroring when the dataset is absent or unusable.
pub fn score_mismatch(text: &str, dataset: Option<&Dataset>, policy: MismatchPolicy) -> f64 {
    let Some(df) = dataset else {
        return NEUTRAL_MISMATCH;
    };
    if df.is_empty() {
        return NEUTRAL_MISMATCH;
    }
    let text_lower = text.to_lowercase();
    match policy {
        MismatchPolicy::TopPerformer => top_performer_score(&text_lower, df),
        MismatchPolicy::Coverage => coverage_score(&text_lower, df),
    }
}

fn top_performer_score(text_lower: &str, df: &Dataset) -> f64 {
    let Some(top) = df.top_group_by_mean(GROUP_COLUMN, OUTCOME_COLUMN) else {
        return NEUTRAL_MISMATCH;
    };

    let mentioned: Vec<String> = df
        .unique_text_values(GROUP_COLUMN)
        .into_iter()
        .filter(|g| text_lower.contains(&g.to_lowercase()))
        .collect();

    if mentioned.is_empty() {
        NEUTRAL_MISMATCH
    } else if mentioned.iter().any(|g| *g == top) {
        20.0
    } else {
        70.0
    }
}

fn coverage_score(text_lower: &str, df: &Dataset) -> f64 {
    let mut mentioned = 0u32;
    let mut ignored = 0u32;
    for column in df.categorical_columns() {
        for value in df.unique_text_values(column) {
            if text_lower.contains(&value.to_lowercase()) {
                mentioned += 1;
            } else {
                ignored += 1;
            }
        }
    }
    let total = mentioned + ignored;
    if total == 0 {
        return NEUTRAL_MISMATCH;
    }
    (f64::from(ignored) / f64::from(total) * 100.0).clamp(0.0, 100.0)
}
