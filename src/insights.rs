use crate::dataset::Dataset;
use crate::models::{Intent, IntentResult};

/// Derives plain-language insight bullets from the dataset, keyed to the
/// query's intent. Always returns at least three bullets; data-specific
/// ones degrade to generic guidance when the expected columns are absent.
pub fn generate_insights(intent: &IntentResult, dataset: &Dataset) -> Vec<String> {
    let revenue = dataset.numeric_column("Revenue");
    let mut insights = Vec::new();

    match intent.intent {
        Intent::SalesIssue => {
            if let Some(values) = &revenue {
                let first = values[0];
                let last = values[values.len() - 1];
                if first > 0.0 && last < first {
                    let drop_pct = (first - last) / first * 100.0;
                    insights.push(format!(
                        "Revenue fell {drop_pct:.0}% across the period, from {first:.0} to {last:.0}."
                    ));
                } else {
                    insights.push(format!(
                        "Revenue averaged {:.0} over the period without a clear drop.",
                        mean(values)
                    ));
                }
            } else {
                insights.push("No revenue column found; the decline cannot be quantified.".into());
            }
            if let Some(sat) = dataset.numeric_column("Customer_Satisfaction") {
                insights.push(format!(
                    "Customer satisfaction averages {:.1}; falling satisfaction usually leads revenue down by a cycle.",
                    mean(&sat)
                ));
            }
            insights.push(
                "Segment revenue by region and channel before acting; broad discounts mask where the leak is.".into(),
            );
            insights.push("Compare units sold against revenue to separate price pressure from volume loss.".into());
        }
        Intent::Forecast => {
            if let Some(values) = &revenue {
                let first = values[0];
                let last = values[values.len() - 1];
                if first > 0.0 && last > first {
                    insights.push(format!(
                        "Revenue grew {:.0}% across the period; the trend supports continued growth.",
                        (last - first) / first * 100.0
                    ));
                } else {
                    insights.push(format!(
                        "Revenue is flat around {:.0}; project conservatively.",
                        mean(values)
                    ));
                }
                insights.push(format!(
                    "Recent average revenue is {:.0} per period, the baseline for any projection.",
                    mean(values)
                ));
            } else {
                insights.push("No revenue column found; forecast from external baselines.".into());
            }
            insights.push(
                "Extrapolate the trend no further than half the observed window; beyond that, uncertainty dominates.".into(),
            );
            insights.push(
                "Pair the point forecast with a band; a single number invites false confidence.".into(),
            );
        }
        Intent::BiasCheck => {
            if let Some(means) = dataset.group_means("Region", "Revenue") {
                if let Some(top) = dataset.top_group_by_mean("Region", "Revenue") {
                    insights.push(format!(
                        "Regional breakdown puts {top} on top by mean revenue; check whether the discussion reflects that."
                    ));
                }
                for (region, value) in &means {
                    insights.push(format!("{region} averages {value:.0} in revenue."));
                }
            } else {
                insights.push(
                    "Regional comparison is not possible without Region and Revenue columns.".into(),
                );
            }
            insights.push(
                "A region that is small today but growing fastest is the classic blind spot; rank by trend, not just by mean.".into(),
            );
            insights.push("Rotate who presents the numbers; fixed ownership breeds fixed narratives.".into());
        }
        Intent::GeneralAdvice => {
            if let Some(values) = &revenue {
                insights.push(format!(
                    "Revenue currently averages {:.0} per period.",
                    mean(values)
                ));
            }
            insights.push("Track revenue, units, and satisfaction together; single-metric views hide trade-offs.".into());
            insights.push("Set a weekly review of the three weakest segments.".into());
            insights.push("Write down this quarter's single biggest assumption and the data that would falsify it.".into());
        }
    }

    insights
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
