use chrono::{Days, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::{Dataset, Value};
use crate::models::{Intent, IntentResult};

/// Rows in every synthetic dataset.
pub const MOCK_ROWS: usize = 10;

const REGIONS: [&str; 3] = ["Urban", "Rural", "Suburban"];

/// Builds a small synthetic sales dataset shaped to match the query's
/// intent, for when the caller has no real data to analyze:
///
/// * sales issue: steadily declining revenue, units, and satisfaction
/// * forecast: strictly increasing revenue
/// * bias check: one region plateaued high, the others trailing
/// * general advice: flat baseline with random jitter
///
/// The jittered shape draws from `seed` when given, so callers can pin the
/// output in tests.
pub fn generate_mock_dataset(intent: &IntentResult, seed: Option<u64>) -> Dataset {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let start = Utc::now().date_naive();
    let columns = vec![
        "Date".to_string(),
        "Region".to_string(),
        "Revenue".to_string(),
        "Units_Sold".to_string(),
        "Customer_Satisfaction".to_string(),
    ];

    let rows = (0..MOCK_ROWS)
        .map(|i| {
            let t = i as f64;
            let region = REGIONS[i % REGIONS.len()];
            let (revenue, units, satisfaction) = match intent.intent {
                Intent::SalesIssue => (8000.0 - 350.0 * t, 160.0 - 6.0 * t, 4.5 - 0.15 * t),
                Intent::Forecast => (5000.0 + 400.0 * t, 100.0 + 8.0 * t, 3.8 + 0.08 * t),
                Intent::BiasCheck => {
                    if region == "Urban" {
                        (9000.0, 180.0, 4.6)
                    } else {
                        (5200.0 + 30.0 * t, 100.0 + 2.0 * t, 3.9)
                    }
                }
                Intent::GeneralAdvice => (
                    6000.0 + rng.gen_range(-500.0..=500.0),
                    120.0 + rng.gen_range(-15.0..=15.0),
                    4.0 + rng.gen_range(-0.4..=0.4),
                ),
            };
            let date = start
                .checked_add_days(Days::new(i as u64))
                .unwrap_or(start)
                .format("%Y-%m-%d")
                .to_string();
            vec![
                Value::Text(date),
                Value::Text(region.to_string()),
                Value::Number(revenue),
                Value::Number(units),
                Value::Number(satisfaction),
            ]
        })
        .collect();

    Dataset::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::classify_intent;
    use crate::models::QuerySentiment;

    fn intent_of(kind: Intent) -> IntentResult {
        IntentResult {
            intent: kind,
            sentiment: QuerySentiment::Neutral,
            key_terms: vec![],
            query: String::new(),
        }
    }

    #[test]
    fn has_expected_shape() {
        let df = generate_mock_dataset(&intent_of(Intent::GeneralAdvice), Some(1));
        assert_eq!(df.len(), MOCK_ROWS);
        assert_eq!(
            df.columns(),
            &[
                "Date",
                "Region",
                "Revenue",
                "Units_Sold",
                "Customer_Satisfaction"
            ]
        );
        assert_eq!(
            df.unique_text_values("Region"),
            vec!["Urban", "Rural", "Suburban"]
        );
    }

    #[test]
    fn sales_issue_revenue_declines() {
        let df = generate_mock_dataset(&intent_of(Intent::SalesIssue), None);
        let revenue = df.numeric_column("Revenue").unwrap();
        assert!(revenue.first().unwrap() > revenue.last().unwrap());
    }

    #[test]
    fn forecast_revenue_strictly_increases() {
        let df = generate_mock_dataset(&intent_of(Intent::Forecast), None);
        let revenue = df.numeric_column("Revenue").unwrap();
        assert!(revenue.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn bias_check_plateaus_one_region() {
        let df = generate_mock_dataset(&intent_of(Intent::BiasCheck), None);
        let top = df.top_group_by_mean("Region", "Revenue").unwrap();
        assert_eq!(top, "Urban");
    }

    #[test]
    fn seeded_jitter_is_reproducible() {
        let result = classify_intent("any general question");
        let a = generate_mock_dataset(&result, Some(42));
        let b = generate_mock_dataset(&result, Some(42));
        assert_eq!(a, b);
    }
}
