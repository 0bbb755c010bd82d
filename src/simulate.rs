use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use tracing::warn;

use crate::dataset::Dataset;
use crate::models::SimulationSummary;

/// Mean uplift applied when simulating the removal of a detected bias.
pub const BIAS_MEAN_LIFT: f64 = 1.15;

/// Variance shrink applied alongside the uplift.
pub const BIAS_STD_SHRINK: f64 = 0.9;

pub const DEFAULT_N_RUNS: usize = 100;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// When true, sample from the counterfactual where the bias is removed:
    /// mean scaled by [`BIAS_MEAN_LIFT`], std by [`BIAS_STD_SHRINK`].
    pub bias_flip: bool,
    pub n_runs: usize,
    /// Fixed seed for reproducible draws. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Column whose distribution is sampled.
    pub outcome_column: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bias_flip: false,
            n_runs: DEFAULT_N_RUNS,
            seed: None,
            outcome_column: "Revenue".to_string(),
        }
    }
}

/// Monte Carlo what-if over the outcome column: fits a normal to the
/// observed values (population std), optionally applies the bias-removal
/// transform, draws `n_runs` samples floored at zero, and summarizes the
/// draw. Returns `None` whenever the data cannot support a simulation; a
/// failed simulation is advisory and never aborts an analysis.
pub fn run_simulation(dataset: Option<&Dataset>, config: &SimulationConfig) -> Option<SimulationSummary> {
    let df = dataset?;
    let values = df.numeric_column(&config.outcome_column)?;
    if config.n_runs == 0 {
        return None;
    }

    let base_mean = mean(&values);
    let base_std = population_std(&values, base_mean);

    let (sim_mean, sim_std) = if config.bias_flip {
        (base_mean * BIAS_MEAN_LIFT, base_std * BIAS_STD_SHRINK)
    } else {
        (base_mean, base_std)
    };

    let normal = match Normal::new(sim_mean, sim_std) {
        Ok(n) => n,
        Err(err) => {
            warn!(%sim_mean, %sim_std, "simulation skipped: {err}");
            return None;
        }
    };

    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let samples: Vec<f64> = (0..config.n_runs)
        .map(|_| rng.sample(normal).max(0.0))
        .collect();

    let sample_mean = mean(&samples);
    let sample_std = population_std(&samples, sample_mean);
    let mut sorted = samples.clone();
    sorted.sort_by(f64::total_cmp);

    Some(SimulationSummary {
        mean: sample_mean,
        std: sample_std,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        percentile_25: percentile(&sorted, 25.0),
        percentile_75: percentile(&sorted, 75.0),
        samples,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64], mean: f64) -> f64 {
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Linear-interpolation percentile over an already sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;

    fn revenue(values: &[f64]) -> Dataset {
        Dataset::new(
            vec!["Revenue".into()],
            values.iter().map(|v| vec![Value::Number(*v)]).collect(),
        )
    }

    fn seeded(bias_flip: bool, seed: u64) -> SimulationConfig {
        SimulationConfig {
            bias_flip,
            seed: Some(seed),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn missing_data_yields_none() {
        assert!(run_simulation(None, &SimulationConfig::default()).is_none());
        let df = Dataset::new(vec!["Region".into()], vec![vec![Value::Text("Urban".into())]]);
        assert!(run_simulation(Some(&df), &SimulationConfig::default()).is_none());
        let empty = Dataset::new(vec!["Revenue".into()], vec![]);
        assert!(run_simulation(Some(&empty), &SimulationConfig::default()).is_none());
    }

    #[test]
    fn zero_runs_yields_none() {
        let df = revenue(&[5000.0, 5100.0]);
        let config = SimulationConfig {
            n_runs: 0,
            ..SimulationConfig::default()
        };
        assert!(run_simulation(Some(&df), &config).is_none());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let df = revenue(&[5000.0, 5100.0, 5200.0, 5300.0]);
        let a = run_simulation(Some(&df), &seeded(false, 7)).unwrap();
        let b = run_simulation(Some(&df), &seeded(false, 7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn samples_are_never_negative() {
        // Low mean, large spread: many raw draws land below zero.
        let df = revenue(&[10.0, 500.0, 10.0, 500.0]);
        let summary = run_simulation(Some(&df), &seeded(false, 3)).unwrap();
        assert!(summary.samples.iter().all(|s| *s >= 0.0));
        assert!(summary.min >= 0.0);
    }

    #[test]
    fn bias_flip_lifts_the_mean() {
        let df = revenue(&[5000.0, 5100.0, 5200.0, 5300.0, 5400.0, 5500.0]);
        let config = SimulationConfig {
            n_runs: 5000,
            ..seeded(false, 11)
        };
        let flipped = SimulationConfig {
            bias_flip: true,
            ..config.clone()
        };
        let base = run_simulation(Some(&df), &config).unwrap();
        let lifted = run_simulation(Some(&df), &flipped).unwrap();
        assert!(lifted.mean > base.mean);
    }

    #[test]
    fn constant_data_simulates_a_point_mass() {
        let df = revenue(&[4200.0, 4200.0, 4200.0]);
        let summary = run_simulation(Some(&df), &seeded(false, 1)).unwrap();
        assert!((summary.mean - 4200.0).abs() < 1e-9);
        assert_eq!(summary.std, 0.0);
        assert_eq!(summary.percentile_25, summary.percentile_75);
    }

    #[test]
    fn percentiles_band_the_distribution() {
        let df = revenue(&[5000.0, 5100.0, 5200.0, 5300.0, 5400.0, 5500.0]);
        let summary = run_simulation(Some(&df), &seeded(false, 5)).unwrap();
        assert!(summary.percentile_25 <= summary.percentile_75);
        assert!(summary.min <= summary.percentile_25);
        assert!(summary.percentile_75 <= summary.max);
        assert_eq!(summary.samples.len(), DEFAULT_N_RUNS);
    }
}
