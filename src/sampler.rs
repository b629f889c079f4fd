use crate::SimulationConfig;
use crate::core::errors::{ParameterError, validate_fraction};
use crate::protocols::qkd::bb84::{self, BB84Result, expected_qber};
use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

/// Statistics over repeated independent runs of one configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepSummary {
    pub runs: usize,
    /// Runs whose sample was empty; they are left out of the estimate statistics.
    pub undefined_estimates: usize,
    pub mean_estimate: Option<f64>,
    pub std_estimate: Option<f64>,
    pub mean_raw_qber: Option<f64>,
    pub mean_residual_error_rate: Option<f64>,
    pub mean_sifted_length: f64,
}

/// One point of a QBER-versus-interception curve.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    pub intercept_fraction: f64,
    pub expected_qber: f64,
    pub summary: SweepSummary,
}

/// Repeats a simulation over many seeded runs.
///
/// Run `i` is seeded with `base_seed + i`, so every run owns an independent generator and
/// runs execute in parallel without sharing state.
#[derive(Debug, Clone)]
pub struct Sampler {
    /// Configuration applied to every run. Its `seed` is the base seed.
    pub config: SimulationConfig,
    /// Number of runs per configuration.
    pub runs: usize,
}

impl Sampler {
    /// Creates a new `Sampler` repeating `config` `runs` times.
    pub fn new(config: SimulationConfig, runs: usize) -> Self {
        Self { config, runs }
    }

    /// Runs every repetition and returns the individual results in seed order.
    ///
    /// Runs execute on the rayon thread pool. Run `i` owns a `StdRng` seeded with
    /// `base_seed + i`, where `base_seed` is `config.seed` or a seed drawn from the thread
    /// generator when the config has none.
    ///
    /// # Returns
    ///
    /// A `Result` containing one `BB84Result` per run, or a `ParameterError` if `runs` is zero
    /// or the configuration is invalid. Nothing is run in the error case.
    pub fn run_all(&self) -> Result<Vec<BB84Result>, ParameterError> {
        if self.runs == 0 {
            return Err(ParameterError::ZeroRuns);
        }
        self.config.validate()?;

        let base_seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::rng().random::<u64>());

        (0..self.runs)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
                bb84::run_with_rng(&self.config, &mut rng)
            })
            .collect()
    }

    /// Runs every repetition and aggregates the results.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `SweepSummary` of all runs, or the `ParameterError`
    /// reported by `run_all`.
    pub fn run(&self) -> Result<SweepSummary, ParameterError> {
        let results = self.run_all()?;
        let summary = summarize(&results);
        info!(
            "{} runs: mean estimate {:?} (std {:?}), mean residual {:?}",
            summary.runs,
            summary.mean_estimate,
            summary.std_estimate,
            summary.mean_residual_error_rate
        );
        Ok(summary)
    }

    /// Samples a QBER-versus-interception curve.
    ///
    /// Every fraction gets its own `Sampler` over the same base configuration with the
    /// eavesdropper switched on, so each point repeats the same seeds.
    ///
    /// # Arguments
    ///
    /// * `fractions` - Interception fractions to sample, each in `[0, 1]`.
    ///
    /// # Returns
    ///
    /// A `Result` containing one `CurvePoint` per fraction, in input order, pairing the
    /// `SweepSummary` with the QBER predicted by `expected_qber`. Fails with a
    /// `ParameterError` before any run if a fraction is out of range.
    pub fn intercept_curve(&self, fractions: &[f64]) -> Result<Vec<CurvePoint>, ParameterError> {
        for &f in fractions {
            validate_fraction(f)?;
        }

        fractions
            .iter()
            .map(|&f| {
                let sampler = Sampler::new(self.config.clone().with_eavesdropper(f), self.runs);
                Ok(CurvePoint {
                    intercept_fraction: f,
                    expected_qber: expected_qber(f, self.config.channel_error),
                    summary: sampler.run()?,
                })
            })
            .collect()
    }
}

/// Aggregates a set of run results.
pub fn summarize(results: &[BB84Result]) -> SweepSummary {
    let estimates: Vec<f64> = results.iter().filter_map(|r| r.error_estimate).collect();
    let raw: Vec<f64> = results.iter().filter_map(|r| r.raw_qber).collect();
    let residual: Vec<f64> = results
        .iter()
        .filter_map(|r| r.residual_error_rate)
        .collect();

    let mean_estimate = mean(&estimates);
    let std_estimate = mean_estimate.map(|m| {
        let var = estimates.iter().map(|x| (x - m).powi(2)).sum::<f64>() / estimates.len() as f64;
        var.sqrt()
    });

    let mean_sifted_length = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| r.sifted_length as f64).sum::<f64>() / results.len() as f64
    };

    SweepSummary {
        runs: results.len(),
        undefined_estimates: results.len() - estimates.len(),
        mean_estimate,
        std_estimate,
        mean_raw_qber: mean(&raw),
        mean_residual_error_rate: mean(&residual),
        mean_sifted_length,
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
