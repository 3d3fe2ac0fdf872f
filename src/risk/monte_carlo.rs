//! Monte Carlo risk engine over uniformly drawn annual rates
//!
//! Rates are drawn sequentially from the caller's generator, so a seeded
//! generator fixes the whole sample. The independent projections then run
//! on the rayon pool and are reduced only once every run has finished.

use std::collections::BTreeMap;
use std::time::Instant;

use rand::distr::{Distribution, Uniform};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};
use crate::params::BaseParams;
use crate::projection::GrowthEngine;
use super::stats;

/// Statistical risk profile of the final values across all runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloResult {
    pub runs: u32,
    pub rate_min: f64,
    pub rate_max: f64,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Nearest-rank percentile for each level in `stats::PERCENTILE_LEVELS`
    pub percentiles: BTreeMap<u32, f64>,
    /// Share of runs ending strictly below the initial investment
    pub probability_loss: f64,
    /// 95% confidence interval for the mean final value
    pub confidence95: (f64, f64),
    /// Annualized return implied by the average final value
    pub expected_annual_return: f64,
}

impl MonteCarloResult {
    /// Percentile value at `level`, if it is one of the reported levels
    pub fn percentile(&self, level: u32) -> Option<f64> {
        self.percentiles.get(&level).copied()
    }
}

/// Monte Carlo engine for a fixed base and rate range
#[derive(Debug, Clone)]
pub struct MonteCarloEngine {
    base: BaseParams,
    runs: u32,
    rate_min: f64,
    rate_max: f64,
    distribution: Uniform<f64>,
}

impl MonteCarloEngine {
    /// Create an engine, rejecting invalid runs, ranges or base parameters
    pub fn new(runs: u32, rate_min: f64, rate_max: f64, base: BaseParams) -> Result<Self> {
        if runs == 0 {
            return Err(ProjectionError::NoRuns);
        }
        for (field, value) in [("rateMin", rate_min), ("rateMax", rate_max)] {
            if !value.is_finite() {
                return Err(ProjectionError::NonFinite { field, value });
            }
        }
        if rate_min > rate_max {
            return Err(ProjectionError::InvertedRateRange { min: rate_min, max: rate_max });
        }

        // Lowest rate valid implies every draw in the range is valid
        base.with_rate(rate_min).validate()?;

        let distribution = Uniform::new_inclusive(rate_min, rate_max)
            .map_err(|_| ProjectionError::InvertedRateRange { min: rate_min, max: rate_max })?;

        Ok(Self {
            base,
            runs,
            rate_min,
            rate_max,
            distribution,
        })
    }

    /// Run with the thread-local, OS-seeded generator
    pub fn run(&self) -> MonteCarloResult {
        self.run_with_rng(&mut rand::rng())
    }

    /// Run with a caller-supplied generator
    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> MonteCarloResult {
        let start = Instant::now();
        log::info!(
            "Running {} Monte Carlo projections with rates in [{}, {}]",
            self.runs,
            self.rate_min,
            self.rate_max
        );

        let rates: Vec<f64> = (0..self.runs)
            .map(|_| self.distribution.sample(rng))
            .collect();

        let final_values: Vec<f64> = rates
            .par_iter()
            .map(|&rate| {
                let engine = GrowthEngine::from_validated(self.base.with_rate(rate));
                engine.project().final_value
            })
            .collect();

        let result = self.summarize(final_values);
        log::info!("Monte Carlo complete in {:?}", start.elapsed());
        result
    }

    /// Reduce the full sample of final values into the risk summary
    fn summarize(&self, mut samples: Vec<f64>) -> MonteCarloResult {
        samples.sort_by(|a, b| a.total_cmp(b));

        let n = samples.len();
        let min = samples[0];
        let max = samples[n - 1];
        // Summation rounding can push the mean of equal samples past an extreme
        let avg = stats::mean(&samples).clamp(min, max);
        let std_dev = stats::population_std_dev(&samples, avg);

        let losses = samples.iter().filter(|&&x| x < self.base.initial).count();

        if self.base.initial <= 0.0 {
            log::warn!("No initial investment; expected annual return reported as 0");
        }

        MonteCarloResult {
            runs: self.runs,
            rate_min: self.rate_min,
            rate_max: self.rate_max,
            min,
            max,
            avg,
            std_dev,
            percentiles: stats::percentile_map(&samples),
            probability_loss: losses as f64 / n as f64,
            confidence95: stats::confidence_interval_95(avg, std_dev, n),
            expected_annual_return: stats::annualized_return(avg, self.base.initial, self.base.years),
        }
    }
}

/// Monte Carlo risk summary using the default non-deterministic generator
pub fn monte_carlo(runs: u32, rate_min: f64, rate_max: f64, base: &BaseParams) -> Result<MonteCarloResult> {
    Ok(MonteCarloEngine::new(runs, rate_min, rate_max, base.clone())?.run())
}

/// Monte Carlo risk summary drawing rates from `rng`
pub fn monte_carlo_with_rng<R: Rng + ?Sized>(
    runs: u32,
    rate_min: f64,
    rate_max: f64,
    base: &BaseParams,
    rng: &mut R,
) -> Result<MonteCarloResult> {
    Ok(MonteCarloEngine::new(runs, rate_min, rate_max, base.clone())?.run_with_rng(rng))
}
