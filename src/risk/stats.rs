//! Sample statistics used by the Monte Carlo risk summary

use std::collections::BTreeMap;

/// Percentile levels reported in the risk summary
pub const PERCENTILE_LEVELS: [u32; 5] = [5, 25, 50, 75, 95];

/// Two-sided 95% normal quantile
pub const Z_95: f64 = 1.96;

/// Arithmetic mean; 0 for an empty sample
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation around `mean` (divides by n, not n - 1)
pub fn population_std_dev(samples: &[f64], mean: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;
    variance.sqrt()
}

/// Nearest-rank percentile of an ascending sample
///
/// Index is `floor(level / 100 * n)`, clamped to the last element.
pub fn nearest_rank_percentile(sorted: &[f64], level: u32) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (level as usize * sorted.len()) / 100;
    sorted[idx.min(sorted.len() - 1)]
}

/// Nearest-rank percentiles at every reported level
pub fn percentile_map(sorted: &[f64]) -> BTreeMap<u32, f64> {
    PERCENTILE_LEVELS
        .iter()
        .map(|&level| (level, nearest_rank_percentile(sorted, level)))
        .collect()
}

/// Normal-approximation 95% confidence interval for the mean
pub fn confidence_interval_95(mean: f64, std_dev: f64, n: usize) -> (f64, f64) {
    if n == 0 {
        return (mean, mean);
    }
    let half_width = Z_95 * std_dev / (n as f64).sqrt();
    (mean - half_width, mean + half_width)
}

/// Annualized return turning `initial` into `terminal` over `years`
///
/// Returns 0 when there is no initial amount and -1 for a non-positive terminal value.
pub fn annualized_return(terminal: f64, initial: f64, years: u32) -> f64 {
    if initial <= 0.0 || years == 0 {
        return 0.0;
    }
    let growth = terminal / initial;
    if growth <= 0.0 {
        return -1.0;
    }
    growth.powf(1.0 / years as f64) - 1.0
}
