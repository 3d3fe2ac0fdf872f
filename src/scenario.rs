//! Scenario runner for rate sweeps and economic scenarios
//!
//! Holds the rate-independent parameters once, then runs the growth engine
//! for any number of rates without re-validating the shared inputs.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::{BaseParams, InvestmentParams};
use crate::projection::{GrowthEngine, SimulationResult};

/// Share of the rate moved toward the bad (pessimist) or good (optimist) side
pub const SCENARIO_RATE_SHIFT: f64 = 0.3;

/// Lowest rate the pessimist adjustment alone can produce from a positive rate
pub const PESSIMIST_MIN_RATE: f64 = 0.001;

/// Lowest rate the pessimist adjustment alone can produce from a non-positive rate
pub const PESSIMIST_RATE_FLOOR: f64 = -0.99;

/// Inflation added for the pessimist and removed for the optimist
pub const SCENARIO_INFLATION_SHIFT: f64 = 0.01;

/// Results for the three economic scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub pessimist: SimulationResult,
    pub realist: SimulationResult,
    pub optimist: SimulationResult,
}

impl ScenarioSet {
    /// Scenarios in pessimist, realist, optimist order with their labels
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SimulationResult)> {
        [
            ("Pessimist", &self.pessimist),
            ("Realist", &self.realist),
            ("Optimist", &self.optimist),
        ]
        .into_iter()
    }
}

/// Outcome of one rate in a rate sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateComparison {
    pub rate: f64,
    pub final_value: f64,
    pub gross_profit: f64,
    pub tax: f64,
    pub net_profit: f64,
    pub roi: f64,
}

impl RateComparison {
    fn from_result(rate: f64, result: &SimulationResult) -> Self {
        Self {
            rate,
            final_value: result.final_value,
            gross_profit: result.gross_profit,
            tax: result.tax,
            net_profit: result.net_profit,
            roi: result.roi,
        }
    }
}

/// Parameters for the pessimist scenario: lower growth, higher inflation
pub fn pessimist_params(params: &InvestmentParams) -> InvestmentParams {
    let rate = params.annual_rate;
    let shifted = rate - rate.abs() * SCENARIO_RATE_SHIFT;
    let annual_rate = if rate > 0.0 {
        shifted.max(PESSIMIST_MIN_RATE.min(rate))
    } else {
        shifted.max(PESSIMIST_RATE_FLOOR.min(rate))
    };

    InvestmentParams {
        annual_rate,
        inflation: params.inflation + SCENARIO_INFLATION_SHIFT,
        ..params.clone()
    }
}

/// Parameters for the optimist scenario: higher growth, lower inflation
pub fn optimist_params(params: &InvestmentParams) -> InvestmentParams {
    let rate = params.annual_rate;
    InvestmentParams {
        annual_rate: rate + rate.abs() * SCENARIO_RATE_SHIFT,
        inflation: (params.inflation - SCENARIO_INFLATION_SHIFT).max(0.0),
        ..params.clone()
    }
}

/// Pre-validated runner for repeated projections over one set of base parameters
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(params.base())?;
///
/// for rate in [0.03, 0.05, 0.07] {
///     let result = runner.run(rate)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: BaseParams,
}

impl ScenarioRunner {
    /// Create a runner, validating the rate-independent parameters once
    pub fn new(base: BaseParams) -> Result<Self> {
        base.validate()?;
        Ok(Self { base })
    }

    pub fn base(&self) -> &BaseParams {
        &self.base
    }

    /// Run a single projection at the given rate
    pub fn run(&self, rate: f64) -> Result<SimulationResult> {
        Ok(self.engine(rate)?.project())
    }

    /// Run one projection per rate, preserving input order and duplicates
    ///
    /// Every rate is validated before any projection runs.
    pub fn compare_rates(&self, rates: &[f64]) -> Result<Vec<RateComparison>> {
        let engines = rates
            .iter()
            .map(|&rate| self.engine(rate))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Comparing {} rates", engines.len());

        Ok(engines
            .iter()
            .map(|engine| {
                let result = engine.project();
                RateComparison::from_result(engine.params().annual_rate, &result)
            })
            .collect())
    }

    /// Run pessimist, realist and optimist scenarios around `rate`
    pub fn scenarios(&self, rate: f64) -> Result<ScenarioSet> {
        let realist = self.base.with_rate(rate);
        let pessimist = GrowthEngine::new(pessimist_params(&realist))?;
        let optimist = GrowthEngine::new(optimist_params(&realist))?;
        let realist = GrowthEngine::new(realist)?;

        Ok(ScenarioSet {
            pessimist: pessimist.project(),
            realist: realist.project(),
            optimist: optimist.project(),
        })
    }

    fn engine(&self, rate: f64) -> Result<GrowthEngine> {
        GrowthEngine::new(self.base.with_rate(rate))
    }
}

/// Run the three economic scenarios for `params`
pub fn scenarios(params: &InvestmentParams) -> Result<ScenarioSet> {
    ScenarioRunner::new(params.base())?.scenarios(params.annual_rate)
}

/// Run the growth engine once per rate, in input order
pub fn compare_rates(rates: &[f64], base: &BaseParams) -> Result<Vec<RateComparison>> {
    ScenarioRunner::new(base.clone())?.compare_rates(rates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProjectionError;
    use crate::projection::simulate;
    use proptest::prelude::*;

    fn test_params() -> InvestmentParams {
        InvestmentParams {
            initial: 5000.0,
            annual_rate: 0.07,
            years: 5,
            monthly_contribution: 200.0,
            annual_contribution: None,
            inflation: 0.02,
            tax_rate: None,
        }
    }

    #[test]
    fn test_scenarios_are_ordered() {
        let set = scenarios(&test_params()).unwrap();

        assert!(set.optimist.final_value > set.realist.final_value);
        assert!(set.realist.final_value > set.pessimist.final_value);
    }

    #[test]
    fn test_realist_matches_plain_simulation() {
        let params = test_params();
        let set = scenarios(&params).unwrap();
        assert_eq!(set.realist, simulate(&params).unwrap());
    }

    #[test]
    fn test_scenario_adjustments() {
        let params = test_params();

        let pessimist = pessimist_params(&params);
        assert!((pessimist.annual_rate - 0.049).abs() < 1e-12);
        assert!((pessimist.inflation - 0.03).abs() < 1e-12);

        let optimist = optimist_params(&params);
        assert!((optimist.annual_rate - 0.091).abs() < 1e-12);
        assert!((optimist.inflation - 0.01).abs() < 1e-12);

        // Caller parameters are untouched
        assert_eq!(params, test_params());
    }

    #[test]
    fn test_pessimist_rate_floor() {
        let params = InvestmentParams { annual_rate: 0.0012, ..test_params() };
        assert_eq!(pessimist_params(&params).annual_rate, PESSIMIST_MIN_RATE);

        // A rate already below the floor is never raised
        let params = InvestmentParams { annual_rate: 0.0005, ..test_params() };
        assert_eq!(pessimist_params(&params).annual_rate, 0.0005);
    }

    #[test]
    fn test_negative_rate_scenarios_stay_ordered() {
        let params = InvestmentParams { annual_rate: -0.05, ..test_params() };

        assert!(pessimist_params(&params).annual_rate < -0.05);
        assert!(optimist_params(&params).annual_rate > -0.05);

        let set = scenarios(&params).unwrap();
        assert!(set.optimist.final_value > set.realist.final_value);
        assert!(set.realist.final_value > set.pessimist.final_value);
    }

    #[test]
    fn test_pessimist_never_raises_rate_near_total_loss() {
        let params = InvestmentParams { annual_rate: -0.995, ..test_params() };
        assert_eq!(pessimist_params(&params).annual_rate, -0.995);

        let params = InvestmentParams { annual_rate: -0.8, ..test_params() };
        assert_eq!(pessimist_params(&params).annual_rate, PESSIMIST_RATE_FLOOR);

        let params = InvestmentParams {
            initial: 1000.0,
            annual_rate: -0.995,
            years: 2,
            monthly_contribution: 0.0,
            inflation: 0.0,
            ..test_params()
        };
        let set = scenarios(&params).unwrap();
        assert!(set.pessimist.final_value <= set.realist.final_value);
        assert!(set.realist.final_value <= set.optimist.final_value);
    }

    #[test]
    fn test_optimist_inflation_floored_at_zero() {
        let params = InvestmentParams { inflation: 0.004, ..test_params() };
        assert_eq!(optimist_params(&params).inflation, 0.0);
    }

    #[test]
    fn test_compare_rates_preserves_order_and_duplicates() {
        let base = test_params().base();
        let rates = [0.09, 0.03, 0.09, 0.05];

        let results = compare_rates(&rates, &base).unwrap();

        assert_eq!(results.len(), 4);
        let echoed: Vec<f64> = results.iter().map(|r| r.rate).collect();
        assert_eq!(echoed, rates.to_vec());
        assert_eq!(results[0], results[2]);
        assert!(results[0].final_value > results[3].final_value);
        assert!(results[3].final_value > results[1].final_value);
    }

    #[test]
    fn test_compare_rates_is_all_or_nothing() {
        let base = test_params().base();
        let err = compare_rates(&[0.05, -1.5, 0.07], &base).unwrap_err();
        assert_eq!(err, ProjectionError::RateBelowTotalLoss(-1.5));
    }

    #[test]
    fn test_compare_rates_empty() {
        let base = test_params().base();
        assert!(compare_rates(&[], &base).unwrap().is_empty());
    }

    #[test]
    fn test_runner_rejects_invalid_base() {
        let base = BaseParams { years: 0, ..test_params().base() };
        assert!(ScenarioRunner::new(base).is_err());
    }

    #[test]
    fn test_higher_rate_gives_higher_value() {
        let runner = ScenarioRunner::new(test_params().base()).unwrap();
        let results: Vec<_> = [0.03, 0.04, 0.05]
            .iter()
            .map(|&rate| runner.run(rate).unwrap())
            .collect();

        assert_eq!(results.len(), 3);
        assert!(results[2].final_value > results[0].final_value);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_scenarios_are_ordered(
            initial in 0.0f64..100_000.0,
            rate in -0.995f64..0.5,
            years in 1u32..30,
            monthly in 0.0f64..2_000.0,
            annual in proptest::option::of(0.0f64..10_000.0),
            inflation in 0.0f64..0.1,
            tax in proptest::option::of(0.0f64..=1.0),
        ) {
            let params = InvestmentParams {
                initial,
                annual_rate: rate,
                years,
                monthly_contribution: monthly,
                annual_contribution: annual,
                inflation,
                tax_rate: tax,
            };
            let set = scenarios(&params).unwrap();

            prop_assert!(pessimist_params(&params).annual_rate <= rate);
            prop_assert!(optimist_params(&params).annual_rate >= rate);

            let slack = |v: f64| 1e-9 * v.abs().max(1.0);
            let (low, mid, high) = (
                set.pessimist.final_value,
                set.realist.final_value,
                set.optimist.final_value,
            );
            prop_assert!(low <= mid + slack(mid));
            prop_assert!(mid <= high + slack(high));
        }
    }
}
