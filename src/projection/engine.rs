//! Core growth engine for monthly account projections

use crate::error::Result;
use crate::params::InvestmentParams;
use super::results::{ProfitBreakdown, SimulationResult, YearSnapshot};
use super::state::GrowthState;

/// Months per projection year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Effective monthly rate equivalent to an annual rate under monthly compounding
///
/// Twelve months at this rate reproduce `annual_rate` exactly, unlike `annual_rate / 12`.
pub fn monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / MONTHS_PER_YEAR as f64) - 1.0
}

/// Main growth engine
///
/// Construction validates the parameters; projection is then a pure function.
#[derive(Debug, Clone)]
pub struct GrowthEngine {
    params: InvestmentParams,
    monthly_rate: f64,
    /// Monthly deflator `(1 + inflation)^(1/12)`, absent without inflation
    monthly_inflation_factor: Option<f64>,
}

impl GrowthEngine {
    /// Create a new engine, rejecting invalid parameters
    pub fn new(params: InvestmentParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::from_validated(params))
    }

    /// Build an engine from parameters the caller has already validated
    pub(crate) fn from_validated(params: InvestmentParams) -> Self {
        let monthly_inflation_factor = if params.inflation > 0.0 {
            Some((1.0 + params.inflation).powf(1.0 / MONTHS_PER_YEAR as f64))
        } else {
            None
        };

        Self {
            monthly_rate: monthly_rate(params.annual_rate),
            monthly_inflation_factor,
            params,
        }
    }

    pub fn params(&self) -> &InvestmentParams {
        &self.params
    }

    pub fn monthly_rate(&self) -> f64 {
        self.monthly_rate
    }

    /// Run the projection over the full horizon
    pub fn project(&self) -> SimulationResult {
        let months = self.params.months();
        let mut state = GrowthState::from_params(&self.params);
        let mut history = Vec::with_capacity(months as usize);
        let mut yearly_snapshots = Vec::with_capacity(self.params.years as usize);

        for _month in 1..=months {
            state.advance_month();
            self.calculate_month(&mut state);
            history.push(state.value);

            if state.is_year_end() {
                yearly_snapshots.push(YearSnapshot::new(
                    state.year,
                    state.value,
                    state.invested,
                    self.params.tax_rate,
                ));
            }
        }

        let profit = ProfitBreakdown::from_gross(state.gross_profit(), self.params.tax_rate);
        let roi = if state.invested > 0.0 {
            profit.net_profit / state.invested
        } else {
            log::debug!("Nothing invested over the horizon; ROI reported as 0");
            0.0
        };

        log::debug!(
            "Projected {} months at {:.4}: value={:.2} invested={:.2} break_even={:?}",
            months,
            self.params.annual_rate,
            state.value,
            state.invested,
            state.break_even_month,
        );

        SimulationResult {
            history,
            invested: state.invested,
            // Written as principal plus net profit so the no-tax identity is exact
            final_value: state.invested + profit.net_profit,
            gross_profit: profit.gross_profit,
            net_profit: profit.net_profit,
            tax: profit.tax,
            roi,
            break_even_month: state.break_even_month,
            yearly_snapshots,
        }
    }

    /// Apply one month of growth, deposits and inflation
    fn calculate_month(&self, state: &mut GrowthState) {
        state.value *= 1.0 + self.monthly_rate;

        state.deposit(self.params.monthly_contribution);

        if state.is_year_end() {
            if let Some(annual) = self.params.annual_contribution {
                state.deposit(annual);
            }
        }

        // Deflate every month; deposits posted this month are deflated with the balance
        if let Some(factor) = self.monthly_inflation_factor {
            state.value /= factor;
        }

        state.check_break_even();
    }
}

/// Simulate one account trajectory
pub fn simulate(params: &InvestmentParams) -> Result<SimulationResult> {
    let engine = GrowthEngine::new(params.clone())?;
    Ok(engine.project())
}
