//! Running account state during a projection

use crate::params::InvestmentParams;

/// State of the account at a point in time during projection
#[derive(Debug, Clone)]
pub struct GrowthState {
    /// Current projection month (1-indexed, 0 before the first month)
    pub month: u32,

    /// Projection year (1-indexed)
    pub year: u32,

    /// Month within the year (1-12)
    pub month_in_year: u32,

    /// Portfolio value after this month's adjustments
    pub value: f64,

    /// Cumulative principal: initial plus every contribution so far
    pub invested: f64,

    /// First month at which value met or exceeded invested
    pub break_even_month: Option<u32>,
}

impl GrowthState {
    /// Initialize state at month 0
    pub fn from_params(params: &InvestmentParams) -> Self {
        Self {
            month: 0,
            year: 1,
            month_in_year: 0,
            value: params.initial,
            invested: params.initial,
            break_even_month: None,
        }
    }

    /// Advance timing to the next month
    pub fn advance_month(&mut self) {
        self.month += 1;
        self.year = (self.month - 1) / 12 + 1;
        self.month_in_year = (self.month - 1) % 12 + 1;
    }

    /// Whether the current month closes a year
    pub fn is_year_end(&self) -> bool {
        self.month_in_year == 12
    }

    /// Post a deposit to both value and principal
    pub fn deposit(&mut self, amount: f64) {
        self.value += amount;
        self.invested += amount;
    }

    /// Record the current month as break-even if this is the first crossing
    pub fn check_break_even(&mut self) {
        if self.break_even_month.is_none() && self.value >= self.invested {
            self.break_even_month = Some(self.month);
        }
    }

    /// Unrealized profit before tax
    pub fn gross_profit(&self) -> f64 {
        self.value - self.invested
    }
}
