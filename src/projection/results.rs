//! Output structures for projections

use serde::{Deserialize, Serialize};

/// Gross profit split into tax and net profit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    pub gross_profit: f64,
    pub tax: f64,
    pub net_profit: f64,
}

impl ProfitBreakdown {
    /// Tax applies only to positive gross profit and only when a rate is set
    pub fn from_gross(gross_profit: f64, tax_rate: Option<f64>) -> Self {
        let tax = match tax_rate {
            Some(rate) if gross_profit > 0.0 => gross_profit * rate,
            _ => 0.0,
        };

        Self {
            gross_profit,
            tax,
            net_profit: gross_profit - tax,
        }
    }
}

/// Account position at the end of a projection year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    /// Projection year (1-indexed)
    pub year: u32,
    /// Pre-tax value at year end, after inflation
    pub value: f64,
    /// Cumulative principal at year end
    pub invested: f64,
    pub gross_profit: f64,
    pub tax: f64,
    pub net_profit: f64,
}

impl YearSnapshot {
    pub fn new(year: u32, value: f64, invested: f64, tax_rate: Option<f64>) -> Self {
        let profit = ProfitBreakdown::from_gross(value - invested, tax_rate);
        Self {
            year,
            value,
            invested,
            gross_profit: profit.gross_profit,
            tax: profit.tax,
            net_profit: profit.net_profit,
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Value after each month, chronological
    pub history: Vec<f64>,

    /// Total principal at horizon end
    pub invested: f64,

    /// Value after inflation and tax
    pub final_value: f64,

    pub gross_profit: f64,
    pub net_profit: f64,
    pub tax: f64,

    /// Net profit over invested principal (0 when nothing was invested)
    pub roi: f64,

    /// First month (1-indexed) with value >= invested
    pub break_even_month: Option<u32>,

    /// One snapshot per completed year, chronological
    pub yearly_snapshots: Vec<YearSnapshot>,
}

impl SimulationResult {
    /// Number of simulated months
    pub fn months(&self) -> usize {
        self.history.len()
    }

    /// Pre-tax value at the end of the horizon
    pub fn pre_tax_value(&self) -> f64 {
        self.history.last().copied().unwrap_or(self.invested)
    }

    /// Get the snapshot for a given year, if the horizon reached it
    pub fn snapshot(&self, year: u32) -> Option<&YearSnapshot> {
        year.checked_sub(1)
            .and_then(|idx| self.yearly_snapshots.get(idx as usize))
    }
}
