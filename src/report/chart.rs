//! ASCII bar chart of yearly snapshots

use crate::projection::{SimulationResult, YearSnapshot};
use super::text::format_amount;

/// Width in cells of the longest bar
pub const CHART_WIDTH: usize = 40;

const BAR_CELL: char = '#';

/// Quantity drawn per year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartMetric {
    /// Year-end value before tax
    #[default]
    Value,
    /// Year-end net profit after tax
    NetProfit,
}

impl ChartMetric {
    fn of(self, snapshot: &YearSnapshot) -> f64 {
        match self {
            ChartMetric::Value => snapshot.value,
            ChartMetric::NetProfit => snapshot.net_profit,
        }
    }

    fn title(self) -> &'static str {
        match self {
            ChartMetric::Value => "Portfolio value by year",
            ChartMetric::NetProfit => "Net profit by year",
        }
    }
}

/// One bar per year, scaled against the largest positive value
///
/// Non-positive values render as an empty bar.
pub fn render_bar_chart(result: &SimulationResult, metric: ChartMetric) -> String {
    let values: Vec<f64> = result.yearly_snapshots.iter().map(|s| metric.of(s)).collect();
    let peak = values.iter().copied().fold(0.0_f64, f64::max);
    let year_width = result.yearly_snapshots.len().to_string().len();

    let mut lines = vec![metric.title().to_string()];
    for (snapshot, value) in result.yearly_snapshots.iter().zip(&values) {
        let cells = bar_cells(*value, peak);
        lines.push(format!(
            "Year {:>width$} | {:<bar$} {}",
            snapshot.year,
            BAR_CELL.to_string().repeat(cells),
            format_amount(*value),
            width = year_width,
            bar = CHART_WIDTH,
        ));
    }

    lines.join("\n")
}

fn bar_cells(value: f64, peak: f64) -> usize {
    if value <= 0.0 || peak <= 0.0 {
        return 0;
    }
    ((value / peak) * CHART_WIDTH as f64).round() as usize
}
