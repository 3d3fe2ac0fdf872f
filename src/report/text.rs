//! Human-readable text summaries

use crate::params::InvestmentParams;
use crate::projection::SimulationResult;
use crate::risk::{stats::PERCENTILE_LEVELS, MonteCarloResult};
use crate::scenario::{RateComparison, ScenarioSet};

/// Format an amount with thousands separators and two decimals
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, frac) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac)
}

/// Format a decimal rate as a percentage with one decimal
pub fn format_pct(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Parameter block and results of a single projection
pub fn render_summary(params: &InvestmentParams, result: &SimulationResult) -> String {
    let mut lines = vec![
        format!("Investment projection - {} years", params.years),
        "Parameters:".to_string(),
        format!("  Initial amount:        {}", format_amount(params.initial)),
        format!("  Annual rate:           {}", format_pct(params.annual_rate)),
        format!("  Monthly contribution:  {}", format_amount(params.monthly_contribution)),
    ];

    if let Some(annual) = params.annual_contribution {
        lines.push(format!("  Annual contribution:   {}", format_amount(annual)));
    }
    lines.push(format!("  Inflation:             {}", format_pct(params.inflation)));
    if let Some(tax_rate) = params.tax_rate {
        lines.push(format!("  Tax rate:              {}", format_pct(tax_rate)));
    }
    lines.push(format!(
        "  Horizon:               {} years ({} months)",
        params.years,
        params.months()
    ));

    lines.push("Results:".to_string());
    lines.push(format!("  Total invested:        {}", format_amount(result.invested)));
    lines.push(format!("  Final value:           {}", format_amount(result.final_value)));
    lines.push(format!("  Gross profit:          {}", format_amount(result.gross_profit)));
    lines.push(format!("  Tax:                   {}", format_amount(result.tax)));
    lines.push(format!("  Net profit:            {}", format_amount(result.net_profit)));
    lines.push(format!("  ROI:                   {}", format_pct(result.roi)));
    lines.push(match result.break_even_month {
        Some(month) => format!("  Break-even:            month {}", month),
        None => "  Break-even:            not reached".to_string(),
    });

    lines.join("\n")
}

/// Rate comparison table; the best final value is marked as recommended
pub fn render_comparison(params: &InvestmentParams, comparisons: &[RateComparison]) -> String {
    let best = comparisons
        .iter()
        .map(|c| c.final_value)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut lines = vec![format!(
        "Rate comparison ({} years, {} initial):",
        params.years,
        format_amount(params.initial)
    )];

    for comparison in comparisons {
        let marker = if comparison.final_value == best { "  <- recommended" } else { "" };
        lines.push(format!(
            "{:>7}: {} (net profit: {}, ROI: {}){}",
            format_pct(comparison.rate),
            format_amount(comparison.final_value),
            format_amount(comparison.net_profit),
            format_pct(comparison.roi),
            marker,
        ));
    }

    lines.join("\n")
}

/// Final values of the three economic scenarios
pub fn render_scenarios(set: &ScenarioSet) -> String {
    let mut lines = vec!["Economic scenarios:".to_string()];
    for (label, result) in set.iter() {
        lines.push(format!("  {:<10} {}", format!("{}:", label), format_amount(result.final_value)));
    }
    lines.join("\n")
}

/// Full Monte Carlo risk summary
pub fn render_monte_carlo(result: &MonteCarloResult) -> String {
    let mut lines = vec![
        format!(
            "Monte Carlo ({} runs, rates {} to {}):",
            result.runs,
            format_pct(result.rate_min),
            format_pct(result.rate_max)
        ),
        format!("  Min:                    {}", format_amount(result.min)),
        format!("  Max:                    {}", format_amount(result.max)),
        format!("  Avg:                    {}", format_amount(result.avg)),
        format!("  Std dev:                {}", format_amount(result.std_dev)),
    ];

    for level in PERCENTILE_LEVELS {
        if let Some(value) = result.percentile(level) {
            lines.push(format!("  P{:<2}:                    {}", level, format_amount(value)));
        }
    }

    lines.push(format!("  Probability of loss:    {}", format_pct(result.probability_loss)));
    lines.push(format!(
        "  95% confidence (mean):  {} - {}",
        format_amount(result.confidence95.0),
        format_amount(result.confidence95.1)
    ));
    lines.push(format!(
        "  Expected annual return: {}",
        format_pct(result.expected_annual_return)
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::simulate;
    use crate::risk::monte_carlo_with_rng;
    use crate::scenario::{compare_rates, scenarios};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_params() -> InvestmentParams {
        InvestmentParams {
            initial: 10_000.0,
            annual_rate: 0.07,
            years: 5,
            monthly_contribution: 200.0,
            annual_contribution: Some(1000.0),
            inflation: 0.02,
            tax_rate: Some(0.1),
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-2500.5), "-2,500.50");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(0.07), "7.0%");
        assert_eq!(format_pct(-0.125), "-12.5%");
    }

    #[test]
    fn test_summary_contains_results() {
        let params = test_params();
        let result = simulate(&params).unwrap();
        let text = render_summary(&params, &result);

        assert!(text.contains("Investment projection - 5 years"));
        assert!(text.contains("Annual contribution:"));
        assert!(text.contains("Tax rate:              10.0%"));
        assert!(text.contains("5 years (60 months)"));
        assert!(text.contains(&format_amount(result.final_value)));
        assert!(text.contains("Break-even:"));
    }

    #[test]
    fn test_comparison_marks_best_rate() {
        let params = test_params();
        let comparisons = compare_rates(&[0.03, 0.09, 0.05], &params.base()).unwrap();
        let text = render_comparison(&params, &comparisons);

        let marked: Vec<&str> = text.lines().filter(|l| l.contains("recommended")).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("9.0%"));
    }

    #[test]
    fn test_scenarios_listed_in_order() {
        let text = render_scenarios(&scenarios(&test_params()).unwrap());
        let pessimist = text.find("Pessimist").unwrap();
        let realist = text.find("Realist").unwrap();
        let optimist = text.find("Optimist").unwrap();
        assert!(pessimist < realist && realist < optimist);
    }

    #[test]
    fn test_monte_carlo_report_lists_percentiles() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = monte_carlo_with_rng(100, 0.02, 0.08, &test_params().base(), &mut rng).unwrap();
        let text = render_monte_carlo(&result);

        for level in PERCENTILE_LEVELS {
            assert!(text.contains(&format!("P{}", level)));
        }
        assert!(text.contains("Probability of loss"));
        assert!(text.contains("Expected annual return"));
    }
}
