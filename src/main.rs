//! Investment Projection CLI
//!
//! Command-line interface for projections, rate comparisons, scenarios and
//! Monte Carlo risk summaries

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use investment_projection::params::{load_params, load_rates};
use investment_projection::report::{self, ChartMetric};
use investment_projection::{
    compare_rates, monte_carlo, monte_carlo_with_rng, scenarios, simulate, InvestmentParams,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

/// Monte Carlo run count when neither `--runs` nor `MONTE_CARLO_RUNS` is set
const DEFAULT_RUNS: u32 = 1000;

#[derive(Parser, Debug)]
#[command(name = "investment_projection", version, about = "Project investment growth and quantify rate risk")]
struct Cli {
    /// JSON parameter file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial lump sum
    #[arg(long)]
    initial: Option<f64>,

    /// Nominal annual rate as a decimal (0.07 = 7%)
    #[arg(long, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Horizon in years
    #[arg(long)]
    years: Option<u32>,

    /// Monthly contribution
    #[arg(long)]
    monthly: Option<f64>,

    /// Contribution added at every year end
    #[arg(long)]
    annual: Option<f64>,

    /// Annual inflation as a decimal
    #[arg(long)]
    inflation: Option<f64>,

    /// Flat tax rate on positive profit, as a decimal
    #[arg(long)]
    taxes: Option<f64>,

    /// Compare comma-separated rates, e.g. 0.03,0.05,0.07
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    compare: Vec<f64>,

    /// CSV file with a `rate` column, appended to --compare
    #[arg(long)]
    rates_file: Option<PathBuf>,

    /// Run pessimist, realist and optimist scenarios
    #[arg(long)]
    scenarios: bool,

    /// Run a Monte Carlo risk analysis (requires --rate-range)
    #[arg(long)]
    montecarlo: bool,

    /// Monte Carlo run count [env: MONTE_CARLO_RUNS, default: 1000]
    #[arg(long)]
    runs: Option<u32>,

    /// Monte Carlo rate range as MIN:MAX, e.g. 0.03:0.09
    #[arg(long, value_parser = parse_rate_range, allow_hyphen_values = true)]
    rate_range: Option<(f64, f64)>,

    /// Seed for reproducible Monte Carlo draws
    #[arg(long)]
    seed: Option<u64>,

    /// Print a yearly bar chart
    #[arg(long)]
    chart: bool,

    /// Chart net profit instead of value
    #[arg(long)]
    net: bool,

    /// Export the monthly history of the single projection to CSV
    #[arg(long)]
    export: Option<PathBuf>,

    /// Export the yearly snapshots of the single projection to CSV
    #[arg(long)]
    yearly_export: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn parse_rate_range(s: &str) -> Result<(f64, f64), String> {
    let (min, max) = s
        .split_once(':')
        .ok_or_else(|| format!("expected MIN:MAX, got '{}'", s))?;
    let min: f64 = min.trim().parse().map_err(|e| format!("invalid MIN '{}': {}", min, e))?;
    let max: f64 = max.trim().parse().map_err(|e| format!("invalid MAX '{}': {}", max, e))?;
    Ok((min, max))
}

/// File values first, then flag overrides
///
/// Only the rate-independent inputs are checked here; each mode validates the
/// rates it actually uses.
fn build_params(cli: &Cli) -> Result<InvestmentParams> {
    let mut params = match &cli.config {
        Some(path) => load_params(path)
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => InvestmentParams::default(),
    };

    if let Some(initial) = cli.initial {
        params.initial = initial;
    }
    if let Some(rate) = cli.rate {
        params.annual_rate = rate;
    }
    if let Some(years) = cli.years {
        params.years = years;
    }
    if let Some(monthly) = cli.monthly {
        params.monthly_contribution = monthly;
    }
    if cli.annual.is_some() {
        params.annual_contribution = cli.annual;
    }
    if let Some(inflation) = cli.inflation {
        params.inflation = inflation;
    }
    if cli.taxes.is_some() {
        params.tax_rate = cli.taxes;
    }

    params.base().validate()?;
    Ok(params)
}

fn collect_rates(cli: &Cli) -> Result<Vec<f64>> {
    let mut rates = cli.compare.clone();
    if let Some(path) = &cli.rates_file {
        let loaded = load_rates(path)
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("failed to load rates from {}", path.display()))?;
        rates.extend(loaded);
    }
    Ok(rates)
}

fn monte_carlo_runs(cli: &Cli) -> u32 {
    cli.runs.unwrap_or_else(|| {
        env::var("MONTE_CARLO_RUNS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RUNS)
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn chart_metric(cli: &Cli) -> ChartMetric {
    if cli.net {
        ChartMetric::NetProfit
    } else {
        ChartMetric::Value
    }
}

fn run_single(cli: &Cli, params: &InvestmentParams) -> Result<()> {
    let result = simulate(params)?;

    if cli.json {
        print_json(&result)?;
    } else {
        println!("{}", report::render_summary(params, &result));
        if cli.chart {
            println!("\n{}", report::render_bar_chart(&result, chart_metric(cli)));
        }
    }

    if let Some(path) = &cli.export {
        report::export_history(path, &result)
            .with_context(|| format!("failed to export {}", path.display()))?;
        println!("Exported monthly history to {}", path.display());
    }
    if let Some(path) = &cli.yearly_export {
        report::export_yearly(path, &result)
            .with_context(|| format!("failed to export {}", path.display()))?;
        println!("Exported yearly snapshots to {}", path.display());
    }

    Ok(())
}

fn run_compare(cli: &Cli, params: &InvestmentParams, rates: &[f64]) -> Result<()> {
    let comparisons = compare_rates(rates, &params.base())?;

    if cli.json {
        return print_json(&comparisons);
    }

    println!("\n{}", report::render_comparison(params, &comparisons));
    if cli.chart {
        for comparison in &comparisons {
            let result = simulate(&params.with_rate(comparison.rate))?;
            println!("\n{}", report::render_bar_chart(&result, chart_metric(cli)));
        }
    }
    Ok(())
}

fn run_scenarios(cli: &Cli, params: &InvestmentParams) -> Result<()> {
    let set = scenarios(params)?;

    if cli.json {
        return print_json(&set);
    }

    println!("\n{}", report::render_scenarios(&set));
    if cli.chart {
        for (label, result) in set.iter() {
            println!("\n{}", label);
            println!("{}", report::render_bar_chart(result, chart_metric(cli)));
        }
    }
    Ok(())
}

fn run_monte_carlo(cli: &Cli, params: &InvestmentParams) -> Result<()> {
    let (rate_min, rate_max) = cli
        .rate_range
        .context("--montecarlo requires --rate-range MIN:MAX")?;
    let runs = monte_carlo_runs(cli);
    let base = params.base();

    let result = match cli.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            monte_carlo_with_rng(runs, rate_min, rate_max, &base, &mut rng)?
        }
        None => monte_carlo(runs, rate_min, rate_max, &base)?,
    };

    if cli.json {
        return print_json(&result);
    }

    println!("\n{}", report::render_monte_carlo(&result));
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let params = build_params(&cli)?;
    let rates = collect_rates(&cli)?;

    if rates.is_empty() && !cli.scenarios && !cli.montecarlo {
        run_single(&cli, &params)?;
    }
    if !rates.is_empty() {
        run_compare(&cli, &params, &rates)?;
    }
    if cli.scenarios {
        run_scenarios(&cli, &params)?;
    }
    if cli.montecarlo {
        run_monte_carlo(&cli, &params)?;
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["investment_projection"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_rate_range() {
        assert_eq!(parse_rate_range("0.03:0.09"), Ok((0.03, 0.09)));
        assert_eq!(parse_rate_range("-0.1 : 0.1"), Ok((-0.1, 0.1)));
        assert!(parse_rate_range("0.03-0.09").is_err());
        assert!(parse_rate_range("a:0.1").is_err());
    }

    #[test]
    fn test_flags_build_params() {
        let cli = parse(&[
            "--initial", "1000", "--rate", "-0.02", "--years", "3", "--monthly", "50",
            "--annual", "500", "--inflation", "0.02", "--taxes", "0.1",
        ]);
        let params = build_params(&cli).unwrap();

        assert_eq!(params.initial, 1000.0);
        assert_eq!(params.annual_rate, -0.02);
        assert_eq!(params.years, 3);
        assert_eq!(params.annual_contribution, Some(500.0));
        assert_eq!(params.tax_rate, Some(0.1));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let cli = parse(&["--initial", "1000", "--rate", "0.05"]);
        assert!(build_params(&cli).is_err());

        let cli = parse(&["--initial=-5", "--years", "2"]);
        assert_eq!(cli.initial, Some(-5.0));
        assert!(build_params(&cli).is_err());
    }

    #[test]
    fn test_compare_and_monte_carlo_flags() {
        let cli = parse(&[
            "--years", "5", "--compare", "0.03,0.05,0.03", "--montecarlo",
            "--rate-range", "0.02:0.08", "--runs", "10", "--seed", "7",
        ]);

        assert_eq!(collect_rates(&cli).unwrap(), vec![0.03, 0.05, 0.03]);
        assert_eq!(cli.rate_range, Some((0.02, 0.08)));
        assert_eq!(monte_carlo_runs(&cli), 10);
        assert!(run(cli).is_ok());
    }

    #[test]
    fn test_sweep_ignores_unused_rate() {
        let cli = parse(&["--initial", "1000", "--years", "3", "--rate=-2", "--compare", "0.05"]);
        assert!(run(cli).is_ok());

        let cli = parse(&["--initial", "1000", "--years", "3", "--rate=-2"]);
        assert!(run(cli).is_err());
    }

    #[test]
    fn test_monte_carlo_requires_range() {
        let cli = parse(&["--years", "5", "--montecarlo"]);
        assert!(run(cli).is_err());
    }
}
