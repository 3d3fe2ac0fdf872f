//! Investment Projection - compounding growth and Monte Carlo risk engine
//!
//! This library provides:
//! - Month-by-month projection of a single account with contributions,
//!   inflation and a flat profit tax
//! - Break-even detection and yearly snapshots
//! - Pessimist/realist/optimist scenarios and rate sweeps
//! - Monte Carlo risk summaries over uniformly drawn rates
//! - Text reports, ASCII charts and CSV export of the results

pub mod error;
pub mod params;
pub mod projection;
pub mod scenario;
pub mod risk;
pub mod report;

// Re-export commonly used types
pub use error::{ExportError, ProjectionError, Result};
pub use params::{BaseParams, InvestmentParams};
pub use projection::{simulate, GrowthEngine, SimulationResult, YearSnapshot};
pub use scenario::{compare_rates, scenarios, RateComparison, ScenarioRunner, ScenarioSet};
pub use risk::{monte_carlo, monte_carlo_with_rng, MonteCarloEngine, MonteCarloResult};
