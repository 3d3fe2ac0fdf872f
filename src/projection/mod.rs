//! Growth engine for single-account projections

mod state;
mod engine;
mod results;

pub use state::GrowthState;
pub use engine::{simulate, monthly_rate, GrowthEngine, MONTHS_PER_YEAR};
pub use results::{ProfitBreakdown, SimulationResult, YearSnapshot};
