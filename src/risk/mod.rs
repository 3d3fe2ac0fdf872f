//! Monte Carlo risk analysis over random annual rates

mod monte_carlo;
pub mod stats;

pub use monte_carlo::{monte_carlo, monte_carlo_with_rng, MonteCarloEngine, MonteCarloResult};
