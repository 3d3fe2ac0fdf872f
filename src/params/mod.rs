//! Investment parameters and parameter loading

mod data;
pub mod loader;

pub use data::{BaseParams, InvestmentParams};
pub use loader::{load_params, load_params_from_reader, load_rates, load_rates_from_reader};
