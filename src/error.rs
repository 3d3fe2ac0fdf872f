//! Error types for parameter validation and report export

use thiserror::Error;

/// Caller-input errors, raised before any month is simulated
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("years must be positive, got {0}")]
    NonPositiveYears(u32),

    #[error("horizon of {0} years exceeds the supported month count")]
    HorizonTooLong(u32),

    #[error("{field} must be a non-negative amount, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// Monthly conversion `(1 + r)^(1/12)` is undefined at or below -100%
    #[error("annual rate must be greater than -1.0, got {0}")]
    RateBelowTotalLoss(f64),

    #[error("tax rate must lie in [0, 1], got {0}")]
    TaxRateOutOfRange(f64),

    #[error("Monte Carlo requires at least one run")]
    NoRuns,

    #[error("rate range is inverted: min {min} > max {max}")]
    InvertedRateRange { min: f64, max: f64 },
}

/// Failures while writing CSV output
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ProjectionError> = std::result::Result<T, E>;
