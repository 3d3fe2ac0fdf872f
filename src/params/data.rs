//! Investment parameter structures and input validation

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};

/// Parameters for a single account projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvestmentParams {
    /// Lump sum invested at month 0
    pub initial: f64,

    /// Nominal annual growth rate as a decimal (0.07 = 7%)
    pub annual_rate: f64,

    /// Projection horizon in whole years
    pub years: u32,

    /// Deposit added at the end of every month
    pub monthly_contribution: f64,

    /// Deposit added at the end of every 12th month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_contribution: Option<f64>,

    /// Annual inflation rate used to deflate to real purchasing power
    pub inflation: f64,

    /// Flat tax on positive gross profit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
}

impl InvestmentParams {
    /// Total number of simulated months
    ///
    /// Saturates for horizons that `validate` rejects.
    pub fn months(&self) -> u32 {
        self.years.saturating_mul(12)
    }

    /// Copy of these parameters with a different annual rate
    pub fn with_rate(&self, annual_rate: f64) -> Self {
        Self {
            annual_rate,
            ..self.clone()
        }
    }

    /// Strip the rate, leaving the parameters shared by sweeps and Monte Carlo
    pub fn base(&self) -> BaseParams {
        BaseParams {
            initial: self.initial,
            years: self.years,
            monthly_contribution: self.monthly_contribution,
            annual_contribution: self.annual_contribution,
            inflation: self.inflation,
            tax_rate: self.tax_rate,
        }
    }

    /// Reject caller-input errors before any simulation runs
    pub fn validate(&self) -> Result<()> {
        self.base().validate()?;
        check_finite("annualRate", self.annual_rate)?;
        if self.annual_rate <= -1.0 {
            return Err(ProjectionError::RateBelowTotalLoss(self.annual_rate));
        }
        Ok(())
    }
}

/// Investment parameters without a rate; the rate is supplied per run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BaseParams {
    pub initial: f64,
    pub years: u32,
    pub monthly_contribution: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_contribution: Option<f64>,
    pub inflation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
}

impl BaseParams {
    /// Attach a rate to produce full simulation parameters
    pub fn with_rate(&self, annual_rate: f64) -> InvestmentParams {
        InvestmentParams {
            initial: self.initial,
            annual_rate,
            years: self.years,
            monthly_contribution: self.monthly_contribution,
            annual_contribution: self.annual_contribution,
            inflation: self.inflation,
            tax_rate: self.tax_rate,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.years == 0 {
            return Err(ProjectionError::NonPositiveYears(self.years));
        }
        if self.years.checked_mul(12).is_none() {
            return Err(ProjectionError::HorizonTooLong(self.years));
        }

        check_amount("initial", self.initial)?;
        check_amount("monthlyContribution", self.monthly_contribution)?;
        if let Some(annual) = self.annual_contribution {
            check_amount("annualContribution", annual)?;
        }
        check_amount("inflation", self.inflation)?;

        if let Some(tax_rate) = self.tax_rate {
            check_finite("taxRate", tax_rate)?;
            if !(0.0..=1.0).contains(&tax_rate) {
                return Err(ProjectionError::TaxRateOutOfRange(tax_rate));
            }
        }

        Ok(())
    }
}

impl From<&InvestmentParams> for BaseParams {
    fn from(params: &InvestmentParams) -> Self {
        params.base()
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProjectionError::NonFinite { field, value })
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<()> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ProjectionError::NegativeAmount { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_params() -> InvestmentParams {
        InvestmentParams {
            initial: 1000.0,
            annual_rate: 0.05,
            years: 5,
            monthly_contribution: 100.0,
            annual_contribution: Some(500.0),
            inflation: 0.02,
            tax_rate: Some(0.1),
        }
    }

    #[test]
    fn test_valid_params_pass() {
        assert_eq!(sample_params().validate(), Ok(()));
        assert_eq!(sample_params().months(), 60);
    }

    #[test]
    fn test_zero_years_rejected() {
        let params = InvestmentParams { years: 0, ..sample_params() };
        assert_eq!(params.validate(), Err(ProjectionError::NonPositiveYears(0)));
    }

    #[test]
    fn test_overflowing_horizon_rejected() {
        let longest = u32::MAX / 12;
        assert!(InvestmentParams { years: longest, ..sample_params() }.validate().is_ok());

        let params = InvestmentParams { years: longest + 1, ..sample_params() };
        assert_eq!(params.validate(), Err(ProjectionError::HorizonTooLong(longest + 1)));
        assert_eq!(params.months(), u32::MAX);
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let params = InvestmentParams { initial: -1.0, ..sample_params() };
        assert!(matches!(
            params.validate(),
            Err(ProjectionError::NegativeAmount { field: "initial", .. })
        ));

        let params = InvestmentParams { monthly_contribution: -50.0, ..sample_params() };
        assert!(matches!(
            params.validate(),
            Err(ProjectionError::NegativeAmount { field: "monthlyContribution", .. })
        ));

        let params = InvestmentParams { annual_contribution: Some(-5.0), ..sample_params() };
        assert!(matches!(
            params.validate(),
            Err(ProjectionError::NegativeAmount { field: "annualContribution", .. })
        ));
    }

    #[test]
    fn test_rate_bounds() {
        // Negative rates are allowed down to (but excluding) total loss
        assert!(sample_params().with_rate(-0.5).validate().is_ok());
        assert_eq!(
            sample_params().with_rate(-1.0).validate(),
            Err(ProjectionError::RateBelowTotalLoss(-1.0))
        );
        assert!(matches!(
            sample_params().with_rate(f64::NAN).validate(),
            Err(ProjectionError::NonFinite { field: "annualRate", .. })
        ));
    }

    #[test]
    fn test_tax_rate_range() {
        let params = InvestmentParams { tax_rate: Some(1.5), ..sample_params() };
        assert_eq!(params.validate(), Err(ProjectionError::TaxRateOutOfRange(1.5)));

        let params = InvestmentParams { tax_rate: Some(1.0), ..sample_params() };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_base_round_trips_rate() {
        let params = sample_params();
        let base = params.base();
        assert_eq!(base.with_rate(params.annual_rate), params);
        assert_eq!(BaseParams::from(&params), base);
    }

    #[test]
    fn test_deserializes_camel_case_with_defaults() {
        let json = r#"{"initial": 5000, "annualRate": 0.07, "years": 5, "monthlyContribution": 200}"#;
        let params: InvestmentParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.years, 5);
        assert_eq!(params.monthly_contribution, 200.0);
        assert_eq!(params.inflation, 0.0);
        assert_eq!(params.annual_contribution, None);
        assert_eq!(params.tax_rate, None);
    }
}
