//! Load investment parameters from JSON and rate lists from CSV

use super::InvestmentParams;
use csv::Reader;
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Raw CSV row for a rate list
#[derive(Debug, serde::Deserialize)]
struct RateRow {
    #[serde(rename = "rate")]
    rate: f64,
}

/// Load projection parameters from a JSON file
///
/// Missing fields fall back to their defaults. Values are not validated here so
/// callers can layer overrides first; the growth engine validates on construction.
pub fn load_params<P: AsRef<Path>>(path: P) -> Result<InvestmentParams, Box<dyn Error>> {
    let file = File::open(path.as_ref())?;
    load_params_from_reader(file)
}

/// Load projection parameters from any JSON reader
pub fn load_params_from_reader<R: std::io::Read>(reader: R) -> Result<InvestmentParams, Box<dyn Error>> {
    let params: InvestmentParams = serde_json::from_reader(reader)?;
    log::debug!("Loaded parameters: {:?}", params);
    Ok(params)
}

/// Load a rate list from a CSV file with a `rate` column
///
/// Row order and duplicates are preserved.
pub fn load_rates<P: AsRef<Path>>(path: P) -> Result<Vec<f64>, Box<dyn Error>> {
    let file = File::open(path.as_ref())?;
    load_rates_from_reader(file)
}

/// Load a rate list from any CSV reader
pub fn load_rates_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<f64>, Box<dyn Error>> {
    let mut reader = Reader::from_reader(reader);
    let mut rates = Vec::new();

    for record in reader.deserialize() {
        let row: RateRow = record?;
        if !row.rate.is_finite() {
            return Err(format!("Non-finite rate in rate list: {}", row.rate).into());
        }
        rates.push(row.rate);
    }

    Ok(rates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_params_from_reader() {
        let json = r#"{
            "initial": 1000,
            "annualRate": 0.1,
            "years": 1,
            "monthlyContribution": 0,
            "inflation": 0,
            "taxRate": 0.1
        }"#;

        let params = load_params_from_reader(json.as_bytes()).unwrap();
        assert_eq!(params.initial, 1000.0);
        assert_eq!(params.tax_rate, Some(0.1));
    }

    #[test]
    fn test_load_params_defaults_missing_fields() {
        let json = r#"{"initial": 1000}"#;
        let params = load_params_from_reader(json.as_bytes()).unwrap();
        assert_eq!(params.years, 0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_load_params_rejects_malformed_json() {
        assert!(load_params_from_reader("{\"initial\": ".as_bytes()).is_err());
        assert!(load_params_from_reader(r#"{"years": -3}"#.as_bytes()).is_err());
    }

    #[test]
    fn test_load_rates_preserves_order_and_duplicates() {
        let csv = "rate\n0.07\n0.03\n0.07\n";
        let rates = load_rates_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(rates, vec![0.07, 0.03, 0.07]);
    }

    #[test]
    fn test_load_rates_rejects_garbage() {
        let csv = "rate\nabc\n";
        assert!(load_rates_from_reader(csv.as_bytes()).is_err());
    }
}
