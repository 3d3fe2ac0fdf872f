//! CSV export of projection results

use std::io;
use std::path::Path;

use csv::Writer;
use serde::Serialize;

use crate::error::ExportError;
use crate::projection::{SimulationResult, MONTHS_PER_YEAR};

/// One CSV row per simulated month
#[derive(Debug, Clone, Serialize)]
struct MonthRecord {
    month: u32,
    year: u32,
    value: f64,
}

/// Write the monthly history as `month,year,value` rows
pub fn write_history<W: io::Write>(writer: W, result: &SimulationResult) -> Result<(), ExportError> {
    let mut csv = Writer::from_writer(writer);

    for (idx, &value) in result.history.iter().enumerate() {
        let month = idx as u32 + 1;
        csv.serialize(MonthRecord {
            month,
            year: (month - 1) / MONTHS_PER_YEAR + 1,
            value,
        })?;
    }

    csv.flush()?;
    Ok(())
}

/// Write one row per yearly snapshot
pub fn write_yearly<W: io::Write>(writer: W, result: &SimulationResult) -> Result<(), ExportError> {
    let mut csv = Writer::from_writer(writer);
    for snapshot in &result.yearly_snapshots {
        csv.serialize(snapshot)?;
    }
    csv.flush()?;
    Ok(())
}

/// Export the monthly history to a CSV file
pub fn export_history<P: AsRef<Path>>(path: P, result: &SimulationResult) -> Result<(), ExportError> {
    let file = std::fs::File::create(path.as_ref())?;
    write_history(file, result)?;
    log::info!("Wrote {} monthly rows to {}", result.history.len(), path.as_ref().display());
    Ok(())
}

/// Export the yearly snapshots to a CSV file
pub fn export_yearly<P: AsRef<Path>>(path: P, result: &SimulationResult) -> Result<(), ExportError> {
    let file = std::fs::File::create(path.as_ref())?;
    write_yearly(file, result)?;
    log::info!(
        "Wrote {} yearly rows to {}",
        result.yearly_snapshots.len(),
        path.as_ref().display()
    );
    Ok(())
}
