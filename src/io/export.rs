//! CSV export of tick snapshots, one row per component per tick.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::TickSnapshot;

/// Column header of the tabular export.
pub const HEADER: [&str; 8] = [
    "step",
    "time",
    "component",
    "voltage",
    "current",
    "energy_stored",
    "energy_consumed",
    "total_energy_consumed",
];

/// Marker written in columns that do not apply to a component.
pub const NOT_APPLICABLE: &str = "NaN";

/// Component names used in the `component` column, in row order.
pub const COMPONENTS: [&str; 3] = ["supply", "storage", "load"];

/// Exports snapshots to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(snapshots: &[TickSnapshot], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(snapshots, buf)
}

/// Writes snapshots as CSV to any writer.
///
/// Each tick becomes three rows (`supply`, `storage`, `load`); columns a
/// component has no value for hold [`NOT_APPLICABLE`].
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(snapshots: &[TickSnapshot], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER)?;

    for s in snapshots {
        let step = s.step.to_string();
        let time = s.time.to_string();
        let na = || NOT_APPLICABLE.to_string();

        wtr.write_record(&[
            step.clone(),
            time.clone(),
            COMPONENTS[0].to_string(),
            s.supply_voltage.to_string(),
            na(),
            na(),
            na(),
            na(),
        ])?;
        wtr.write_record(&[
            step.clone(),
            time.clone(),
            COMPONENTS[1].to_string(),
            s.storage_voltage.to_string(),
            s.storage_current.to_string(),
            s.energy_stored.to_string(),
            na(),
            na(),
        ])?;
        wtr.write_record(&[
            step,
            time,
            COMPONENTS[2].to_string(),
            s.load_voltage.to_string(),
            s.load_current.to_string(),
            na(),
            s.energy_consumed.to_string(),
            s.total_energy_consumed.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
