//! Human-readable run log: one line per component per tick.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::sim::types::TickSnapshot;

use super::ComponentLabels;

const SEPARATOR_WIDTH: usize = 50;

/// Writes the log preamble.
pub fn write_header(mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "Simulation started")
}

/// Writes the block of one tick: time line, supply, storage and load lines,
/// then a separator.
pub fn write_tick(mut writer: impl Write, labels: &ComponentLabels, s: &TickSnapshot) -> io::Result<()> {
    writeln!(writer, "Time step {}: t={:.2}s\n", s.step, s.time)?;
    writeln!(
        writer,
        "Energy Supply: {} --> t={},voltage={:.5}V",
        labels.supply, s.step, s.supply_voltage
    )?;
    writeln!(
        writer,
        "Energy Storage: {} --> t={},voltage={:.5}V,current={:.5}A,energy_stored={:.5}J",
        labels.storage, s.step, s.storage_voltage, s.storage_current, s.energy_stored
    )?;
    writeln!(
        writer,
        "Load: {} --> t={},operating_voltage={:.5}V,voltage={:.5}V,current={:.5}A,\
         energy_consumed={:.5}J,total_energy_consumed={:.5}J",
        labels.load,
        s.step,
        labels.load_operating_voltage,
        s.load_voltage,
        s.load_current,
        s.energy_consumed,
        s.total_energy_consumed
    )?;
    writeln!(writer, "{}", "-".repeat(SEPARATOR_WIDTH))
}

/// Writes a complete log for `snapshots`.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_log(snapshots: &[TickSnapshot], labels: &ComponentLabels, mut writer: impl Write) -> io::Result<()> {
    write_header(&mut writer)?;
    for s in snapshots {
        write_tick(&mut writer, labels, s)?;
    }
    writer.flush()
}

/// Writes a complete log for `snapshots` to the file at `path`.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_log(snapshots: &[TickSnapshot], labels: &ComponentLabels, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_log(snapshots, labels, BufWriter::new(file))
}
