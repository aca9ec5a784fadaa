//! Post-hoc run summary computed from the snapshot vector.

use std::fmt;

use crate::components::StorageStatus;

use super::types::TickSnapshot;

/// Aggregate figures of a complete run.
///
/// Derived from `&[TickSnapshot]` after the fact so the figures always agree
/// with the recorded ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of ticks executed.
    pub ticks: usize,
    /// Storage voltage at the last tick (V).
    pub final_storage_voltage: f64,
    /// Stored energy at the last tick (J).
    pub final_energy_stored: f64,
    /// Highest storage voltage seen (V).
    pub peak_storage_voltage: f64,
    /// Ticks the storage spent charging.
    pub charging_ticks: usize,
    /// Ticks the storage spent discharging.
    pub discharging_ticks: usize,
    /// Ticks the storage spent saturated.
    pub full_ticks: usize,
    /// Ticks whose stored energy went negative (load draw above stored energy).
    pub negative_energy_ticks: usize,
    /// Ticks the load drew power.
    pub load_active_ticks: usize,
    /// Energy the load drew over the run (J).
    pub total_energy_consumed: f64,
}

impl RunSummary {
    /// Computes the summary of a run.
    pub fn from_snapshots(snapshots: &[TickSnapshot]) -> Self {
        let mut summary = Self {
            ticks: snapshots.len(),
            final_storage_voltage: 0.0,
            final_energy_stored: 0.0,
            peak_storage_voltage: 0.0,
            charging_ticks: 0,
            discharging_ticks: 0,
            full_ticks: 0,
            negative_energy_ticks: 0,
            load_active_ticks: 0,
            total_energy_consumed: 0.0,
        };

        for s in snapshots {
            summary.peak_storage_voltage = summary.peak_storage_voltage.max(s.storage_voltage);
            match s.storage_status {
                StorageStatus::Charging => summary.charging_ticks += 1,
                StorageStatus::Discharging => summary.discharging_ticks += 1,
                StorageStatus::Full => summary.full_ticks += 1,
            }
            if s.energy_stored < 0.0 {
                summary.negative_energy_ticks += 1;
            }
            if s.energy_consumed > 0.0 {
                summary.load_active_ticks += 1;
            }
        }

        if let Some(last) = snapshots.last() {
            summary.final_storage_voltage = last.storage_voltage;
            summary.final_energy_stored = last.energy_stored;
            summary.total_energy_consumed = last.total_energy_consumed;
        }

        summary
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ---")?;
        writeln!(f, "Ticks:                  {}", self.ticks)?;
        writeln!(f, "Final storage voltage:  {:.5} V", self.final_storage_voltage)?;
        writeln!(f, "Final energy stored:    {:.5} J", self.final_energy_stored)?;
        writeln!(f, "Peak storage voltage:   {:.5} V", self.peak_storage_voltage)?;
        writeln!(
            f,
            "Storage ticks:          charging={} discharging={} full={}",
            self.charging_ticks, self.discharging_ticks, self.full_ticks
        )?;
        writeln!(f, "Negative energy ticks:  {}", self.negative_energy_ticks)?;
        writeln!(f, "Load active ticks:      {}", self.load_active_ticks)?;
        write!(f, "Total energy consumed:  {:.5} J", self.total_energy_consumed)
    }
}
