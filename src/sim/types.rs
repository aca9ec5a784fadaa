//! Per-tick record emitted by the simulation loop.

use std::fmt;

use crate::components::StorageStatus;

/// Complete record of one simulation tick.
///
/// Built after supply, storage and load have all been refreshed for the tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSnapshot {
    /// Tick index.
    pub step: usize,
    /// Elapsed simulation time (s).
    pub time: f64,
    /// Supply voltage at this tick (V).
    pub supply_voltage: f64,
    /// Storage voltage after the refresh (V).
    pub storage_voltage: f64,
    /// Storage current after the refresh (A).
    pub storage_current: f64,
    /// Stored energy net of the load's previous-tick draw (J).
    pub energy_stored: f64,
    /// Regime the refreshed storage voltage falls in.
    pub storage_status: StorageStatus,
    /// Load voltage (V).
    pub load_voltage: f64,
    /// Load current (A).
    pub load_current: f64,
    /// Energy the load drew this tick (J).
    pub energy_consumed: f64,
    /// Energy the load has drawn since the start of the run (J).
    pub total_energy_consumed: f64,
}

impl fmt::Display for TickSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "i={:>4} ({:>7.2}s) | supply={:>6.3} V | storage={:>6.3} V {:>8.5} A \
             {:>8.5} J ({}) | load={:>6.3} V {:>8.5} A {:.5} J (total={:.5} J)",
            self.step,
            self.time,
            self.supply_voltage,
            self.storage_voltage,
            self.storage_current,
            self.energy_stored,
            self.storage_status,
            self.load_voltage,
            self.load_current,
            self.energy_consumed,
            self.total_energy_consumed,
        )
    }
}
