//! Writers consuming tick snapshots: text log, CSV export, spreadsheet sheet.

pub mod export;
pub mod log;
pub mod sheet;

use crate::sim::engine::Simulation;

/// Component names and static attributes the writers print next to each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentLabels {
    /// Supply variant (`constant` / `harvesting`).
    pub supply: &'static str,
    /// Storage variant.
    pub storage: &'static str,
    /// Load variant (`resistor` / `mcu`).
    pub load: &'static str,
    /// Operating voltage of the load (V).
    pub load_operating_voltage: f64,
}

impl ComponentLabels {
    /// Labels describing the components of `sim`.
    pub fn of(sim: &Simulation) -> Self {
        Self {
            supply: sim.supply().kind().as_str(),
            storage: "capacitor",
            load: sim.load().name(),
            load_operating_voltage: sim.load().operating_voltage(),
        }
    }
}
