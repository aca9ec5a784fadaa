//! Simulation loop coupling supply, storage and load.

use tracing::{debug, info};

use crate::components::{Capacitor, EnergySupply, Load};
use crate::error::SimError;

use super::time_vector::TimeVector;
use super::types::TickSnapshot;

/// Simulation owning every component for the duration of a run.
///
/// Holds concrete component types: there is exactly one supply, one storage
/// element and one load.
pub struct Simulation {
    time: TimeVector,
    supply: EnergySupply,
    storage: Capacitor,
    load: Load,
}

impl Simulation {
    /// Creates a simulation over `time`.
    ///
    /// A supply profile shorter than `time` is accepted; the run then fails
    /// with [`SimError::IndexOutOfRange`] at the first step past its end.
    pub fn new(time: TimeVector, supply: EnergySupply, storage: Capacitor, load: Load) -> Self {
        Self {
            time,
            supply,
            storage,
            load,
        }
    }

    /// Executes one tick and returns its snapshot.
    ///
    /// Order is fixed: supply, storage, load. The storage sees the load's
    /// energy draw from the previous tick because the load has not been
    /// refreshed yet.
    ///
    /// # Errors
    ///
    /// Propagates supply and storage failures. No component after the failing
    /// one is touched and no snapshot is produced.
    pub fn step(&mut self, step: usize, t: f64) -> Result<TickSnapshot, SimError> {
        // 1. Supply voltage for this step
        self.supply.refresh(step)?;

        // 2. Storage, fed by the supply and last tick's load draw
        self.storage
            .refresh(t, self.supply.voltage, self.load.energy_consumed())?;
        let storage_status = self.storage.status()?;

        // 3. Load, fed by the storage
        self.load
            .refresh(self.storage.voltage(), self.storage.v_load_min());

        let snapshot = TickSnapshot {
            step,
            time: t,
            supply_voltage: self.supply.voltage,
            storage_voltage: self.storage.voltage(),
            storage_current: self.storage.current(),
            energy_stored: self.storage.energy_stored(),
            storage_status,
            load_voltage: self.load.voltage(),
            load_current: self.load.current(),
            energy_consumed: self.load.energy_consumed(),
            total_energy_consumed: self.load.total_energy_consumed(),
        };
        debug!(step, t, status = %storage_status, "tick");
        Ok(snapshot)
    }

    /// Advances to the next sample of the time vector.
    ///
    /// Returns `Ok(None)` once the time vector is exhausted.
    pub fn next_tick(&mut self) -> Result<Option<TickSnapshot>, SimError> {
        match self.time.tick() {
            Some((step, t)) => self.step(step, t).map(Some),
            None => Ok(None),
        }
    }

    /// Runs every remaining tick, handing each snapshot to `f` as it is made.
    ///
    /// # Errors
    ///
    /// Stops at the first failing tick and returns its error.
    pub fn run_with(&mut self, mut f: impl FnMut(&TickSnapshot)) -> Result<usize, SimError> {
        info!(
            ticks = self.time.len(),
            supply = self.supply.kind().as_str(),
            load = self.load.name(),
            "simulation started"
        );
        let mut count = 0;
        while let Some(snapshot) = self.next_tick()? {
            f(&snapshot);
            count += 1;
        }
        info!(
            ticks = count,
            total_energy_consumed = self.load.total_energy_consumed(),
            "simulation finished"
        );
        Ok(count)
    }

    /// Runs every remaining tick and collects the snapshots.
    pub fn run(&mut self) -> Result<Vec<TickSnapshot>, SimError> {
        let mut snapshots = Vec::with_capacity(self.time.len());
        self.run_with(|s| snapshots.push(s.clone()))?;
        Ok(snapshots)
    }

    /// Returns `true` once every sample of the time vector has been run.
    pub fn is_finished(&self) -> bool {
        self.time.is_finished()
    }

    pub fn time(&self) -> &TimeVector {
        &self.time
    }

    pub fn supply(&self) -> &EnergySupply {
        &self.supply
    }

    pub fn storage(&self) -> &Capacitor {
        &self.storage
    }

    pub fn load(&self) -> &Load {
        &self.load
    }
}
