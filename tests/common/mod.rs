//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use behs_sim::components::{Capacitor, CapacitorParams, EnergySupply, Load, Mcu, Resistor};
use behs_sim::config::ScenarioConfig;
use behs_sim::sim::engine::Simulation;
use behs_sim::sim::time_vector::TimeVector;
use behs_sim::sim::types::TickSnapshot;

/// Default capacitor parameters (10 mF, 2.5 kΩ, 10 V max, 4 V load minimum).
pub fn default_params() -> CapacitorParams {
    CapacitorParams::default()
}

/// Time vector of `samples` one-second steps starting at zero.
pub fn seconds(samples: usize) -> TimeVector {
    TimeVector::new(0.0, (samples - 1) as f64, 1.0)
}

/// Constant 8 V supply charging an empty capacitor that feeds a resistor.
pub fn constant_resistor_sim(samples: usize) -> Simulation {
    Simulation::new(
        seconds(samples),
        EnergySupply::constant(samples, 8.0),
        Capacitor::new(default_params()),
        Load::resistor(Resistor::default()),
    )
}

/// Seeded harvesting supply feeding a microcontroller.
pub fn harvesting_mcu_sim(samples: usize, seed: u64) -> Simulation {
    Simulation::new(
        seconds(samples),
        EnergySupply::harvesting(samples, 10.0, seed),
        Capacitor::new(default_params()),
        Load::mcu(Mcu::default()),
    )
}

/// Runs a built-in preset to completion.
pub fn run_preset(name: &str) -> Vec<TickSnapshot> {
    let scenario = ScenarioConfig::from_preset(name).expect("preset should exist");
    assert!(scenario.validate().is_empty());
    scenario.build().run().expect("preset should run")
}
