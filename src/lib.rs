//! Battery-less energy-harvesting system (BEHS) simulator.
//!
//! An energy supply charges a capacitor through an RC network and the
//! capacitor powers a threshold-gated load. Each tick refreshes supply,
//! storage and load in that order and records a [`sim::types::TickSnapshot`].

pub mod components;
/// Scenario configuration (TOML) and presets.
pub mod config;
pub mod error;
/// Text log, CSV export and spreadsheet writers.
pub mod io;
pub mod logging;
/// Simulation loop, time vector and run summary.
pub mod sim;
#[cfg(feature = "tui")]
pub mod tui;

pub use error::SimError;
