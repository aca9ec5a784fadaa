//! Circuit components of the energy-harvesting model.

/// Threshold-gated loads (resistor, MCU).
pub mod load;
pub mod storage;
/// Energy supplies with precomputed voltage profiles.
pub mod supply;

pub use load::{Load, LoadModel, LoadState, LoadVariant, Mcu, Resistor};
pub use storage::{Capacitor, CapacitorParams, StorageModel, StorageState, StorageStatus};
pub use supply::{EnergySupply, SupplyKind};
