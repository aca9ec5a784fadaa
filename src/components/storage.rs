//! Capacitor energy storage modeled as an RC network.

use std::fmt;

use tracing::{debug, warn};

use crate::error::{SimError, ensure_non_negative};

/// Operating regime of the storage element, derived from its voltage.
///
/// Never stored: it is recomputed from the voltage whenever asked for, so it
/// cannot drift from the value it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageStatus {
    /// `voltage <= v_load_min`: the supply charges the capacitor.
    Charging,
    /// `v_load_min < voltage < v_storage_max`: the capacitor feeds the load.
    Discharging,
    /// `voltage >= v_storage_max`: saturated.
    Full,
}

impl StorageStatus {
    /// Classifies `voltage` against the two thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidState`] when no regime matches, which only
    /// happens for a NaN voltage.
    pub fn classify(voltage: f64, params: &CapacitorParams) -> Result<Self, SimError> {
        if voltage >= params.v_storage_max {
            Ok(Self::Full)
        } else if voltage <= params.v_load_min {
            Ok(Self::Charging)
        } else if voltage > params.v_load_min {
            Ok(Self::Discharging)
        } else {
            Err(SimError::InvalidState { voltage })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Charging => "charging",
            Self::Discharging => "discharging",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for StorageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical parameters of the RC storage network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacitorParams {
    /// Capacitance (F).
    pub capacitance: f64,
    /// Series resistance (Ω).
    pub resistance: f64,
    /// Saturation voltage (V).
    pub v_storage_max: f64,
    /// Minimum voltage before the storage starts feeding the load (V).
    pub v_load_min: f64,
}

impl CapacitorParams {
    /// RC time constant `τ = R·C` (s).
    pub fn time_constant(&self) -> f64 {
        self.resistance * self.capacitance
    }
}

impl Default for CapacitorParams {
    fn default() -> Self {
        Self {
            capacitance: 0.01,
            resistance: 2500.0,
            v_storage_max: 10.0,
            v_load_min: 4.0,
        }
    }
}

/// Electrical state of the storage element after a refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StorageState {
    /// Voltage across the capacitor (V).
    pub voltage: f64,
    /// Current through the capacitor (A).
    pub current: f64,
    /// Stored energy net of the load's previous draw (J). May go negative.
    pub energy_stored: f64,
}

/// Inputs of one storage refresh.
#[derive(Debug, Clone, Copy)]
pub struct StorageInput {
    /// Elapsed simulation time (s).
    pub t: f64,
    /// Supply voltage at this tick (V).
    pub v_supply: f64,
    /// Energy the load drew on the previous tick (J).
    pub load_energy_consumed: f64,
}

/// Calculators every storage model exposes.
///
/// [`refresh`] composes them in the required order; implementors only supply
/// the physics.
pub trait StorageModel {
    /// Voltage for this tick, branching on the voltage held before the tick.
    fn calculate_voltage(&self, t: f64, v_supply: f64) -> Result<f64, SimError>;

    /// Current for this tick, given the voltage just computed.
    fn calculate_current(&self, voltage: f64, t: f64, v_supply: f64) -> f64;

    /// Stored energy for this tick, given the voltage just computed.
    fn calculate_energy_stored(&self, voltage: f64, load_energy_consumed: f64) -> f64;
}

/// Computes the next storage state: voltage, then current, then energy.
///
/// Current and energy read the voltage computed in the same call, so the
/// regime they use is the one the new voltage falls in.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] for negative or non-finite inputs and
/// propagates [`SimError::InvalidState`] from the voltage calculation.
pub fn refresh<S: StorageModel>(model: &S, input: StorageInput) -> Result<StorageState, SimError> {
    let t = ensure_non_negative("t", input.t)?;
    let v_supply = ensure_non_negative("v_supply", input.v_supply)?;
    let load_energy = ensure_non_negative("load_energy_consumed", input.load_energy_consumed)?;

    let voltage = model.calculate_voltage(t, v_supply)?;
    let current = model.calculate_current(voltage, t, v_supply);
    let energy_stored = model.calculate_energy_stored(voltage, load_energy);

    Ok(StorageState {
        voltage,
        current,
        energy_stored,
    })
}

/// A capacitor charged through a resistor.
///
/// The RC equations are evaluated against the elapsed simulation time rather
/// than integrated tick by tick.
#[derive(Debug, Clone)]
pub struct Capacitor {
    params: CapacitorParams,
    state: StorageState,
}

impl Capacitor {
    /// Creates an empty capacitor.
    ///
    /// # Panics
    ///
    /// Panics if capacitance or resistance is not strictly positive, or if
    /// `v_load_min` is not within `[0, v_storage_max)`.
    pub fn new(params: CapacitorParams) -> Self {
        Self::with_voltage(params, 0.0)
    }

    /// Creates a capacitor pre-charged to `voltage`.
    ///
    /// # Panics
    ///
    /// Panics on invalid parameters (see [`Capacitor::new`]) or if `voltage`
    /// is outside `[0, v_storage_max]`.
    pub fn with_voltage(params: CapacitorParams, voltage: f64) -> Self {
        assert!(params.capacitance > 0.0);
        assert!(params.resistance > 0.0);
        assert!(params.v_load_min >= 0.0 && params.v_load_min < params.v_storage_max);
        assert!((0.0..=params.v_storage_max).contains(&voltage));

        Self {
            params,
            state: StorageState {
                voltage,
                current: 0.0,
                energy_stored: 0.0,
            },
        }
    }

    /// Charging curve `Vs·(1 − e^(−t/τ))`.
    pub fn charging_voltage(&self, t: f64, v_supply: f64) -> f64 {
        v_supply * (1.0 - self.decay(t))
    }

    /// Decay curve `V·e^(−t/τ)`.
    pub fn discharging_voltage(&self, t: f64, voltage: f64) -> f64 {
        voltage * self.decay(t)
    }

    fn decay(&self, t: f64) -> f64 {
        (-t / self.params.time_constant()).exp()
    }

    /// Status derived from the current voltage.
    pub fn status(&self) -> Result<StorageStatus, SimError> {
        StorageStatus::classify(self.state.voltage, &self.params)
    }

    /// Refreshes voltage, current and stored energy for one tick.
    ///
    /// `load_energy_consumed` is the load's draw from the previous tick.
    ///
    /// # Errors
    ///
    /// See [`refresh`]. The state is unchanged when an error is returned.
    pub fn refresh(
        &mut self,
        t: f64,
        v_supply: f64,
        load_energy_consumed: f64,
    ) -> Result<(), SimError> {
        let next = refresh(
            self,
            StorageInput {
                t,
                v_supply,
                load_energy_consumed,
            },
        )?;
        if next.energy_stored < 0.0 {
            debug!(
                energy_stored = next.energy_stored,
                load_energy_consumed, "load draw exceeds stored energy"
            );
        }
        self.state = next;
        Ok(())
    }

    pub fn params(&self) -> &CapacitorParams {
        &self.params
    }

    pub fn state(&self) -> &StorageState {
        &self.state
    }

    pub fn voltage(&self) -> f64 {
        self.state.voltage
    }

    pub fn current(&self) -> f64 {
        self.state.current
    }

    pub fn energy_stored(&self) -> f64 {
        self.state.energy_stored
    }

    /// Minimum storage voltage before the load may draw (V).
    pub fn v_load_min(&self) -> f64 {
        self.params.v_load_min
    }

    fn saturate(&self) -> f64 {
        warn!(
            v_storage_max = self.params.v_storage_max,
            "energy storage is at maximum capacity"
        );
        self.params.v_storage_max
    }
}

impl StorageModel for Capacitor {
    fn calculate_voltage(&self, t: f64, v_supply: f64) -> Result<f64, SimError> {
        let v = self.state.voltage;
        let next = match self.status()? {
            StorageStatus::Charging => self.charging_voltage(t, v_supply),
            StorageStatus::Discharging => v - self.discharging_voltage(t, v),
            StorageStatus::Full => return Ok(self.saturate()),
        };

        if next >= self.params.v_storage_max {
            Ok(self.saturate())
        } else {
            Ok(next.max(0.0))
        }
    }

    fn calculate_current(&self, voltage: f64, t: f64, v_supply: f64) -> f64 {
        let driving = if voltage <= self.params.v_load_min {
            v_supply
        } else {
            voltage
        };
        driving / self.params.resistance * self.decay(t)
    }

    fn calculate_energy_stored(&self, voltage: f64, load_energy_consumed: f64) -> f64 {
        let energy = 0.5 * self.params.capacitance * voltage * voltage;
        if voltage <= self.params.v_load_min {
            energy
        } else {
            energy - load_energy_consumed
        }
    }
}
