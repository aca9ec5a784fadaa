//! Threshold-gated loads drawing from the storage element.

/// Returns `true` when a load with `operating_voltage` may draw power.
///
/// Both the load's own minimum and the storage's `v_load_min` must be met.
pub fn is_active(operating_voltage: f64, v_supply: f64, v_load_min: f64) -> bool {
    v_supply >= operating_voltage && v_supply >= v_load_min
}

/// Calculators every load model exposes.
///
/// `v_supply` is the voltage offered by the storage element and `v_load_min`
/// the storage's minimum supply threshold. Inactive loads return zero from
/// all three.
pub trait LoadModel {
    /// Lower-case variant name used in logs and exports.
    fn name(&self) -> &'static str;

    /// Minimum voltage the load needs to operate (V).
    fn operating_voltage(&self) -> f64;

    fn calculate_voltage(&self, v_supply: f64, v_load_min: f64) -> f64;

    fn calculate_current(&self, v_supply: f64, v_load_min: f64) -> f64;

    /// Energy drawn during this tick (J).
    fn calculate_energy_consumed(&self, v_supply: f64, v_load_min: f64) -> f64;
}

/// A resistive load following Ohm's law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistor {
    pub operating_voltage: f64,
    /// Resistance (Ω).
    pub resistance: f64,
    /// Energy drawn per active tick (J).
    pub energy_per_tick: f64,
}

impl Default for Resistor {
    fn default() -> Self {
        Self {
            operating_voltage: 1.0,
            resistance: 1000.0,
            energy_per_tick: 0.001,
        }
    }
}

impl LoadModel for Resistor {
    fn name(&self) -> &'static str {
        "resistor"
    }

    fn operating_voltage(&self) -> f64 {
        self.operating_voltage
    }

    fn calculate_voltage(&self, v_supply: f64, v_load_min: f64) -> f64 {
        if is_active(self.operating_voltage, v_supply, v_load_min) {
            v_supply
        } else {
            0.0
        }
    }

    fn calculate_current(&self, v_supply: f64, v_load_min: f64) -> f64 {
        if is_active(self.operating_voltage, v_supply, v_load_min) {
            v_supply / self.resistance
        } else {
            0.0
        }
    }

    fn calculate_energy_consumed(&self, v_supply: f64, v_load_min: f64) -> f64 {
        if is_active(self.operating_voltage, v_supply, v_load_min) {
            self.energy_per_tick
        } else {
            0.0
        }
    }
}

/// A microcontroller drawing a fixed current at its operating voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mcu {
    pub operating_voltage: f64,
    /// Current drawn while active (A).
    pub operating_current: f64,
    /// Energy drawn per active tick (J).
    pub energy_per_tick: f64,
}

impl Default for Mcu {
    fn default() -> Self {
        Self {
            operating_voltage: 3.3,
            operating_current: 0.002,
            energy_per_tick: 0.02,
        }
    }
}

impl LoadModel for Mcu {
    fn name(&self) -> &'static str {
        "mcu"
    }

    fn operating_voltage(&self) -> f64 {
        self.operating_voltage
    }

    fn calculate_voltage(&self, v_supply: f64, v_load_min: f64) -> f64 {
        if is_active(self.operating_voltage, v_supply, v_load_min) {
            self.operating_voltage
        } else {
            0.0
        }
    }

    fn calculate_current(&self, v_supply: f64, v_load_min: f64) -> f64 {
        if is_active(self.operating_voltage, v_supply, v_load_min) {
            self.operating_current
        } else {
            0.0
        }
    }

    fn calculate_energy_consumed(&self, v_supply: f64, v_load_min: f64) -> f64 {
        if is_active(self.operating_voltage, v_supply, v_load_min) {
            self.energy_per_tick
        } else {
            0.0
        }
    }
}

/// The closed set of load models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadVariant {
    Resistor(Resistor),
    Mcu(Mcu),
}

impl LoadModel for LoadVariant {
    fn name(&self) -> &'static str {
        match self {
            Self::Resistor(r) => r.name(),
            Self::Mcu(m) => m.name(),
        }
    }

    fn operating_voltage(&self) -> f64 {
        match self {
            Self::Resistor(r) => r.operating_voltage(),
            Self::Mcu(m) => m.operating_voltage(),
        }
    }

    fn calculate_voltage(&self, v_supply: f64, v_load_min: f64) -> f64 {
        match self {
            Self::Resistor(r) => r.calculate_voltage(v_supply, v_load_min),
            Self::Mcu(m) => m.calculate_voltage(v_supply, v_load_min),
        }
    }

    fn calculate_current(&self, v_supply: f64, v_load_min: f64) -> f64 {
        match self {
            Self::Resistor(r) => r.calculate_current(v_supply, v_load_min),
            Self::Mcu(m) => m.calculate_current(v_supply, v_load_min),
        }
    }

    fn calculate_energy_consumed(&self, v_supply: f64, v_load_min: f64) -> f64 {
        match self {
            Self::Resistor(r) => r.calculate_energy_consumed(v_supply, v_load_min),
            Self::Mcu(m) => m.calculate_energy_consumed(v_supply, v_load_min),
        }
    }
}

/// Electrical state of a load after a refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadState {
    pub voltage: f64,
    pub current: f64,
    /// Energy drawn during the last tick (J).
    pub energy_consumed: f64,
    /// Energy drawn since the start of the run (J). Never decreases.
    pub total_energy_consumed: f64,
}

/// Computes the next load state from `prev`: voltage, current, energy, then
/// the running total.
pub fn refresh<M: LoadModel>(model: &M, prev: &LoadState, v_supply: f64, v_load_min: f64) -> LoadState {
    let voltage = model.calculate_voltage(v_supply, v_load_min);
    let current = model.calculate_current(v_supply, v_load_min);
    let energy_consumed = model.calculate_energy_consumed(v_supply, v_load_min);

    LoadState {
        voltage,
        current,
        energy_consumed,
        total_energy_consumed: prev.total_energy_consumed + energy_consumed,
    }
}

/// A load model together with its running state.
#[derive(Debug, Clone)]
pub struct Load {
    model: LoadVariant,
    state: LoadState,
}

impl Load {
    /// Creates an idle load.
    ///
    /// # Panics
    ///
    /// Panics if any electrical parameter of the model is negative, or a
    /// resistor's resistance is not strictly positive.
    pub fn new(model: LoadVariant) -> Self {
        match &model {
            LoadVariant::Resistor(r) => {
                assert!(r.operating_voltage >= 0.0);
                assert!(r.resistance > 0.0);
                assert!(r.energy_per_tick >= 0.0);
            }
            LoadVariant::Mcu(m) => {
                assert!(m.operating_voltage >= 0.0);
                assert!(m.operating_current >= 0.0);
                assert!(m.energy_per_tick >= 0.0);
            }
        }
        Self {
            model,
            state: LoadState::default(),
        }
    }

    pub fn resistor(resistor: Resistor) -> Self {
        Self::new(LoadVariant::Resistor(resistor))
    }

    pub fn mcu(mcu: Mcu) -> Self {
        Self::new(LoadVariant::Mcu(mcu))
    }

    /// Recomputes the load for the storage voltage `v_supply`.
    pub fn refresh(&mut self, v_supply: f64, v_load_min: f64) {
        self.state = refresh(&self.model, &self.state, v_supply, v_load_min);
    }

    pub fn model(&self) -> &LoadVariant {
        &self.model
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn name(&self) -> &'static str {
        self.model.name()
    }

    pub fn operating_voltage(&self) -> f64 {
        self.model.operating_voltage()
    }

    pub fn voltage(&self) -> f64 {
        self.state.voltage
    }

    pub fn current(&self) -> f64 {
        self.state.current
    }

    pub fn energy_consumed(&self) -> f64 {
        self.state.energy_consumed
    }

    pub fn total_energy_consumed(&self) -> f64 {
        self.state.total_energy_consumed
    }
}
