//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::components::supply::{DEFAULT_CONSTANT_VOLTAGE, MAX_SUPPLY_VOLTAGE};
use crate::components::{Capacitor, CapacitorParams, EnergySupply, Load, Mcu, Resistor};
use crate::sim::engine::Simulation;
use crate::sim::time_vector::TimeVector;

/// Largest number of ticks a scenario may run.
pub const MAX_TICKS: usize = 1_000_000;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Time vector bounds.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Energy supply parameters.
    #[serde(default)]
    pub supply: SupplyConfig,
    /// Capacitor parameters.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Load selection and per-variant parameters.
    #[serde(default)]
    pub load: LoadConfig,
}

/// Time vector bounds, in seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// First sample (s).
    pub start: f64,
    /// Last sample (s, inclusive).
    pub end: f64,
    /// Sample spacing (s, must be > 0).
    pub interval: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 60.0,
            interval: 0.25,
        }
    }
}

/// Energy supply parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SupplyConfig {
    /// Supply variant: `"constant"` or `"harvesting"`.
    pub kind: String,
    /// Level of the constant supply (V).
    pub constant_voltage: f64,
    /// Upper bound of any supply sample (V).
    pub max_voltage: f64,
    /// Seed of the harvesting profile.
    pub seed: u64,
}

impl Default for SupplyConfig {
    fn default() -> Self {
        Self {
            kind: "constant".to_string(),
            constant_voltage: DEFAULT_CONSTANT_VOLTAGE,
            max_voltage: MAX_SUPPLY_VOLTAGE,
            seed: 42,
        }
    }
}

/// Capacitor parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Capacitance (F).
    pub capacitance: f64,
    /// Series resistance (Ω).
    pub resistance: f64,
    /// Saturation voltage (V).
    pub v_storage_max: f64,
    /// Minimum storage voltage before the load may draw (V).
    pub v_load_min: f64,
    /// Voltage at the start of the run (V).
    pub initial_voltage: f64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let p = CapacitorParams::default();
        Self {
            capacitance: p.capacitance,
            resistance: p.resistance,
            v_storage_max: p.v_storage_max,
            v_load_min: p.v_load_min,
            initial_voltage: 0.0,
        }
    }
}

impl StorageConfig {
    pub fn params(&self) -> CapacitorParams {
        CapacitorParams {
            capacitance: self.capacitance,
            resistance: self.resistance,
            v_storage_max: self.v_storage_max,
            v_load_min: self.v_load_min,
        }
    }
}

/// Load selection and per-variant parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// Load variant: `"resistor"` or `"mcu"`.
    pub kind: String,
    pub resistor: ResistorConfig,
    pub mcu: McuConfig,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            kind: "resistor".to_string(),
            resistor: ResistorConfig::default(),
            mcu: McuConfig::default(),
        }
    }
}

/// Resistive load parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResistorConfig {
    /// Minimum operating voltage (V).
    pub operating_voltage: f64,
    /// Resistance (Ω).
    pub resistance: f64,
    /// Energy drawn per active tick (J).
    pub energy_per_tick: f64,
}

impl Default for ResistorConfig {
    fn default() -> Self {
        let r = Resistor::default();
        Self {
            operating_voltage: r.operating_voltage,
            resistance: r.resistance,
            energy_per_tick: r.energy_per_tick,
        }
    }
}

/// Microcontroller load parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct McuConfig {
    /// Operating voltage (V).
    pub operating_voltage: f64,
    /// Operating current (A).
    pub operating_current: f64,
    /// Energy drawn per active tick (J).
    pub energy_per_tick: f64,
}

impl Default for McuConfig {
    fn default() -> Self {
        let m = Mcu::default();
        Self {
            operating_voltage: m.operating_voltage,
            operating_current: m.operating_current,
            energy_per_tick: m.energy_per_tick,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, thiserror::Error)]
#[error("config error: {field} — {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"storage.v_load_min"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: constant 8 V supply feeding a resistor.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the MCU preset: constant supply feeding a microcontroller.
    pub fn mcu() -> Self {
        Self {
            load: LoadConfig {
                kind: "mcu".to_string(),
                ..LoadConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the harvesting preset: random supply feeding a microcontroller.
    pub fn harvesting() -> Self {
        Self {
            simulation: SimulationConfig {
                end: 120.0,
                ..SimulationConfig::default()
            },
            supply: SupplyConfig {
                kind: "harvesting".to_string(),
                ..SupplyConfig::default()
            },
            storage: StorageConfig::default(),
            load: LoadConfig {
                kind: "mcu".to_string(),
                ..LoadConfig::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "mcu", "harvesting"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "mcu" => Ok(Self::mcu()),
            "harvesting" => Ok(Self::harvesting()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. A valid scenario
    /// never panics in [`ScenarioConfig::build`].
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut require = |ok: bool, field: &str, message: &str| {
            if !ok {
                errors.push(ConfigError::new(field, message));
            }
        };

        for (field, value) in self.float_fields() {
            require(value.is_finite(), field, "must be finite");
        }

        let s = &self.simulation;
        require(s.start >= 0.0, "simulation.start", "must be >= 0");
        require(s.interval > 0.0, "simulation.interval", "must be > 0");
        require(s.end >= s.start, "simulation.end", "must be >= simulation.start");
        require(
            TimeVector::sample_count(s.start, s.end, s.interval).is_some_and(|n| n <= MAX_TICKS),
            "simulation",
            &format!("must span between 1 and {MAX_TICKS} samples"),
        );

        let sup = &self.supply;
        require(
            sup.kind == "constant" || sup.kind == "harvesting",
            "supply.kind",
            "must be \"constant\" or \"harvesting\"",
        );
        require(
            (0.0..=MAX_SUPPLY_VOLTAGE).contains(&sup.max_voltage),
            "supply.max_voltage",
            &format!("must be in [0, {MAX_SUPPLY_VOLTAGE}]"),
        );
        require(
            (0.0..=sup.max_voltage).contains(&sup.constant_voltage),
            "supply.constant_voltage",
            "must be in [0, supply.max_voltage]",
        );

        let st = &self.storage;
        require(st.capacitance > 0.0, "storage.capacitance", "must be > 0");
        require(st.resistance > 0.0, "storage.resistance", "must be > 0");
        require(
            st.v_load_min >= 0.0 && st.v_load_min < st.v_storage_max,
            "storage.v_load_min",
            "must be in [0, storage.v_storage_max)",
        );
        require(
            (0.0..=st.v_storage_max).contains(&st.initial_voltage),
            "storage.initial_voltage",
            "must be in [0, storage.v_storage_max]",
        );

        let l = &self.load;
        require(
            l.kind == "resistor" || l.kind == "mcu",
            "load.kind",
            "must be \"resistor\" or \"mcu\"",
        );
        require(
            l.resistor.operating_voltage >= 0.0,
            "load.resistor.operating_voltage",
            "must be >= 0",
        );
        require(l.resistor.resistance > 0.0, "load.resistor.resistance", "must be > 0");
        require(
            l.resistor.energy_per_tick >= 0.0,
            "load.resistor.energy_per_tick",
            "must be >= 0",
        );
        require(l.mcu.operating_voltage >= 0.0, "load.mcu.operating_voltage", "must be >= 0");
        require(l.mcu.operating_current >= 0.0, "load.mcu.operating_current", "must be >= 0");
        require(l.mcu.energy_per_tick >= 0.0, "load.mcu.energy_per_tick", "must be >= 0");

        errors
    }

    /// Every floating-point field with its dotted path.
    fn float_fields(&self) -> [(&'static str, f64); 16] {
        let (s, sup, st, l) = (&self.simulation, &self.supply, &self.storage, &self.load);
        [
            ("simulation.start", s.start),
            ("simulation.end", s.end),
            ("simulation.interval", s.interval),
            ("supply.constant_voltage", sup.constant_voltage),
            ("supply.max_voltage", sup.max_voltage),
            ("storage.capacitance", st.capacitance),
            ("storage.resistance", st.resistance),
            ("storage.v_storage_max", st.v_storage_max),
            ("storage.v_load_min", st.v_load_min),
            ("storage.initial_voltage", st.initial_voltage),
            ("load.resistor.operating_voltage", l.resistor.operating_voltage),
            ("load.resistor.resistance", l.resistor.resistance),
            ("load.resistor.energy_per_tick", l.resistor.energy_per_tick),
            ("load.mcu.operating_voltage", l.mcu.operating_voltage),
            ("load.mcu.operating_current", l.mcu.operating_current),
            ("load.mcu.energy_per_tick", l.mcu.energy_per_tick),
        ]
    }

    /// Builds a ready-to-run simulation.
    ///
    /// # Panics
    ///
    /// Panics if the configuration does not pass [`ScenarioConfig::validate`].
    pub fn build(&self) -> Simulation {
        let s = &self.simulation;
        let time = TimeVector::new(s.start, s.end, s.interval);

        let sup = &self.supply;
        let supply = if sup.kind == "harvesting" {
            EnergySupply::harvesting(time.len(), sup.max_voltage, sup.seed)
        } else {
            EnergySupply::constant(time.len(), sup.constant_voltage)
        };

        let storage = Capacitor::with_voltage(self.storage.params(), self.storage.initial_voltage);

        let l = &self.load;
        let load = if l.kind == "mcu" {
            Load::mcu(Mcu {
                operating_voltage: l.mcu.operating_voltage,
                operating_current: l.mcu.operating_current,
                energy_per_tick: l.mcu.energy_per_tick,
            })
        } else {
            Load::resistor(Resistor {
                operating_voltage: l.resistor.operating_voltage,
                resistance: l.resistor.resistance,
                energy_per_tick: l.resistor.energy_per_tick,
            })
        };

        Simulation::new(time, supply, storage, load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
start = 0.0
end = 6.0
interval = 0.25

[supply]
kind = "harvesting"
max_voltage = 5.5
seed = 7

[storage]
capacitance = 0.02
resistance = 1000.0
v_storage_max = 5.0
v_load_min = 3.3
initial_voltage = 1.0

[load]
kind = "mcu"

[load.mcu]
operating_voltage = 3.0
operating_current = 0.001
energy_per_tick = 0.01
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| &*c.supply.kind), Some("harvesting"));
        assert_eq!(cfg.as_ref().map(|c| c.storage.v_load_min), Some(3.3));
        assert_eq!(cfg.as_ref().map(|c| c.load.mcu.operating_voltage), Some(3.0));
        assert_eq!(
            cfg.as_ref().map(|c| c.validate().len()),
            Some(0),
            "parsed scenario should validate"
        );
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[storage]
capacitance = 0.01
inductance = 1.0
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[supply]
seed = 99
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.supply.seed), Some(99));
        assert_eq!(cfg.as_ref().map(|c| c.supply.constant_voltage), Some(8.0));
        assert_eq!(cfg.as_ref().map(|c| c.storage.resistance), Some(2500.0));
        assert_eq!(cfg.as_ref().map(|c| c.load.resistor.resistance), Some(1000.0));
    }

    #[test]
    fn validation_catches_inverted_thresholds() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.storage.v_load_min = 11.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "storage.v_load_min"));
    }

    #[test]
    fn validation_catches_bad_kinds() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.supply.kind = "solar".to_string();
        cfg.load.kind = "motor".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "supply.kind"));
        assert!(errors.iter().any(|e| e.field == "load.kind"));
    }

    #[test]
    fn validation_catches_zero_interval() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.interval = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.interval"));
    }

    #[test]
    fn infinite_end_is_rejected_before_build() {
        let cfg = ScenarioConfig::from_toml_str("[simulation]\nend = inf\n");
        let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
        assert!(errors.iter().any(|e| e.field == "simulation.end"));
        assert!(errors.iter().any(|e| e.field == "simulation"));
    }

    #[test]
    fn infinite_harvesting_ceiling_is_rejected() {
        let toml = "[supply]\nkind = \"harvesting\"\nmax_voltage = inf\n";
        let cfg = ScenarioConfig::from_toml_str(toml);
        let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
        assert!(errors.iter().any(|e| e.field == "supply.max_voltage"));
    }

    #[test]
    fn nan_fields_are_rejected() {
        let mut cfg = ScenarioConfig::mcu();
        cfg.storage.capacitance = f64::NAN;
        cfg.load.mcu.energy_per_tick = f64::INFINITY;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "storage.capacitance" && e.message == "must be finite")
        );
        assert!(errors.iter().any(|e| e.field == "load.mcu.energy_per_tick"));
    }

    #[test]
    fn oversized_run_is_rejected() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.end = 1e12;
        cfg.simulation.interval = 1e-3;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation"));

        cfg.simulation.end = (MAX_TICKS - 1) as f64;
        cfg.simulation.interval = 1.0;
        assert!(cfg.validate().is_empty());
        assert_eq!(cfg.build().time().len(), MAX_TICKS);
    }

    #[test]
    fn supply_ceiling_above_hardware_limit_is_rejected() {
        let mut cfg = ScenarioConfig::harvesting();
        cfg.supply.max_voltage = MAX_SUPPLY_VOLTAGE + 1.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "supply.max_voltage"));
    }

    #[test]
    fn validation_catches_constant_above_max() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.supply.constant_voltage = 12.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "supply.constant_voltage"));
    }

    #[test]
    fn build_follows_selected_kinds() {
        let sim = ScenarioConfig::harvesting().build();
        assert_eq!(sim.supply().kind().as_str(), "harvesting");
        assert_eq!(sim.load().name(), "mcu");
        assert_eq!(sim.time().len(), 481);
        assert_eq!(sim.supply().profile().len(), 481);
    }
}
