//! Plotter state: the running simulation and its recent history.

use std::collections::VecDeque;
use std::time::Instant;

use crate::components::StorageStatus;
use crate::config::ScenarioConfig;
use crate::sim::engine::Simulation;
use crate::sim::types::TickSnapshot;

/// Maximum number of history entries kept for the rolling chart.
const MAX_HISTORY: usize = 400;

/// Tick interval options in milliseconds (slowest → fastest).
const SPEED_LEVELS_MS: [u64; 6] = [500, 250, 100, 50, 20, 5];

/// Default speed index (100 ms).
const DEFAULT_SPEED_IDX: usize = 2;

/// Attribute plotted on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Voltage,
    Current,
    Energy,
}

impl Attribute {
    /// Axis title including the unit.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Voltage => "Voltage (V)",
            Self::Current => "Current (A)",
            Self::Energy => "Energy (J)",
        }
    }

    /// Per-component series of this attribute: `(component, value)` pairs.
    ///
    /// The supply only has a voltage; energy plots the storage's stored
    /// energy and the load's cumulative consumption.
    pub fn series(&self, s: &TickSnapshot) -> Vec<(&'static str, f64)> {
        match self {
            Self::Voltage => vec![
                ("supply", s.supply_voltage),
                ("storage", s.storage_voltage),
                ("load", s.load_voltage),
            ],
            Self::Current => vec![("storage", s.storage_current), ("load", s.load_current)],
            Self::Energy => vec![
                ("storage", s.energy_stored),
                ("load", s.total_energy_consumed),
            ],
        }
    }
}

/// A user request, decoupled from the key that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    Faster,
    Slower,
    Plot(Attribute),
    Preset(&'static str),
    Restart,
}

/// TUI application state.
pub struct App {
    /// Simulation being plotted.
    sim: Simulation,
    /// Scenario the simulation was built from (kept for restart).
    scenario: ScenarioConfig,
    /// Rolling history of snapshots for the chart.
    pub history: VecDeque<TickSnapshot>,
    /// Total ticks in the run.
    pub total_steps: usize,
    /// Attribute on the chart.
    pub attribute: Attribute,
    /// Whether the simulation is paused.
    pub paused: bool,
    /// Current index into `SPEED_LEVELS_MS`.
    pub speed_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last simulation tick was executed.
    pub last_tick: Instant,
    /// Name shown in the header.
    pub scenario_name: String,
    /// Error that aborted the run, if any.
    pub error: Option<String>,
}

impl App {
    /// Creates an app for a validated scenario.
    pub fn new(scenario: ScenarioConfig, name: &str) -> Self {
        let sim = scenario.build();
        let total_steps = sim.time().len();
        Self {
            sim,
            scenario,
            history: VecDeque::with_capacity(MAX_HISTORY),
            total_steps,
            attribute: Attribute::Voltage,
            paused: false,
            speed_idx: DEFAULT_SPEED_IDX,
            quit: false,
            last_tick: Instant::now(),
            scenario_name: name.to_string(),
            error: None,
        }
    }

    /// Advances the simulation by one tick if not finished.
    ///
    /// A failing tick stops the run and records the error for display.
    pub fn tick(&mut self) {
        if self.is_finished() {
            return;
        }
        match self.sim.next_tick() {
            Ok(Some(snapshot)) => {
                if self.history.len() >= MAX_HISTORY {
                    self.history.pop_front();
                }
                self.history.push_back(snapshot);
            }
            Ok(None) => {}
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Applies a user request.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit = true,
            Action::TogglePause => self.toggle_pause(),
            Action::Faster => self.speed_up(),
            Action::Slower => self.speed_down(),
            Action::Plot(attribute) => self.select(attribute),
            Action::Preset(name) => self.switch_preset(name),
            Action::Restart => self.restart(),
        }
    }

    /// Toggles pause/resume.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Increases simulation speed (shorter tick interval).
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_LEVELS_MS.len() {
            self.speed_idx += 1;
        }
    }

    /// Decreases simulation speed (longer tick interval).
    pub fn speed_down(&mut self) {
        if self.speed_idx > 0 {
            self.speed_idx -= 1;
        }
    }

    /// Returns the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        SPEED_LEVELS_MS[self.speed_idx]
    }

    pub fn select(&mut self, attribute: Attribute) {
        self.attribute = attribute;
    }

    /// Switches to a built-in preset, resetting simulation state.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(scenario) = ScenarioConfig::from_preset(name) else {
            return;
        };
        self.scenario_name = name.to_string();
        self.reset(scenario);
    }

    /// Restarts the current scenario from the first tick.
    pub fn restart(&mut self) {
        self.reset(self.scenario.clone());
    }

    fn reset(&mut self, scenario: ScenarioConfig) {
        self.sim = scenario.build();
        self.total_steps = self.sim.time().len();
        self.scenario = scenario;
        self.history.clear();
        self.paused = false;
        self.error = None;
    }

    /// Number of ticks executed so far.
    pub fn ticks_done(&self) -> usize {
        self.history.back().map_or(0, |s| s.step + 1)
    }

    /// Returns `true` when every tick has run or the run failed.
    pub fn is_finished(&self) -> bool {
        self.error.is_some() || self.sim.is_finished()
    }

    /// Returns the most recent snapshot, if any.
    pub fn last_snapshot(&self) -> Option<&TickSnapshot> {
        self.history.back()
    }

    /// Storage voltage as a fraction of its saturation voltage.
    pub fn storage_fill(&self) -> f64 {
        let max = self.sim.storage().params().v_storage_max;
        let v = self
            .last_snapshot()
            .map_or(self.sim.storage().voltage(), |s| s.storage_voltage);
        (v / max).clamp(0.0, 1.0)
    }

    /// Storage status at the latest tick.
    pub fn storage_status(&self) -> Option<StorageStatus> {
        self.last_snapshot().map(|s| s.storage_status)
    }

    /// Load variant name.
    pub fn load_name(&self) -> &'static str {
        self.sim.load().name()
    }

    /// Supply variant name.
    pub fn supply_name(&self) -> &'static str {
        self.sim.supply().kind().as_str()
    }
}
