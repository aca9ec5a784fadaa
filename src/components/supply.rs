use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::SimError;

/// Ceiling on every supply sample (V).
pub const MAX_SUPPLY_VOLTAGE: f64 = 10.0;

/// Default level of a constant supply (V).
pub const DEFAULT_CONSTANT_VOLTAGE: f64 = 8.0;

/// Supply variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyKind {
    /// Same voltage at every step, e.g. a bench source.
    Constant,
    /// Independently sampled voltage per step, e.g. a solar cell.
    Harvesting,
}

impl SupplyKind {
    /// Lower-case name used in logs and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Harvesting => "harvesting",
        }
    }
}

/// An energy supply with a voltage profile fixed at construction.
///
/// The profile holds one sample per time step. `refresh` selects the sample
/// for a step; nothing ever writes to the profile after construction.
#[derive(Debug, Clone)]
pub struct EnergySupply {
    kind: SupplyKind,
    profile: Vec<f64>,
    /// Voltage at the last refreshed step (V).
    pub voltage: f64,
}

impl EnergySupply {
    /// Creates a supply that repeats `voltage` for each of `steps` samples.
    ///
    /// # Panics
    ///
    /// Panics if `voltage` is outside `[0, MAX_SUPPLY_VOLTAGE]`.
    pub fn constant(steps: usize, voltage: f64) -> Self {
        assert!((0.0..=MAX_SUPPLY_VOLTAGE).contains(&voltage));
        Self {
            kind: SupplyKind::Constant,
            profile: vec![voltage; steps],
            voltage: 0.0,
        }
    }

    /// Creates a harvesting supply drawing each sample uniformly from
    /// `[0, max_voltage]`.
    ///
    /// # Arguments
    ///
    /// * `steps` - Number of samples, one per time step
    /// * `max_voltage` - Upper bound of the sampled voltage (V), at most
    ///   [`MAX_SUPPLY_VOLTAGE`]
    /// * `seed` - Random seed for a reproducible profile
    ///
    /// # Panics
    ///
    /// Panics if `max_voltage` is outside `[0, MAX_SUPPLY_VOLTAGE]`.
    pub fn harvesting(steps: usize, max_voltage: f64, seed: u64) -> Self {
        assert!((0.0..=MAX_SUPPLY_VOLTAGE).contains(&max_voltage));
        let mut rng = StdRng::seed_from_u64(seed);
        let profile = (0..steps)
            .map(|_| rng.random_range(0.0..=max_voltage))
            .collect();
        Self {
            kind: SupplyKind::Harvesting,
            profile,
            voltage: 0.0,
        }
    }

    /// Sets the current voltage to the profile sample of `t_index`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::IndexOutOfRange`] if `t_index` is not below the
    /// profile length. The current voltage is left untouched in that case.
    pub fn refresh(&mut self, t_index: usize) -> Result<(), SimError> {
        let sample = self
            .profile
            .get(t_index)
            .copied()
            .ok_or(SimError::IndexOutOfRange {
                index: t_index,
                len: self.profile.len(),
            })?;
        self.voltage = sample;
        Ok(())
    }

    /// Supply variant.
    pub fn kind(&self) -> SupplyKind {
        self.kind
    }

    /// The full voltage profile.
    pub fn profile(&self) -> &[f64] {
        &self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_supplies_start_at_zero_volts() {
        let constant = EnergySupply::constant(25, DEFAULT_CONSTANT_VOLTAGE);
        let harvesting = EnergySupply::harvesting(25, MAX_SUPPLY_VOLTAGE, 42);
        assert_eq!(constant.kind(), SupplyKind::Constant);
        assert_eq!(constant.voltage, 0.0);
        assert_eq!(harvesting.kind(), SupplyKind::Harvesting);
        assert_eq!(harvesting.voltage, 0.0);
    }

    #[test]
    fn test_constant_profile_is_flat() {
        let mut supply = EnergySupply::constant(5, 8.0);
        assert_eq!(supply.profile(), &[8.0; 5]);
        for i in 0..5 {
            supply.refresh(i).ok();
            assert_eq!(supply.voltage, 8.0);
        }
    }

    #[test]
    fn test_refresh_at_profile_length_fails() {
        let mut supply = EnergySupply::constant(5, 8.0);
        supply.refresh(2).ok();
        assert_eq!(
            supply.refresh(5),
            Err(SimError::IndexOutOfRange { index: 5, len: 5 })
        );
        assert_eq!(supply.voltage, 8.0);
    }

    #[test]
    fn test_harvesting_samples_within_bounds() {
        let supply = EnergySupply::harvesting(500, 5.5, 7);
        assert_eq!(supply.profile().len(), 500);
        assert!(supply.profile().iter().all(|v| (0.0..=5.5).contains(v)));
    }

    #[test]
    fn test_harvesting_deterministic_with_same_seed() {
        let a = EnergySupply::harvesting(50, MAX_SUPPLY_VOLTAGE, 42);
        let b = EnergySupply::harvesting(50, MAX_SUPPLY_VOLTAGE, 42);
        let c = EnergySupply::harvesting(50, MAX_SUPPLY_VOLTAGE, 43);
        assert_eq!(a.profile(), b.profile());
        assert_ne!(a.profile(), c.profile());
    }

    #[test]
    fn test_refresh_leaves_profile_untouched() {
        let mut supply = EnergySupply::harvesting(10, MAX_SUPPLY_VOLTAGE, 1);
        let before = supply.profile().to_vec();
        for i in 0..10 {
            supply.refresh(i).ok();
        }
        assert_eq!(supply.profile(), before.as_slice());
    }

    #[test]
    #[should_panic]
    fn test_negative_constant_panics() {
        EnergySupply::constant(3, -1.0);
    }

    #[test]
    #[should_panic]
    fn test_constant_above_ceiling_panics() {
        EnergySupply::constant(3, MAX_SUPPLY_VOLTAGE + 0.5);
    }

    #[test]
    #[should_panic]
    fn test_unbounded_harvesting_panics() {
        EnergySupply::harvesting(3, f64::INFINITY, 1);
    }

    #[test]
    fn test_constant_at_ceiling_is_accepted() {
        let supply = EnergySupply::constant(2, MAX_SUPPLY_VOLTAGE);
        assert_eq!(supply.profile(), &[MAX_SUPPLY_VOLTAGE; 2]);
    }
}
