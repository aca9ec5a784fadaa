//! Error taxonomy shared by the simulation core.

/// Failure raised by a component refresh or by the simulation loop.
///
/// Every variant is fatal for a run: the loop propagates it to the caller and
/// emits no snapshot for the failing tick. Storage saturation is not an error
/// and is reported through `tracing` instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// A supply profile was read with a step index past its end.
    #[error("step index {index} is out of range for a supply profile of {len} samples")]
    IndexOutOfRange { index: usize, len: usize },

    /// A mutating operation received a negative or non-finite quantity.
    #[error("invalid argument `{name}`: {value} (must be finite and non-negative)")]
    InvalidArgument { name: &'static str, value: f64 },

    /// The storage voltage matched none of the charging/discharging/full regimes.
    #[error("storage voltage {voltage} matches no charging/discharging/full regime")]
    InvalidState { voltage: f64 },
}

/// Rejects negative and non-finite quantities before any state is touched.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidArgument { name, value })
    }
}
