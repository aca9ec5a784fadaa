/// Fixed-interval sequence of simulation time samples, in seconds.
///
/// Samples are `start + i * interval` for every `i` such that the sample does
/// not pass `end`. Both ends are inclusive when `end - start` is a whole
/// number of intervals.
///
/// # Examples
///
/// ```
/// use behs_sim::sim::time_vector::TimeVector;
///
/// let mut tv = TimeVector::new(0.0, 1.0, 0.25);
/// let mut seen = Vec::new();
///
/// tv.run(|step, t| seen.push((step, t)));
/// assert_eq!(seen.len(), 5);
/// assert_eq!(seen[4], (4, 1.0));
/// ```
#[derive(Debug, Clone)]
pub struct TimeVector {
    /// First sample (s).
    pub start: f64,
    /// Spacing between samples (s).
    pub interval: f64,
    /// Number of samples.
    len: usize,
    /// Next step handed out by `tick`.
    current: usize,
}

/// Slack for `(end - start) / interval` landing a hair under a whole number.
const STEP_COUNT_EPSILON: f64 = 1e-9;

impl TimeVector {
    /// Creates a time vector spanning `[start, end]` with a fixed `interval`.
    ///
    /// # Panics
    ///
    /// Panics when [`TimeVector::sample_count`] rejects the bounds.
    pub fn new(start: f64, end: f64, interval: f64) -> Self {
        let Some(len) = Self::sample_count(start, end, interval) else {
            panic!("time vector needs finite bounds, interval > 0 and end >= start");
        };
        Self {
            start,
            interval,
            len,
            current: 0,
        }
    }

    /// Number of samples `[start, end]` holds at `interval` spacing.
    ///
    /// Returns `None` for non-finite bounds, a non-positive interval,
    /// `end < start`, or a count that does not fit in `usize`.
    pub fn sample_count(start: f64, end: f64, interval: f64) -> Option<usize> {
        if !(start.is_finite() && end.is_finite() && interval.is_finite()) {
            return None;
        }
        if interval <= 0.0 || end < start {
            return None;
        }
        let steps = ((end - start) / interval + STEP_COUNT_EPSILON).floor();
        if !steps.is_finite() || steps >= usize::MAX as f64 {
            return None;
        }
        (steps as usize).checked_add(1)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a time vector holds at least its start sample.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Time of sample `step` (s).
    pub fn time_at(&self, step: usize) -> f64 {
        self.start + step as f64 * self.interval
    }

    /// All samples, in order.
    pub fn samples(&self) -> Vec<f64> {
        (0..self.len).map(|i| self.time_at(i)).collect()
    }

    /// Hands out the next `(step, time)` pair.
    ///
    /// # Returns
    ///
    /// * `Some((step, t))` - The step index and its time before advancing
    /// * `None` - Once every sample has been handed out
    pub fn tick(&mut self) -> Option<(usize, f64)> {
        if self.current < self.len {
            let step = self.current;
            self.current += 1;
            Some((step, self.time_at(step)))
        } else {
            None
        }
    }

    /// Returns `true` once `tick` has handed out every sample.
    pub fn is_finished(&self) -> bool {
        self.current >= self.len
    }

    /// Rewinds to the first sample.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Calls `f` with every remaining `(step, time)` pair.
    pub fn run(&mut self, mut f: impl FnMut(usize, f64)) {
        while let Some((step, t)) = self.tick() {
            f(step, t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count_inclusive_of_end() {
        let tv = TimeVector::new(0.0, 6.0, 0.25);
        assert_eq!(tv.len(), 25);
        assert_eq!(tv.samples().last().copied(), Some(6.0));
    }

    #[test]
    fn test_partial_interval_is_dropped() {
        let tv = TimeVector::new(0.0, 1.1, 0.5);
        assert_eq!(tv.samples(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_decimal_interval_keeps_end_sample() {
        let tv = TimeVector::new(0.0, 1.0, 0.1);
        assert_eq!(tv.len(), 11);
    }

    #[test]
    fn test_tick() {
        let mut tv = TimeVector::new(1.0, 2.0, 1.0);
        assert_eq!(tv.tick(), Some((0, 1.0)));
        assert_eq!(tv.tick(), Some((1, 2.0)));
        assert_eq!(tv.tick(), None);
        assert!(tv.is_finished());
    }

    #[test]
    fn test_reset_rewinds() {
        let mut tv = TimeVector::new(0.0, 1.0, 1.0);
        tv.run(|_, _| {});
        tv.reset();
        assert_eq!(tv.tick(), Some((0, 0.0)));
    }

    #[test]
    fn test_single_sample() {
        let mut tv = TimeVector::new(3.0, 3.0, 0.5);
        let mut calls = 0;
        tv.run(|_, t| {
            assert_eq!(t, 3.0);
            calls += 1;
        });
        assert_eq!(calls, 1);
    }

    #[test]
    #[should_panic]
    fn test_zero_interval_panics() {
        TimeVector::new(0.0, 1.0, 0.0);
    }

    #[test]
    #[should_panic]
    fn test_infinite_end_panics() {
        TimeVector::new(0.0, f64::INFINITY, 1.0);
    }

    #[test]
    fn test_sample_count_rejects_unrepresentable_spans() {
        assert_eq!(TimeVector::sample_count(0.0, 6.0, 0.25), Some(25));
        assert_eq!(TimeVector::sample_count(0.0, f64::INFINITY, 1.0), None);
        assert_eq!(TimeVector::sample_count(f64::NAN, 1.0, 1.0), None);
        assert_eq!(TimeVector::sample_count(0.0, 1.0, f64::INFINITY), None);
        assert_eq!(TimeVector::sample_count(0.0, 1e300, 1e-300), None);
        assert_eq!(TimeVector::sample_count(0.0, 1e30, 1.0), None);
        assert_eq!(TimeVector::sample_count(2.0, 1.0, 1.0), None);
    }
}
