//! Reversible running moments (count, mean, M2)
//!
//! Welford's online update together with its exact inverse, so a value that
//! leaves a window can be taken back out of the aggregates.

use crate::math;
use crate::traits::{MergeError, Sketch};

/// Tolerance, relative to the magnitude of the data, under which a negative
/// M2 is treated as rounding noise and clamped to zero.
const NEGATIVE_M2_TOLERANCE: f64 = 1e-9;

/// Running first and second moments using Welford's algorithm
///
/// Unlike a plain accumulator, values can also be removed again with
/// [`Moments::remove`], which is the exact algebraic inverse of
/// [`Moments::add`]. Both are O(1).
///
/// # Example
///
/// ```
/// use flowguard::statistics::Moments;
///
/// let mut m = Moments::new();
///
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     m.add(value);
/// }
/// assert!((m.mean() - 5.0).abs() < 1e-12);
/// assert!((m.variance() - 4.0).abs() < 1e-12);
///
/// // Take the first value back out
/// m.remove(2.0);
/// assert_eq!(m.len(), 7);
/// assert!((m.mean() - 38.0 / 7.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Moments {
    /// Number of values summarised
    count: u64,
    /// Running mean
    mean: f64,
    /// Sum of squared differences from mean (M2 in Welford's algorithm)
    m2: f64,
}

impl Moments {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Build an accumulator over a slice of values
    pub fn from_values(values: &[f64]) -> Self {
        let mut m = Self::new();
        for &v in values {
            m.add(v);
        }
        m
    }

    /// Accumulator describing `count` copies of `value`, with zero spread
    pub fn constant(count: u64, value: f64) -> Self {
        if count == 0 {
            return Self::new();
        }
        Self {
            count,
            mean: value,
            m2: 0.0,
        }
    }

    /// Add a value
    #[inline]
    pub fn add(&mut self, value: f64) {
        self.count += 1;

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Remove a value previously passed to [`add`](Self::add)
    ///
    /// Removing a value that was never added leaves the accumulator
    /// describing a meaningless population; callers own that bookkeeping.
    #[inline]
    pub fn remove(&mut self, value: f64) {
        if self.count <= 1 {
            *self = Self::new();
            return;
        }

        // Rough sum of squares before removal; rounding error scales with it
        let magnitude = self.m2 + self.count as f64 * self.mean * self.mean + value * value;

        let delta = value - self.mean;
        self.count -= 1;
        self.mean -= delta / self.count as f64;
        self.m2 -= delta * (value - self.mean);

        if self.m2 < 0.0 {
            let tolerance = NEGATIVE_M2_TOLERANCE * (1.0 + magnitude);
            debug_assert!(
                self.m2 >= -tolerance,
                "M2 went negative beyond rounding: {} (tolerance {})",
                self.m2,
                tolerance
            );
            self.m2 = 0.0;
        }
    }

    /// Number of values summarised
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Mean of the values, 0.0 when empty
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sum of squared deviations from the mean
    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// Population variance (divides by `n`)
    pub fn variance(&self) -> f64 {
        if self.count < 1 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Sample variance with Bessel's correction (divides by `n - 1`)
    ///
    /// Returns 0.0 for fewer than two values.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Population standard deviation
    pub fn stddev(&self) -> f64 {
        math::sqrt(self.variance())
    }

    /// Sample standard deviation
    pub fn sample_stddev(&self) -> f64 {
        math::sqrt(self.sample_variance())
    }

    /// Sum of all values
    pub fn sum(&self) -> f64 {
        self.mean * self.count as f64
    }

    /// Combine with another accumulator (Chan et al.'s parallel algorithm)
    pub fn merge_stats(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }

        if self.count == 0 {
            *self = *other;
            return;
        }

        let combined_count = self.count + other.count;
        let delta = other.mean - self.mean;

        let combined_mean = self.mean + delta * (other.count as f64 / combined_count as f64);
        let combined_m2 = self.m2
            + other.m2
            + delta * delta * (self.count as f64 * other.count as f64 / combined_count as f64);

        self.count = combined_count;
        self.mean = combined_mean;
        self.m2 = combined_m2;
    }
}

impl Sketch for Moments {
    type Item = f64;

    /// NaN is ignored so it cannot poison the aggregates
    fn update(&mut self, item: &Self::Item) {
        if item.is_nan() {
            return;
        }
        self.add(*item);
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        self.merge_stats(other);
        Ok(())
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}
