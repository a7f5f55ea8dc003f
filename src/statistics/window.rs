//! Fixed-capacity sliding window with incrementally maintained statistics
//!
//! Values live in a ring buffer allocated once at construction. Every push
//! folds the new value into a [`Moments`] accumulator and, once the window is
//! full, removes the evicted value from it, so statistics always describe
//! exactly the values currently held.

use super::Moments;
use crate::traits::{DetectError, MergeError, Sketch};

#[cfg(feature = "std")]
use std::{format, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

use tracing::trace;

/// Summary statistics of the values currently in a [`SlidingWindow`]
///
/// `stddev` is the sample standard deviation (divides by `count - 1`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowStats {
    /// Number of values held
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample variance
    pub variance: f64,
    /// Sample standard deviation
    pub stddev: f64,
}

/// The most recent `capacity` samples, oldest evicted first
///
/// Push is O(1). Every `capacity` evictions the aggregates are rebuilt from
/// the buffered values, which keeps rounding error from piling up over an
/// unbounded stream while staying O(1) amortised. A window holding only
/// identical values always reports exactly that mean and zero spread.
///
/// # Example
///
/// ```
/// use flowguard::statistics::SlidingWindow;
///
/// let mut window = SlidingWindow::new(3).unwrap();
///
/// for value in [1.0, 2.0, 3.0, 4.0] {
///     window.push(value).unwrap();
/// }
///
/// // 1.0 has been evicted
/// assert!(window.is_full());
/// assert_eq!(window.iter().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
///
/// let stats = window.statistics().unwrap();
/// assert_eq!(stats.count, 3);
/// assert!((stats.mean - 3.0).abs() < 1e-12);
/// assert!((stats.stddev - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct SlidingWindow {
    /// Maximum number of values held
    capacity: usize,
    /// Ring storage; grows to `capacity` then is overwritten in place
    buf: Vec<f64>,
    /// Slot the next value is written to (also the oldest slot once full)
    head: usize,
    /// Aggregates over the values in `buf`
    moments: Moments,
    /// Evictions since the aggregates were last rebuilt
    evictions: usize,
    /// Length of the trailing run of identical values, capped at `capacity`
    run: usize,
}

impl SlidingWindow {
    /// Create an empty window holding at most `capacity` values
    ///
    /// Fails with [`DetectError::InvalidConfiguration`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, DetectError> {
        if capacity == 0 {
            return Err(DetectError::InvalidConfiguration {
                field: "capacity",
                reason: "must be positive",
            });
        }

        Ok(Self {
            capacity,
            buf: Vec::with_capacity(capacity),
            head: 0,
            moments: Moments::new(),
            evictions: 0,
            run: 0,
        })
    }

    /// Append a value, evicting the oldest one if the window is full
    ///
    /// Returns the evicted value, if any. Non-finite values are rejected
    /// with [`DetectError::InvalidSample`] and leave the window unchanged.
    pub fn push(&mut self, value: f64) -> Result<Option<f64>, DetectError> {
        if !value.is_finite() {
            return Err(DetectError::InvalidSample(value));
        }

        self.run = match self.newest() {
            Some(prev) if prev == value => (self.run + 1).min(self.capacity),
            _ => 1,
        };

        let evicted = if self.buf.len() < self.capacity {
            self.buf.push(value);
            self.head = self.buf.len() % self.capacity;
            self.moments.add(value);
            None
        } else {
            let evicted = self.buf[self.head];
            self.buf[self.head] = value;
            self.head = (self.head + 1) % self.capacity;

            self.moments.remove(evicted);
            self.moments.add(value);

            self.evictions += 1;
            if self.evictions >= self.capacity {
                self.resync();
            }
            Some(evicted)
        };

        // Every held value is identical: residue from evicted values must
        // not leave a nonzero spread behind
        if self.run >= self.buf.len() {
            self.moments = Moments::constant(self.buf.len() as u64, value);
        }

        Ok(evicted)
    }

    /// Rebuild the aggregates from the buffered values
    fn resync(&mut self) {
        let rebuilt = Moments::from_values(&self.buf);
        trace!(
            capacity = self.capacity,
            drift = rebuilt.mean() - self.moments.mean(),
            "window aggregates rebuilt"
        );
        self.moments = rebuilt;
        self.evictions = 0;
    }

    /// Count, mean and sample standard deviation of the held values
    ///
    /// Fails with [`DetectError::InsufficientData`] when fewer than two
    /// values are held.
    pub fn statistics(&self) -> Result<WindowStats, DetectError> {
        let count = self.buf.len();
        if count < 2 {
            return Err(DetectError::InsufficientData { count });
        }

        Ok(WindowStats {
            count,
            mean: self.moments.mean(),
            variance: self.moments.sample_variance(),
            stddev: self.moments.sample_stddev(),
        })
    }

    /// Mean of the held values, `None` when empty
    pub fn mean(&self) -> Option<f64> {
        if self.buf.is_empty() {
            None
        } else {
            Some(self.moments.mean())
        }
    }

    /// Whether the window holds `capacity` values
    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    /// Number of values held
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Maximum number of values held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Held values in arrival order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (newer, older) = self.buf.split_at(self.head);
        older.iter().chain(newer.iter()).copied()
    }

    /// Most recently pushed value
    pub fn newest(&self) -> Option<f64> {
        if self.buf.is_empty() {
            return None;
        }
        let idx = (self.head + self.capacity - 1) % self.capacity;
        // Not full yet: head == len, so idx == len - 1
        self.buf.get(idx).copied()
    }

    /// Value that will be evicted next once the window is full
    pub fn oldest(&self) -> Option<f64> {
        self.iter().next()
    }

    /// Remove all values, keeping the allocation
    pub fn clear(&mut self) {
        self.buf.clear();
        self.head = 0;
        self.moments = Moments::new();
        self.evictions = 0;
        self.run = 0;
    }
}

impl Sketch for SlidingWindow {
    type Item = f64;

    /// Non-finite values are ignored
    fn update(&mut self, item: &Self::Item) {
        let _ = self.push(*item);
    }

    /// Append the other window's contents, oldest first, as if its stream had
    /// followed this one
    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        if self.capacity != other.capacity {
            return Err(MergeError::IncompatibleConfig {
                expected: format!("capacity {}", self.capacity),
                found: format!("capacity {}", other.capacity),
            });
        }

        for value in other.iter() {
            self.update(&value);
        }
        Ok(())
    }

    fn clear(&mut self) {
        SlidingWindow::clear(self);
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>() + self.capacity * core::mem::size_of::<f64>()
    }

    fn count(&self) -> u64 {
        self.buf.len() as u64
    }
}
