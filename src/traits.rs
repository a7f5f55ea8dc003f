//! Core traits and error types
//!
//! Accumulators and windows implement the base [`Sketch`] trait; anything that
//! turns a sample stream into verdicts implements [`Detector`].

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Error during sketch merge operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Sketches have incompatible configurations
    IncompatibleConfig {
        expected: String,
        found: String,
    },
}

impl core::fmt::Display for MergeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MergeError::IncompatibleConfig { expected, found } => {
                write!(f, "incompatible config: expected {}, found {}", expected, found)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MergeError {}

/// Error raised while building or feeding a window or detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectError {
    /// A construction parameter is out of range
    InvalidConfiguration {
        field: &'static str,
        reason: &'static str,
    },
    /// Sample is NaN or infinite; state was left untouched
    InvalidSample(f64),
    /// Fewer than two values held, so the standard deviation is undefined
    InsufficientData { count: usize },
}

impl core::fmt::Display for DetectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DetectError::InvalidConfiguration { field, reason } => {
                write!(f, "invalid configuration: {} {}", field, reason)
            }
            DetectError::InvalidSample(v) => write!(f, "invalid sample: {} is not finite", v),
            DetectError::InsufficientData { count } => {
                write!(f, "insufficient data: need at least 2 values, have {}", count)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DetectError {}

/// Core trait for all streaming accumulators
pub trait Sketch: Clone + Debug {
    /// The type of item this sketch processes
    type Item: ?Sized;

    /// Add an item to the sketch
    fn update(&mut self, item: &Self::Item);

    /// Merge another sketch into this one
    ///
    /// Returns an error if sketches are incompatible
    fn merge(&mut self, other: &Self) -> Result<(), MergeError>;

    /// Reset sketch to empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of items currently summarised
    fn count(&self) -> u64;

    /// Check if sketch is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Classifies samples one at a time, in arrival order
#[cfg(feature = "anomaly")]
#[cfg_attr(docsrs, doc(cfg(feature = "anomaly")))]
pub trait Detector {
    /// Judge `value` against recent history, then fold it into that history
    fn evaluate(&mut self, value: f64) -> Result<crate::anomaly::Verdict, DetectError>;

    /// Forget all history
    fn reset(&mut self);
}
