//! # Flowguard
//!
//! Streaming anomaly detection for Rust.
//!
//! Flowguard classifies a stream of numeric samples as normal or anomalous,
//! one sample at a time, using a rolling z-score test over a fixed-size window
//! of recent history. Window statistics are maintained incrementally, so each
//! sample costs O(1) regardless of window size.
//!
//! ## Features
//!
//! - **Sliding Window**: Fixed-capacity FIFO with O(1) mean and variance
//! - **Reversible Moments**: Welford accumulator that supports removal
//! - **Z-Score Detection**: Threshold test with well-defined warm-up and
//!   zero-variance behaviour
//! - **Iterator Integration**: Drive a detector from any `Iterator<Item = f64>`
//!
//! ## Quick Start
//!
//! ```rust
//! use flowguard::prelude::*;
//!
//! let mut detector = AnomalyDetector::new(30, 3.0, false).unwrap();
//!
//! for value in [1.0, 1.1, 0.9, 1.05, 0.95, 12.0] {
//!     let verdict = detector.evaluate(value).unwrap();
//!     if verdict.is_anomaly {
//!         println!("anomaly at #{}: {}", verdict.index, verdict.value);
//!     }
//! }
//! ```
//!
//! ## Concurrency
//!
//! Detectors hold no locks. Feed one detector from one thread, in arrival
//! order; if several producers share a detector, serialize them through a
//! channel and let a single consumer own it.
//!
//! ## Feature Flags
//!
//! Algorithm families:
//! - `statistics` (default): Reversible moments and sliding window
//! - `anomaly` (default): Rolling z-score detector (implies `statistics`)
//! - `full`: Enable all algorithm families
//!
//! Platform features:
//! - `std` (default): Standard library support
//! - `serde`: Enable serialization of configuration and verdicts

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits always available
pub mod traits;

#[cfg(feature = "statistics")]
mod math;

#[cfg(feature = "statistics")]
#[cfg_attr(docsrs, doc(cfg(feature = "statistics")))]
pub mod statistics;

#[cfg(feature = "anomaly")]
#[cfg_attr(docsrs, doc(cfg(feature = "anomaly")))]
pub mod anomaly;

pub mod prelude {
    pub use crate::traits::*;

    #[cfg(feature = "statistics")]
    pub use crate::statistics::{Moments, SlidingWindow, WindowStats};

    #[cfg(feature = "anomaly")]
    pub use crate::anomaly::{AnomalyDetector, DetectExt, DetectorConfig, HistoryPolicy, Verdict};
}

#[cfg(feature = "statistics")]
pub use statistics::SlidingWindow;

#[cfg(feature = "anomaly")]
pub use anomaly::AnomalyDetector;
