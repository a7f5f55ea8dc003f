//! Streaming anomaly detection
//!
//! This module classifies samples one at a time with a rolling z-score test:
//! each sample is compared against the mean and sample standard deviation of
//! the most recent `window_capacity` samples that preceded it.
//!
//! # Rules
//!
//! - Fewer than two samples of history: warm-up, verdict is
//!   [`DetectorConfig::warmup_verdict`] (default `false`)
//! - History with zero spread: anomalous iff the sample differs from the mean
//! - Otherwise: anomalous iff `|z| > threshold`
//!
//! # Example
//!
//! ```
//! use flowguard::anomaly::{AnomalyDetector, DetectorConfig, HistoryPolicy};
//!
//! let config = DetectorConfig::default()
//!     .with_window_capacity(20)
//!     .with_history_policy(HistoryPolicy::ExcludeAnomalies);
//! let mut detector = AnomalyDetector::with_config(config).unwrap();
//!
//! for value in [0.5, -0.2, 0.1, 0.3, -0.4, 0.0, 0.2, 50.0] {
//!     let verdict = detector.evaluate(value).unwrap();
//!     if verdict.is_anomaly {
//!         println!("#{} {} z={:?}", verdict.index, verdict.value, verdict.z_score);
//!     }
//! }
//! ```

mod config;
mod stream;
mod zscore;

pub use config::{DetectorConfig, HistoryPolicy, DEFAULT_THRESHOLD, DEFAULT_WINDOW_CAPACITY};
pub use stream::{DetectExt, Detections};
pub use zscore::{AnomalyDetector, Verdict};
