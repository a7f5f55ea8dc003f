//! Detector configuration

use crate::traits::DetectError;

/// Default window capacity
pub const DEFAULT_WINDOW_CAPACITY: usize = 30;

/// Default z-score threshold (more than three standard deviations)
pub const DEFAULT_THRESHOLD: f64 = 3.0;

/// Whether flagged samples join the reference window
///
/// Including anomalies lets a sustained shift become the new baseline, after
/// which it stops being flagged. Excluding them keeps the baseline fixed on
/// normal traffic, at the cost of never adapting to a genuine level change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HistoryPolicy {
    /// Every accepted sample is pushed into the window
    #[default]
    IncludeAnomalies,
    /// Samples flagged by the z-score test are not pushed
    ExcludeAnomalies,
}

/// Configuration for an [`AnomalyDetector`](super::AnomalyDetector)
///
/// # Example
///
/// ```
/// use flowguard::anomaly::{DetectorConfig, HistoryPolicy};
///
/// let config = DetectorConfig::default()
///     .with_window_capacity(50)
///     .with_threshold(2.5)
///     .with_history_policy(HistoryPolicy::ExcludeAnomalies);
///
/// assert!(config.validate().is_ok());
/// assert!(DetectorConfig::default().with_threshold(0.0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// Number of recent samples used as the reference population
    pub window_capacity: usize,
    /// |z| above which a sample is flagged (exclusive)
    pub threshold: f64,
    /// Verdict returned while fewer than two samples are held
    pub warmup_verdict: bool,
    /// Whether flagged samples are added to the window
    pub history_policy: HistoryPolicy,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            threshold: DEFAULT_THRESHOLD,
            warmup_verdict: false,
            history_policy: HistoryPolicy::IncludeAnomalies,
        }
    }
}

impl DetectorConfig {
    /// Set the number of recent samples used as the reference population
    pub fn with_window_capacity(mut self, window_capacity: usize) -> Self {
        self.window_capacity = window_capacity;
        self
    }

    /// Set the |z| above which a sample is flagged
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the verdict returned while fewer than two samples are held
    pub fn with_warmup_verdict(mut self, warmup_verdict: bool) -> Self {
        self.warmup_verdict = warmup_verdict;
        self
    }

    /// Set whether flagged samples are added to the window
    pub fn with_history_policy(mut self, history_policy: HistoryPolicy) -> Self {
        self.history_policy = history_policy;
        self
    }

    /// Check parameter ranges
    ///
    /// The window must hold at least two samples, otherwise a standard
    /// deviation is never defined and the detector would stay in warm-up
    /// forever. The threshold must be finite and positive.
    pub fn validate(&self) -> Result<(), DetectError> {
        if self.window_capacity < 2 {
            return Err(DetectError::InvalidConfiguration {
                field: "window_capacity",
                reason: "must be at least 2",
            });
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(DetectError::InvalidConfiguration {
                field: "threshold",
                reason: "must be finite and positive",
            });
        }
        Ok(())
    }
}
