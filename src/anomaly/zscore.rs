//! Rolling z-score anomaly detector
//!
//! Each sample is scored against the statistics of the window as it stood
//! *before* the sample arrived, so a single large spike cannot inflate the
//! standard deviation enough to hide itself.

use super::config::{DetectorConfig, HistoryPolicy};
use crate::math;
use crate::statistics::SlidingWindow;
use crate::traits::{DetectError, Detector};

use tracing::{debug, trace};

/// Outcome of evaluating one sample
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Verdict {
    /// 0-based arrival position among accepted samples
    pub index: u64,
    /// The evaluated sample
    pub value: f64,
    /// `(value - mean) / stddev` against prior history
    ///
    /// `None` during warm-up. When the history has zero spread this is 0.0
    /// for a sample equal to the mean and `±inf` for any other sample.
    /// Serialized as `null`, a number, or the string `"inf"` / `"-inf"`.
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_z_score"))]
    pub z_score: Option<f64>,
    /// Whether the sample was flagged
    pub is_anomaly: bool,
}

/// Formats like JSON and friends have no infinity; keep it distinct from warm-up
#[cfg(feature = "serde")]
fn serialize_z_score<S>(z_score: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match *z_score {
        None => serializer.serialize_none(),
        Some(z) if z == f64::INFINITY => serializer.serialize_some("inf"),
        Some(z) if z == f64::NEG_INFINITY => serializer.serialize_some("-inf"),
        Some(z) => serializer.serialize_some(&z),
    }
}

impl Verdict {
    /// Whether the verdict was produced without enough history to judge
    pub fn is_warmup(&self) -> bool {
        self.z_score.is_none()
    }
}

/// Flags samples whose |z-score| against recent history exceeds a threshold
///
/// # Example
///
/// ```
/// use flowguard::anomaly::AnomalyDetector;
///
/// let mut detector = AnomalyDetector::new(20, 3.0, false).unwrap();
///
/// for value in [1.0, 1.2, 0.9, 1.1, 1.0, 0.95, 1.05] {
///     assert!(!detector.evaluate(value).unwrap().is_anomaly);
/// }
///
/// let verdict = detector.evaluate(25.0).unwrap();
/// assert!(verdict.is_anomaly);
/// assert!(verdict.z_score.unwrap() > 3.0);
/// ```
#[derive(Clone, Debug)]
pub struct AnomalyDetector {
    config: DetectorConfig,
    window: SlidingWindow,
    /// Accepted samples so far (next verdict index)
    samples_seen: u64,
    anomalies_flagged: u64,
}

impl AnomalyDetector {
    /// Create a detector with the given window capacity, threshold and
    /// warm-up verdict, including anomalies in history
    ///
    /// Fails with [`DetectError::InvalidConfiguration`] if the capacity is
    /// below 2 or the threshold is not a positive finite number.
    pub fn new(
        window_capacity: usize,
        threshold: f64,
        warmup_verdict: bool,
    ) -> Result<Self, DetectError> {
        Self::with_config(
            DetectorConfig::default()
                .with_window_capacity(window_capacity)
                .with_threshold(threshold)
                .with_warmup_verdict(warmup_verdict),
        )
    }

    /// Create a detector from a full configuration
    pub fn with_config(config: DetectorConfig) -> Result<Self, DetectError> {
        config.validate()?;
        let window = SlidingWindow::new(config.window_capacity)?;

        Ok(Self {
            config,
            window,
            samples_seen: 0,
            anomalies_flagged: 0,
        })
    }

    /// Score `value` against current history, then update history
    ///
    /// Non-finite samples are rejected with [`DetectError::InvalidSample`];
    /// the window and counters are left unchanged and the next call proceeds
    /// normally.
    pub fn evaluate(&mut self, value: f64) -> Result<Verdict, DetectError> {
        if !value.is_finite() {
            debug!(value, "rejected non-finite sample");
            return Err(DetectError::InvalidSample(value));
        }

        let index = self.samples_seen;

        let (z_score, is_anomaly) = match self.window.statistics() {
            Err(_) => {
                trace!(index, value, "warm-up verdict");
                (None, self.config.warmup_verdict)
            }
            Ok(stats) if stats.stddev == 0.0 => {
                if value == stats.mean {
                    (Some(0.0), false)
                } else if value > stats.mean {
                    (Some(f64::INFINITY), true)
                } else {
                    (Some(f64::NEG_INFINITY), true)
                }
            }
            Ok(stats) => {
                let z = (value - stats.mean) / stats.stddev;
                (Some(z), math::abs(z) > self.config.threshold)
            }
        };

        // Only z-score detections are logged and subject to the history policy
        let detected = is_anomaly && z_score.is_some();
        if detected {
            debug!(index, value, z_score = ?z_score, "anomaly flagged");
        }

        if detected && self.config.history_policy == HistoryPolicy::ExcludeAnomalies {
            debug!(index, value, "anomaly withheld from history");
        } else {
            self.window.push(value)?;
        }

        self.samples_seen += 1;
        if is_anomaly {
            self.anomalies_flagged += 1;
        }

        Ok(Verdict {
            index,
            value,
            z_score,
            is_anomaly,
        })
    }

    /// Clear history and counters, keeping the configuration
    pub fn reset(&mut self) {
        self.window.clear();
        self.samples_seen = 0;
        self.anomalies_flagged = 0;
    }

    /// Configuration the detector was built with
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// |z| above which a sample is flagged
    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Reference window the next sample will be judged against
    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    /// Number of samples accepted (rejected samples are not counted)
    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    /// Number of verdicts with `is_anomaly == true`
    ///
    /// Warm-up verdicts count when `warmup_verdict` is `true`, even though
    /// they are not z-score detections and are never withheld from history.
    pub fn anomalies_flagged(&self) -> u64 {
        self.anomalies_flagged
    }

    /// Whether history is large enough for a z-score
    pub fn is_warmed_up(&self) -> bool {
        self.window.len() >= 2
    }
}

impl Detector for AnomalyDetector {
    fn evaluate(&mut self, value: f64) -> Result<Verdict, DetectError> {
        AnomalyDetector::evaluate(self, value)
    }

    fn reset(&mut self) {
        AnomalyDetector::reset(self);
    }
}
