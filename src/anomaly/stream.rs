//! Iterator adapter that drives a detector from a sample producer
//!
//! The adapter is the synchronous driving loop: it pulls one sample, hands it
//! to the detector, and yields the result before pulling the next. Rejected
//! samples come through as `Err` items; the stream keeps going.

use super::Verdict;
use crate::traits::{DetectError, Detector};

/// Iterator over verdicts for each sample of `I`
///
/// Created by [`DetectExt::detect_with`].
pub struct Detections<'a, I, D: ?Sized> {
    samples: I,
    detector: &'a mut D,
}

impl<'a, I, D> Iterator for Detections<'a, I, D>
where
    I: Iterator<Item = f64>,
    D: Detector + ?Sized,
{
    type Item = Result<Verdict, DetectError>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.samples.next()?;
        Some(self.detector.evaluate(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.samples.size_hint()
    }
}

/// Extension trait turning any stream of `f64` into a stream of verdicts
///
/// # Example
///
/// ```
/// use flowguard::anomaly::{AnomalyDetector, DetectExt};
///
/// let mut detector = AnomalyDetector::new(5, 3.0, false).unwrap();
/// let samples = [10.0, 10.0, 10.0, 10.0, 10.0, 100.0];
///
/// let flagged: Vec<u64> = samples
///     .into_iter()
///     .detect_with(&mut detector)
///     .filter_map(Result::ok)
///     .filter(|v| v.is_anomaly)
///     .map(|v| v.index)
///     .collect();
///
/// assert_eq!(flagged, vec![5]);
/// ```
pub trait DetectExt: Iterator<Item = f64> + Sized {
    /// Evaluate every sample with `detector`, in order
    fn detect_with<D: Detector + ?Sized>(self, detector: &mut D) -> Detections<'_, Self, D> {
        Detections {
            samples: self,
            detector,
        }
    }
}

impl<I: Iterator<Item = f64>> DetectExt for I {}
