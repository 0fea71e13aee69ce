//! Timing helpers for the suggestion pipeline.

use cadence::{Histogram, Histogrammed, MetricResult};
use std::time::Duration;

/// Records durations as histograms with sub-microsecond precision.
///
/// Values are sent as a fractional number of microseconds, so keys should end
/// in `-us`. Histograms are a Datadog extension to Statsd.
pub trait TimedMicros {
    /// Send `value` as a histogram under `key`.
    ///
    /// # Errors
    /// Returns an error if the metric could not be sent.
    fn time_micros(&self, key: &str, value: Duration) -> MetricResult<Histogram>;
}

impl<C: Histogrammed<f64>> TimedMicros for C {
    fn time_micros(&self, key: &str, value: Duration) -> MetricResult<Histogram> {
        debug_assert!(key.ends_with("-us"));
        self.histogram(key, value.as_nanos() as f64 / 1000.0)
    }
}
