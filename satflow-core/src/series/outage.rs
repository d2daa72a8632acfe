use crate::measure::{BitRate, Interval};

/// Validated parameters for outage detection.
///
/// The threshold is an explicit parameter here; there is no process-wide
/// threshold state, so concurrent comparisons with different thresholds
/// cannot interfere.
///
/// # Example
///
/// ```
/// use satflow_core::series::OutageConfig;
/// use satflow_core::measure::{BitRate, Interval};
///
/// let config = OutageConfig::new(
///     "100kbps".parse().unwrap(),
///     Interval::from_millis(50),
///     Interval::from_secs(1_000),
/// )
/// .unwrap();
/// # assert_eq!(config.threshold(), BitRate::new(100_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutageConfig {
    threshold: BitRate,
    sample_interval: Interval,
    test_duration: Interval,
    flush_trailing_run: bool,
}

/// Error returned when constructing an [`OutageConfig`] with a zero
/// interval.
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum OutageConfigError {
    /// The sample interval sets the length of each detected outage run
    /// and cannot be zero.
    #[error("sample interval must be greater than zero")]
    ZeroSampleInterval,
    /// The test duration is the denominator of the availability ratio
    /// and cannot be zero.
    #[error("test duration must be greater than zero")]
    ZeroTestDuration,
}

impl OutageConfig {
    /// Create a config from a goodput threshold, the capture's sample
    /// interval and the nominal experiment duration.
    ///
    /// # Errors
    ///
    /// Rejects a zero `sample_interval` or `test_duration`.
    pub fn new(
        threshold: BitRate,
        sample_interval: Interval,
        test_duration: Interval,
    ) -> Result<Self, OutageConfigError> {
        if sample_interval.is_zero() {
            return Err(OutageConfigError::ZeroSampleInterval);
        }
        if test_duration.is_zero() {
            return Err(OutageConfigError::ZeroTestDuration);
        }

        Ok(Self {
            threshold,
            sample_interval,
            test_duration,
            flush_trailing_run: false,
        })
    }

    /// Whether a run of below-threshold samples still open at the end of
    /// the series is closed and reported (`true`) or dropped (`false`,
    /// the default, matching the capture dashboards this pipeline feeds).
    pub fn flush_trailing_run(mut self, flush: bool) -> Self {
        self.flush_trailing_run = flush;
        self
    }

    pub fn threshold(&self) -> BitRate {
        self.threshold
    }

    pub fn sample_interval(&self) -> Interval {
        self.sample_interval
    }

    pub fn test_duration(&self) -> Interval {
        self.test_duration
    }
}

/// Run-length-encoded summary of the service-unavailability intervals
/// found in one goodput delta sequence.
///
/// Freshly computed by [`detect`] on every call, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct OutageReport {
    /// Sum of all reported interval lengths.
    pub total_unavailable_ms: u64,
    /// Length of each closed below-threshold run, in capture order.
    pub intervals_ms: Vec<u64>,
    /// `(test_duration - total_unavailable) / test_duration`, floored
    /// at `0.0` so the documented `[0, 1]` range holds even when the
    /// caller supplies a nominal duration shorter than the data.
    pub availability: f64,
}

/// Detect below-threshold runs in a goodput delta sequence.
///
/// Each delta (bytes per sample interval) is converted to bits; a sample
/// at or below the threshold extends the current run, and the first
/// sample above it closes the run. A closed run of `count` samples is
/// reported as `(count - 1) * sample_interval` milliseconds: the first
/// below-threshold sample of a run is the boundary sample, already
/// accounted for by the preceding above-threshold interval arithmetic,
/// so a one-sample dip reports a zero-length interval. Totals downstream
/// depend on this convention exactly.
///
/// A run still open when the sequence ends is dropped unless
/// [`OutageConfig::flush_trailing_run`] opted into closing it (with the
/// same `count - 1` rule).
///
/// # Example
///
/// ```
/// use satflow_core::series::{detect, OutageConfig};
/// use satflow_core::measure::{BitRate, Interval};
///
/// let config = OutageConfig::new(
///     BitRate::new(100),
///     Interval::from_millis(50),
///     Interval::from_secs(1_000),
/// )
/// .unwrap();
///
/// // three below-threshold samples closed by the fourth
/// let report = detect(&[0.0, 0.0, 0.0, 5_000.0], &config);
/// assert_eq!(report.intervals_ms, vec![100]);
/// assert_eq!(report.total_unavailable_ms, 100);
/// ```
pub fn detect(deltas: &[f64], config: &OutageConfig) -> OutageReport {
    let threshold_bits = config.threshold.bits() as f64;
    let interval_ms = config.sample_interval.as_millis();

    let mut intervals_ms = Vec::new();
    let mut total_unavailable_ms = 0;
    let mut count: u64 = 0;

    for delta in deltas {
        let bits = delta * 8.0;
        if bits <= threshold_bits {
            count += 1;
        } else if count > 0 {
            let run_ms = (count - 1) * interval_ms;
            intervals_ms.push(run_ms);
            total_unavailable_ms += run_ms;
            count = 0;
        }
    }

    if config.flush_trailing_run && count > 0 {
        let run_ms = (count - 1) * interval_ms;
        intervals_ms.push(run_ms);
        total_unavailable_ms += run_ms;
    }

    let duration_ms = config.test_duration.as_millis() as f64;
    let availability = ((duration_ms - total_unavailable_ms as f64) / duration_ms).max(0.0);

    OutageReport {
        total_unavailable_ms,
        intervals_ms,
        availability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(threshold_bits: u64, interval_ms: u64, duration_ms: u64) -> OutageConfig {
        OutageConfig::new(
            BitRate::new(threshold_bits),
            Interval::from_millis(interval_ms),
            Interval::from_millis(duration_ms),
        )
        .unwrap()
    }

    #[test]
    fn all_above_threshold_is_fully_available() {
        let report = detect(&[5_000.0, 6_000.0, 7_000.0], &config(100, 50, 1_000));

        assert_eq!(report.total_unavailable_ms, 0);
        assert!(report.intervals_ms.is_empty());
        assert_eq!(report.availability, 1.0);
    }

    #[test]
    fn run_closed_by_above_threshold_sample() {
        // three below-threshold samples, closed on the fourth:
        // (3 - 1) * 50ms = 100ms
        let report = detect(&[0.0, 0.0, 0.0, 5_000.0], &config(100, 50, 1_000));

        assert_eq!(report.intervals_ms, vec![100]);
        assert_eq!(report.total_unavailable_ms, 100);
        assert_eq!(report.availability, 0.9);
    }

    #[test]
    fn one_sample_dip_reports_zero_length_interval() {
        let report = detect(&[5_000.0, 0.0, 5_000.0], &config(100, 50, 1_000));

        assert_eq!(report.intervals_ms, vec![0]);
        assert_eq!(report.total_unavailable_ms, 0);
    }

    #[test]
    fn sample_at_threshold_counts_as_below() {
        // 100 bits threshold: a 12.5-byte delta is exactly 100 bits
        let report = detect(&[12.5, 12.5, 5_000.0], &config(100, 50, 1_000));

        assert_eq!(report.intervals_ms, vec![50]);
    }

    #[test]
    fn multiple_runs_accumulate() {
        let deltas = [0.0, 0.0, 5_000.0, 0.0, 0.0, 0.0, 5_000.0];
        let report = detect(&deltas, &config(100, 50, 1_000));

        assert_eq!(report.intervals_ms, vec![50, 100]);
        assert_eq!(report.total_unavailable_ms, 150);
    }

    #[test]
    fn trailing_run_dropped_by_default() {
        let report = detect(&[5_000.0, 0.0, 0.0, 0.0], &config(100, 50, 1_000));

        assert!(report.intervals_ms.is_empty());
        assert_eq!(report.total_unavailable_ms, 0);
        assert_eq!(report.availability, 1.0);
    }

    #[test]
    fn trailing_run_flushed_on_request() {
        let config = config(100, 50, 1_000).flush_trailing_run(true);
        let report = detect(&[5_000.0, 0.0, 0.0, 0.0], &config);

        assert_eq!(report.intervals_ms, vec![100]);
        assert_eq!(report.total_unavailable_ms, 100);
    }

    #[test]
    fn negative_deltas_count_as_below_threshold() {
        // a counter regression reads as zero throughput
        let report = detect(&[5_000.0, -250.0, 0.0, 5_000.0], &config(100, 50, 1_000));

        assert_eq!(report.intervals_ms, vec![50]);
    }

    #[test]
    fn empty_sequence_is_fully_available() {
        let report = detect(&[], &config(100, 50, 1_000));

        assert_eq!(report.total_unavailable_ms, 0);
        assert_eq!(report.availability, 1.0);
    }

    #[test]
    fn availability_floored_at_zero() {
        // nominal duration shorter than the unavailable time
        let deltas = [0.0, 0.0, 0.0, 0.0, 5_000.0];
        let report = detect(&deltas, &config(100, 50, 100));

        assert_eq!(report.total_unavailable_ms, 150);
        assert_eq!(report.availability, 0.0);
    }

    #[test]
    fn zero_intervals_rejected() {
        assert!(
            OutageConfig::new(BitRate::ZERO, Interval::ZERO, Interval::from_secs(1)).is_err()
        );
        assert!(
            OutageConfig::new(BitRate::ZERO, Interval::from_secs(1), Interval::ZERO).is_err()
        );
    }
}
