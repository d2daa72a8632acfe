use crate::measure::{BitRate, Interval};

/// The cumulative counter whose per-interval deltas are the goodput
/// series.
///
/// Goodput (useful received throughput) is derived by differencing the
/// receiver-side total of bytes received. The outage detector runs over
/// this metric's delta column.
///
/// ```
/// # use satflow_core::defaults::*;
/// # use satflow_core::catalog;
/// assert!(catalog::classify(GOODPUT_METRIC).is_ok());
/// ```
pub const GOODPUT_METRIC: &str = "bytes_received";

/// Default goodput threshold below which a sample counts as unavailable.
///
/// ```
/// # use satflow_core::defaults::*;
/// assert_eq!(
///     DEFAULT_OUTAGE_THRESHOLD.to_string(),
///     "100kbps"
/// );
/// ```
pub const DEFAULT_OUTAGE_THRESHOLD: BitRate = BitRate::new(100_000);

/// Default spacing between two instrumentation samples.
///
/// The emulation runs sample TCP state once per second.
///
/// ```
/// # use satflow_core::defaults::*;
/// assert_eq!(
///     DEFAULT_SAMPLE_INTERVAL.to_string(),
///     "1s"
/// );
/// ```
pub const DEFAULT_SAMPLE_INTERVAL: Interval = Interval::from_secs(1);

/// Default nominal experiment duration.
///
/// The route-update experiments run for 1000 seconds of emulated time;
/// availability ratios are computed against this window unless the
/// caller supplies its own.
///
/// ```
/// # use satflow_core::defaults::*;
/// assert_eq!(
///     DEFAULT_TEST_DURATION.to_string(),
///     "1000s"
/// );
/// ```
pub const DEFAULT_TEST_DURATION: Interval = Interval::from_secs(1_000);
