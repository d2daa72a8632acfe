use anyhow::anyhow;
use std::{fmt, str};

/// The identifier of one direction of one TCP connection within a capture.
///
/// Flow ids are small integers assigned by the instrumentation at the
/// capture point; the same id in two different captures does not refer to
/// the same flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlowId(u64);

impl FlowId {
    pub const ZERO: Self = FlowId::new(0);
    pub const ONE: Self = FlowId::new(1);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl str::FromStr for FlowId {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self).map_err(|error| anyhow!("{error}"))
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An absolute capture time in milliseconds since the Unix epoch.
///
/// Milliseconds are the capture resolution: the instrumentation stamps
/// each sample with a millisecond wall-clock time, and two captures are
/// aligned by comparing these stamps directly.
///
/// # Example
///
/// ```
/// use satflow_core::Timestamp;
///
/// let epoch = Timestamp::from_millis(1_000);
/// let later = Timestamp::from_millis(2_500);
///
/// assert_eq!(later.millis_since(epoch), 1_500);
/// assert_eq!(later.seconds_since(epoch), 1.5);
/// // differences are signed
/// assert_eq!(epoch.millis_since(later), -1_500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// create a [`Timestamp`] from milliseconds since the Unix epoch.
    #[inline(always)]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// milliseconds since the Unix epoch.
    #[inline(always)]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// signed offset of `self` relative to `earlier`, in milliseconds.
    #[inline(always)]
    pub const fn millis_since(self, earlier: Timestamp) -> i64 {
        self.0 as i64 - earlier.0 as i64
    }

    /// signed offset of `self` relative to `earlier`, in fractional seconds.
    #[inline(always)]
    pub fn seconds_since(self, earlier: Timestamp) -> f64 {
        self.millis_since(earlier) as f64 / 1_000.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// One instrumentation sample as captured at one vantage point.
///
/// Records for multiple flows are interleaved in arrival order within a
/// capture; that order defines the sampling sequence and is preserved by
/// every downstream derivation.
///
/// Metric values are stored in capture column order and looked up by
/// name; a capture carries a handful of columns, so lookup is a linear
/// scan.
///
/// # Example
///
/// ```
/// use satflow_core::{FlowId, RawRecord, Timestamp};
///
/// let record = RawRecord::new(FlowId::ZERO, Timestamp::from_millis(1_000))
///     .with_value("cwnd", 10.0)
///     .with_value("bytes_received", 14_480.0);
///
/// assert_eq!(record.value("cwnd"), Some(10.0));
/// assert_eq!(record.value("rtt_mean"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// the flow this sample belongs to.
    pub flow: FlowId,
    /// absolute wall-clock time of the sample.
    pub timestamp: Timestamp,
    values: Vec<(String, f64)>,
}

impl RawRecord {
    /// create a record with no metric values yet.
    pub fn new(flow: FlowId, timestamp: Timestamp) -> Self {
        Self {
            flow,
            timestamp,
            values: Vec::new(),
        }
    }

    /// add a metric value, builder style.
    pub fn with_value(mut self, metric: impl Into<String>, value: f64) -> Self {
        self.values.push((metric.into(), value));
        self
    }

    /// look up a metric value by its exact (case-sensitive) column name.
    pub fn value(&self, metric: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == metric)
            .map(|(_, value)| *value)
    }
}
