use crate::time::DurationParseError;
use std::{fmt, str::FromStr, time::Duration};

/// An [`Interval`] is a span of capture time: the nominal spacing between
/// two instrumentation samples, or the nominal duration of a whole
/// experiment.
///
/// # Default [`Interval`]
///
/// ```
/// # use satflow_core::measure::Interval;
/// assert_eq!(
///     Interval::default().to_string(),
///     "1s"
/// )
/// ```
///
/// # resolution
///
/// Captures are timestamped with millisecond resolution, and intervals
/// share it. Constructing an [`Interval`] from a [`Duration`] with
/// sub-millisecond precision truncates the sub-millisecond part.
///
/// ```
/// # use satflow_core::measure::Interval;
/// # use std::time::Duration;
/// let interval = Interval::new(Duration::from_micros(50_999));
/// assert_eq!(interval.as_millis(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval(u64);

impl Interval {
    /// The `0` interval.
    pub const ZERO: Self = Self::from_millis(0);

    /// create a new [`Interval`] with the given [`Duration`], truncating
    /// to milliseconds.
    #[inline(always)]
    pub const fn new(duration: Duration) -> Self {
        Self(duration.as_millis() as u64)
    }

    /// create an [`Interval`] from a number of milliseconds.
    #[inline(always)]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// create an [`Interval`] from a number of seconds.
    #[inline(always)]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs * 1_000)
    }

    /// the interval in milliseconds.
    #[inline(always)]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// the interval in (fractional) seconds.
    #[inline(always)]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    /// get the inner duration
    #[inline(always)]
    pub fn into_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<Interval> for Duration {
    fn from(value: Interval) -> Self {
        value.into_duration()
    }
}
impl From<Duration> for Interval {
    fn from(value: Duration) -> Self {
        Self::new(value)
    }
}

impl Default for Interval {
    fn default() -> Self {
        crate::defaults::DEFAULT_SAMPLE_INTERVAL
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0 / 1_000;
        let millis = self.0 % 1_000;

        match (secs, millis) {
            (0, millis) => write!(f, "{millis}ms"),
            (secs, 0) => write!(f, "{secs}s"),
            (secs, millis) => write!(f, "{secs}s{millis}ms"),
        }
    }
}

impl FromStr for Interval {
    type Err = DurationParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let duration = crate::time::Duration::from_str(s)?;

        Ok(Self::new(duration.into_duration()))
    }
}
