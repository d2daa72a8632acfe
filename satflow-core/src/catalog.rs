//! The metric catalog: the static mapping from capture column name to
//! metric semantics.
//!
//! The capture files carry `ss`-style TCP instrumentation columns. Each
//! registered column is either an instantaneous [`Sample`], a monotonic
//! [`Cumulative`] counter to be differenced, or an [`Ignored`] structural
//! column (`id`, `timestamp`) that is never plottable.
//!
//! [`Sample`]: MetricKind::Sample
//! [`Cumulative`]: MetricKind::Cumulative
//! [`Ignored`]: MetricKind::Ignored

/// How the values of one capture column relate to each other over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// An instantaneous reading of flow state at capture time
    /// (e.g. the current congestion window).
    Sample,
    /// A counter that only grows over the life of a flow
    /// (e.g. total bytes received); consumed as per-interval deltas.
    Cumulative,
    /// A structural column of the capture (flow id, timestamp); carries
    /// no metric semantics and must never be requested for extraction.
    Ignored,
}

impl MetricKind {
    pub const fn is_sample(self) -> bool {
        matches!(self, MetricKind::Sample)
    }

    pub const fn is_cumulative(self) -> bool {
        matches!(self, MetricKind::Cumulative)
    }
}

/// One registered capture column: its name, its [`MetricKind`] and the
/// value range an external renderer should use for its axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDescriptor {
    /// exact, case-sensitive capture column name.
    pub name: &'static str,
    pub kind: MetricKind,
    /// `(min, max)` axis hint for the renderer; observed values outside
    /// this range are clipped at display time, not here.
    pub display_bounds: (f64, f64),
}

const fn sample(name: &'static str, display_bounds: (f64, f64)) -> MetricDescriptor {
    MetricDescriptor {
        name,
        kind: MetricKind::Sample,
        display_bounds,
    }
}

const fn cumulative(name: &'static str, display_bounds: (f64, f64)) -> MetricDescriptor {
    MetricDescriptor {
        name,
        kind: MetricKind::Cumulative,
        display_bounds,
    }
}

const fn ignored(name: &'static str) -> MetricDescriptor {
    MetricDescriptor {
        name,
        kind: MetricKind::Ignored,
        display_bounds: (0.0, 0.0),
    }
}

/// Every column the instrumentation is known to emit.
///
/// Rates are in bytes per second as the kernel reports them; window and
/// segment counts are unitless. The bounds are generous enough for the
/// GEO-latency end of the emulated constellations.
pub const CATALOG: &[MetricDescriptor] = &[
    // structural columns
    ignored("id"),
    ignored("timestamp"),
    // instantaneous samples
    sample("cwnd", (0.0, 10_000.0)),
    sample("ssthresh", (0.0, 10_000.0)),
    sample("rtt_mean", (0.0, 2_000.0)),
    sample("rtt_var", (0.0, 1_000.0)),
    sample("send_rate", (0.0, 125_000_000.0)),
    sample("pacing_rate", (0.0, 125_000_000.0)),
    sample("delivery_rate", (0.0, 125_000_000.0)),
    sample("unacked", (0.0, 10_000.0)),
    // monotonic counters
    cumulative("bytes_received", (0.0, 125_000_000.0)),
    cumulative("bytes_acked", (0.0, 125_000_000.0)),
    cumulative("bytes_sent", (0.0, 125_000_000.0)),
    cumulative("bytes_retrans", (0.0, 12_500_000.0)),
    cumulative("segs_in", (0.0, 100_000.0)),
    cumulative("segs_out", (0.0, 100_000.0)),
    cumulative("retrans", (0.0, 10_000.0)),
];

/// Error returned when a requested name is not a registered capture column.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown metric `{0}`")]
pub struct UnknownMetric(pub String);

/// Look up the [`MetricDescriptor`] for a capture column name.
///
/// Names are matched exactly (case-sensitive). The catalog is static and
/// immutable, so descriptors can be held and shared freely, including
/// across threads.
///
/// # Example
///
/// ```
/// use satflow_core::catalog::{self, MetricKind};
///
/// let cwnd = catalog::classify("cwnd").unwrap();
/// assert_eq!(cwnd.kind, MetricKind::Sample);
///
/// let goodput = catalog::classify("bytes_received").unwrap();
/// assert_eq!(goodput.kind, MetricKind::Cumulative);
///
/// assert!(catalog::classify("jitter").is_err());
/// ```
pub fn classify(name: &str) -> Result<&'static MetricDescriptor, UnknownMetric> {
    CATALOG
        .iter()
        .find(|descriptor| descriptor.name == name)
        .ok_or_else(|| UnknownMetric(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn classify_known() {
        assert_eq!(classify("rtt_mean").unwrap().kind, MetricKind::Sample);
        assert_eq!(classify("segs_out").unwrap().kind, MetricKind::Cumulative);
        assert_eq!(classify("timestamp").unwrap().kind, MetricKind::Ignored);
    }

    #[test]
    fn classify_unknown() {
        let err = classify("jitter").unwrap_err();
        assert_eq!(err.to_string(), "unknown metric `jitter`");
    }

    #[test]
    fn classify_is_case_sensitive() {
        assert!(classify("Cwnd").is_err());
        assert!(classify("CWND").is_err());
    }

    #[test]
    fn goodput_counter_is_registered_cumulative() {
        let goodput = classify(crate::defaults::GOODPUT_METRIC).unwrap();
        assert!(goodput.kind.is_cumulative());
    }
}
