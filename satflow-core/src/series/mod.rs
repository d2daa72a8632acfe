//! Derivation of per-flow metric series from raw capture records.
//!
//! [`extract`] turns one capture's interleaved [`RawRecord`] stream into a
//! [`FlowSeries`] for one flow: a relative time axis plus one value column
//! per requested metric, with cumulative counters differenced into
//! per-interval deltas by [`differentiate`]. [`detect`] summarizes a
//! goodput delta column into an [`OutageReport`], and [`align`] puts a
//! receiver/sender pair of series onto a common time axis.

mod align;
mod diff;
mod outage;

use crate::{
    catalog::{self, MetricDescriptor, UnknownMetric},
    record::{FlowId, RawRecord, Timestamp},
};
use thiserror::Error;

pub use self::{
    align::align,
    diff::{Deltas, differentiate},
    outage::{OutageConfig, OutageConfigError, OutageReport, detect},
};

/// One derived value column of a [`FlowSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricColumn {
    /// The catalog entry this column was derived from.
    pub descriptor: &'static MetricDescriptor,
    /// One value per retained sample: raw readings for sample metrics,
    /// per-interval deltas for cumulative metrics.
    pub values: Vec<f64>,
    /// Number of negative deltas observed while differencing; always 0
    /// for sample metrics. See [`Deltas::regressions`].
    pub regressions: usize,
}

/// The time-aligned metric series of one flow in one capture.
///
/// Derived per `(capture, flow, metric list)` by [`extract`]; never
/// mutated afterwards (alignment returns shifted copies).
///
/// Invariant: every column holds exactly `relative_time.len()` values.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSeries {
    /// Absolute timestamp of the first record retained for the flow.
    ///
    /// The zero point of `relative_time`, and the quantity [`align`]
    /// compares between the two captures.
    pub capture_epoch: Timestamp,
    /// Seconds since `capture_epoch`, one entry per retained sample.
    pub relative_time: Vec<f64>,
    /// Requested metrics, sample-kind columns first.
    pub columns: Vec<MetricColumn>,
}

impl FlowSeries {
    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.relative_time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relative_time.is_empty()
    }

    /// Look up a column by metric name.
    pub fn column(&self, name: &str) -> Option<&MetricColumn> {
        self.columns
            .iter()
            .find(|column| column.descriptor.name == name)
    }
}

/// Error returned when [`extract`] cannot derive a series.
///
/// All of these are fatal for the extraction: no partial series is ever
/// returned.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A requested name is not in the metric catalog; a caller
    /// configuration mistake, not a data issue.
    #[error(transparent)]
    UnknownMetric(#[from] UnknownMetric),
    /// A requested name is a structural capture column (`id`,
    /// `timestamp`); these carry no metric semantics.
    #[error("metric `{name}` is a structural capture column and has no series")]
    StructuralMetric { name: String },
    /// No record matches the requested flow: a wrong id, or an empty
    /// capture.
    #[error("no record matches flow {flow}")]
    EmptyFlow { flow: FlowId },
}

/// Derive the [`FlowSeries`] of one flow from a capture's record stream.
///
/// Every requested name is classified against the catalog up front; any
/// unknown or structural name fails the whole extraction before any
/// series data is produced. The requested metrics are then partitioned
/// into sample-kind and cumulative-kind columns, each partition keeping
/// the caller's order, with sample columns first.
///
/// The earliest record of the flow establishes [`FlowSeries::capture_epoch`]
/// and is excluded from the output: a cumulative counter needs a
/// predecessor to produce its first delta, and sample columns stay
/// index-aligned with the delta columns by starting at the same record.
/// Each later record contributes one `relative_time` entry (seconds
/// since the epoch) and one value per sample column; cumulative columns
/// are filled by [`differentiate`] over the same filtered record set.
///
/// The capture loader guarantees one column per requested metric on
/// every record; a sample value absent despite that contract is carried
/// as `NaN`, mirroring what the columnar source would hand us.
///
/// # Errors
///
/// [`ExtractError::UnknownMetric`], [`ExtractError::StructuralMetric`],
/// or [`ExtractError::EmptyFlow`] when no record matches `flow`.
pub fn extract(
    records: &[RawRecord],
    flow: FlowId,
    metric_names: &[&str],
) -> Result<FlowSeries, ExtractError> {
    let mut sample_metrics = Vec::new();
    let mut cumulative_metrics = Vec::new();

    for name in metric_names {
        let descriptor = catalog::classify(name)?;
        if descriptor.kind.is_sample() {
            sample_metrics.push(descriptor);
        } else if descriptor.kind.is_cumulative() {
            cumulative_metrics.push(descriptor);
        } else {
            return Err(ExtractError::StructuralMetric {
                name: (*name).to_owned(),
            });
        }
    }

    let retained: Vec<&RawRecord> = records.iter().filter(|record| record.flow == flow).collect();

    let Some(first) = retained.first() else {
        return Err(ExtractError::EmptyFlow { flow });
    };
    let capture_epoch = first.timestamp;

    let mut relative_time = Vec::with_capacity(retained.len().saturating_sub(1));
    let mut sample_columns: Vec<MetricColumn> = sample_metrics
        .iter()
        .copied()
        .map(|descriptor| MetricColumn {
            descriptor,
            values: Vec::with_capacity(retained.len().saturating_sub(1)),
            regressions: 0,
        })
        .collect();

    for record in &retained[1..] {
        relative_time.push(record.timestamp.seconds_since(capture_epoch));
        for column in &mut sample_columns {
            let value = record.value(column.descriptor.name).unwrap_or(f64::NAN);
            column.values.push(value);
        }
    }

    let mut columns = sample_columns;
    for descriptor in cumulative_metrics {
        let deltas = differentiate(records, flow, descriptor.name);
        debug_assert_eq!(deltas.values.len(), relative_time.len());
        columns.push(MetricColumn {
            descriptor,
            values: deltas.values,
            regressions: deltas.regressions,
        });
    }

    Ok(FlowSeries {
        capture_epoch,
        relative_time,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 1 Hz capture with two interleaved flows, cwnd ramping and the
    /// received-bytes counter growing by a fixed step.
    fn capture(epoch_ms: u64, samples: u64) -> Vec<RawRecord> {
        let mut records = Vec::new();
        for i in 0..samples {
            for flow in [FlowId::ZERO, FlowId::ONE] {
                records.push(
                    RawRecord::new(flow, Timestamp::from_millis(epoch_ms + i * 1_000))
                        .with_value("cwnd", 10.0 + i as f64)
                        .with_value("rtt_mean", 600.0)
                        .with_value("bytes_received", i as f64 * 14_480.0),
                );
            }
        }
        records
    }

    #[test]
    fn unknown_metric_fails_before_any_output() {
        let records = capture(0, 4);
        let err = extract(&records, FlowId::ZERO, &["cwnd", "jitter"]).unwrap_err();
        assert!(matches!(err, ExtractError::UnknownMetric(_)));
    }

    #[test]
    fn structural_metric_fails() {
        let records = capture(0, 4);
        let err = extract(&records, FlowId::ZERO, &["timestamp"]).unwrap_err();
        assert!(matches!(err, ExtractError::StructuralMetric { .. }));
    }

    #[test]
    fn empty_flow_fails() {
        let records = capture(0, 4);
        let err = extract(&records, FlowId::new(7), &["cwnd"]).unwrap_err();
        assert!(matches!(err, ExtractError::EmptyFlow { .. }));
    }

    #[test]
    fn empty_capture_fails_with_empty_flow() {
        let err = extract(&[], FlowId::ZERO, &["cwnd"]).unwrap_err();
        assert!(matches!(err, ExtractError::EmptyFlow { .. }));
    }

    #[test]
    fn epoch_record_is_excluded() {
        let records = capture(5_000, 4);
        let series = extract(&records, FlowId::ZERO, &["cwnd"]).unwrap();

        assert_eq!(series.capture_epoch, Timestamp::from_millis(5_000));
        assert_eq!(series.relative_time, vec![1.0, 2.0, 3.0]);
        // the epoch record's cwnd reading (10.0) is not emitted
        assert_eq!(series.column("cwnd").unwrap().values, vec![11.0, 12.0, 13.0]);
    }

    #[test]
    fn sample_columns_precede_cumulative_columns() {
        let records = capture(0, 4);
        let series = extract(
            &records,
            FlowId::ZERO,
            // caller lists the counter first; output still puts samples first
            &["bytes_received", "rtt_mean", "cwnd"],
        )
        .unwrap();

        let names: Vec<&str> = series
            .columns
            .iter()
            .map(|column| column.descriptor.name)
            .collect();
        assert_eq!(names, vec!["rtt_mean", "cwnd", "bytes_received"]);
    }

    #[test]
    fn columns_are_index_aligned() {
        let records = capture(0, 5);
        let series = extract(&records, FlowId::ZERO, &["cwnd", "bytes_received"]).unwrap();

        assert_eq!(series.len(), 4);
        for column in &series.columns {
            assert_eq!(column.values.len(), series.len());
        }
        assert_eq!(
            series.column("bytes_received").unwrap().values,
            vec![14_480.0; 4]
        );
    }

    #[test]
    fn single_matching_record_yields_valid_empty_series() {
        let records = capture(0, 1);
        let series = extract(&records, FlowId::ZERO, &["cwnd", "bytes_received"]).unwrap();

        assert!(series.is_empty());
        assert_eq!(series.capture_epoch, Timestamp::from_millis(0));
        for column in &series.columns {
            assert!(column.values.is_empty());
        }
    }

    #[test]
    fn regressions_surface_on_the_column() {
        let mut records = Vec::new();
        for (i, total) in [0.0, 1_000.0, 200.0, 1_500.0].into_iter().enumerate() {
            records.push(
                RawRecord::new(FlowId::ZERO, Timestamp::from_millis(i as u64 * 1_000))
                    .with_value("bytes_received", total),
            );
        }

        let series = extract(&records, FlowId::ZERO, &["bytes_received"]).unwrap();
        let column = series.column("bytes_received").unwrap();
        assert_eq!(column.values, vec![1_000.0, -800.0, 1_300.0]);
        assert_eq!(column.regressions, 1);
    }

    #[test]
    fn sample_metrics_have_zero_regressions() {
        let records = capture(0, 3);
        let series = extract(&records, FlowId::ZERO, &["cwnd"]).unwrap();
        assert_eq!(series.column("cwnd").unwrap().regressions, 0);
    }

    #[test]
    fn uneven_timestamps_are_preserved() {
        let stamps = [0u64, 980, 2_020, 3_000];
        let records: Vec<RawRecord> = stamps
            .iter()
            .map(|ms| {
                RawRecord::new(FlowId::ZERO, Timestamp::from_millis(*ms)).with_value("cwnd", 1.0)
            })
            .collect();

        let series = extract(&records, FlowId::ZERO, &["cwnd"]).unwrap();
        assert_eq!(series.relative_time, vec![0.98, 2.02, 3.0]);
    }
}
