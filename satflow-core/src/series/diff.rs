use crate::record::{FlowId, RawRecord};

/// The per-interval deltas of one cumulative counter for one flow.
///
/// `regressions` counts how many deltas came out negative. A monotonic
/// counter never regresses; a non-zero count signals a counter reset or
/// out-of-order capture, and a high count a corrupted one. The negative
/// values themselves stay in `values` untouched; downstream consumers
/// treat them as low/zero-throughput samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Deltas {
    pub values: Vec<f64>,
    pub regressions: usize,
}

/// Difference a cumulative counter's readings, filtered to one flow, into
/// per-sample-interval deltas.
///
/// The first retained reading is the baseline: it has no predecessor to
/// difference against and contributes no output. With `n` retained
/// readings the output holds `max(0, n - 1)` deltas.
///
/// A record is retained when its flow matches *and* it carries the
/// metric column.
///
/// # Example
///
/// ```
/// use satflow_core::{FlowId, RawRecord, Timestamp, series};
///
/// let records: Vec<RawRecord> = [0u64, 1_000, 3_500, 3_500]
///     .into_iter()
///     .enumerate()
///     .map(|(i, total)| {
///         RawRecord::new(FlowId::ZERO, Timestamp::from_millis(i as u64 * 1_000))
///             .with_value("bytes_received", total as f64)
///     })
///     .collect();
///
/// let deltas = series::differentiate(&records, FlowId::ZERO, "bytes_received");
/// assert_eq!(deltas.values, vec![1_000.0, 2_500.0, 0.0]);
/// assert_eq!(deltas.regressions, 0);
/// ```
pub fn differentiate(records: &[RawRecord], flow: FlowId, metric: &str) -> Deltas {
    let readings: Vec<f64> = records
        .iter()
        .filter(|record| record.flow == flow)
        .filter_map(|record| record.value(metric))
        .collect();

    let values: Vec<f64> = readings
        .iter()
        .zip(readings.iter().skip(1))
        .map(|(previous, current)| current - previous)
        .collect();

    let regressions = values.iter().filter(|delta| **delta < 0.0).count();

    Deltas {
        values,
        regressions,
    }
}
