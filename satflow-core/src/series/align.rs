use super::FlowSeries;

/// Put two independently-started captures on a common time axis.
///
/// The receiver-side and sender-side instrumentation start at different
/// wall-clock instants, so each capture's relative times are zeroed on
/// its own epoch. The capture that started *later* has the epoch offset
/// (in seconds) added to every relative time, so both axes share the
/// zero point of the earlier capture. Exactly one series is ever
/// shifted; equal epochs return both unchanged, which also makes the
/// operation idempotent in that case.
///
/// # Example
///
/// ```
/// use satflow_core::{FlowId, RawRecord, Timestamp, series};
///
/// let capture = |epoch_ms: u64| -> Vec<RawRecord> {
///     (0..3)
///         .map(|i| {
///             RawRecord::new(FlowId::ZERO, Timestamp::from_millis(epoch_ms + i * 1_000))
///                 .with_value("cwnd", 10.0)
///         })
///         .collect()
/// };
///
/// let receiver = series::extract(&capture(1_000), FlowId::ZERO, &["cwnd"]).unwrap();
/// let sender = series::extract(&capture(1_500), FlowId::ZERO, &["cwnd"]).unwrap();
///
/// let (receiver, sender) = series::align(receiver, sender);
/// // the sender started 0.5s later: its samples sit 0.5s further along
/// // the shared axis
/// assert_eq!(receiver.relative_time, vec![1.0, 2.0]);
/// assert_eq!(sender.relative_time, vec![1.5, 2.5]);
/// ```
pub fn align(receiver: FlowSeries, sender: FlowSeries) -> (FlowSeries, FlowSeries) {
    let offset_ms = receiver.capture_epoch.millis_since(sender.capture_epoch);

    if offset_ms == 0 {
        (receiver, sender)
    } else if offset_ms < 0 {
        // receiver epoch earlier: the sender started later and shifts
        let shift = -offset_ms as f64 / 1_000.0;
        (receiver, shifted(sender, shift))
    } else {
        // sender epoch earlier: the receiver started later and shifts
        let shift = offset_ms as f64 / 1_000.0;
        (shifted(receiver, shift), sender)
    }
}

fn shifted(mut series: FlowSeries, seconds: f64) -> FlowSeries {
    for t in &mut series.relative_time {
        *t += seconds;
    }
    series
}
