/*!
# satflow

Comparison assembly over [`satflow_core`]: one [`Comparison`] request
extracts a receiver-side and a sender-side [`FlowSeries`], puts them on
a common time axis and, when asked, attaches a goodput
[`OutageReport`](satflow_core::series::OutageReport). The result is an
[`AlignedPair`] ready for an external renderer.
*/

mod compare;
mod summary;

// convenient re-export of `satflow_core` core objects
pub use satflow_core::{
    BitRate, ExtractError, FlowId, FlowSeries, Interval, MetricColumn, MetricDescriptor,
    MetricKind, RawRecord, Timestamp,
    series::{OutageConfig, OutageReport},
};

pub use self::{
    compare::{AlignedPair, CaptureQuery, Comparison, ComparisonBuilder, IncompleteComparison},
    summary::{ColumnSummary, SeriesSummary},
};

#[cfg(test)]
mod tests {
    use super::*;
    use satflow_core::defaults;

    /// Emulated two-capture experiment: the sender log starts 1.5s
    /// before the receiver log, both sample at 1 Hz, and the receiver's
    /// byte counter stalls for a stretch mid-run.
    fn experiment() -> (Vec<RawRecord>, Vec<RawRecord>) {
        let receiver_epoch = 3_500u64;
        let sender_epoch = 2_000u64;

        let receiver: Vec<RawRecord> = (0..10)
            .map(|i| {
                // goodput stalls between samples 4 and 7
                let total = match i {
                    0..=4 => i as f64 * 125_000.0,
                    5..=7 => 4.0 * 125_000.0,
                    _ => (i - 3) as f64 * 125_000.0,
                };
                RawRecord::new(
                    FlowId::ZERO,
                    Timestamp::from_millis(receiver_epoch + i as u64 * 1_000),
                )
                .with_value("rtt_mean", 550.0 + i as f64)
                .with_value("bytes_received", total)
            })
            .collect();

        let sender: Vec<RawRecord> = (0..10)
            .map(|i| {
                RawRecord::new(
                    FlowId::ZERO,
                    Timestamp::from_millis(sender_epoch + i as u64 * 1_000),
                )
                .with_value("cwnd", 10.0 + i as f64)
                .with_value("bytes_sent", i as f64 * 125_000.0)
            })
            .collect();

        (receiver, sender)
    }

    #[test]
    fn end_to_end_comparison() {
        let (receiver_records, sender_records) = experiment();

        let outage = OutageConfig::new(
            defaults::DEFAULT_OUTAGE_THRESHOLD,
            Interval::from_secs(1),
            Interval::from_secs(9),
        )
        .unwrap();

        let pair = Comparison::builder()
            .title("cubic, 10s route updates")
            .receiver(FlowId::ZERO, &["rtt_mean", "bytes_received"])
            .sender(FlowId::ZERO, &["cwnd", "bytes_sent"])
            .outage(outage)
            .build()
            .unwrap()
            .assemble(&receiver_records, &sender_records)
            .unwrap();

        // the receiver capture started 1.5s after the sender: its axis
        // is shifted, the sender's is not
        assert_eq!(pair.sender.relative_time[0], 1.0);
        assert_eq!(pair.receiver.relative_time[0], 2.5);

        // 9 retained samples per side (epoch record excluded)
        assert_eq!(pair.receiver.len(), 9);
        assert_eq!(pair.sender.len(), 9);

        // the stalled stretch shows up as three zero deltas closing on
        // the next advancing sample: (3 - 1) * 1000ms
        let outage = pair.outage.expect("goodput was requested");
        assert_eq!(outage.intervals_ms, vec![2_000]);
        assert_eq!(outage.total_unavailable_ms, 2_000);
        assert!((outage.availability - (9_000.0 - 2_000.0) / 9_000.0).abs() < 1e-12);

        // renderer summaries come straight off the aligned series
        let summary = SeriesSummary::of(&pair.sender);
        assert_eq!(summary.column("cwnd").unwrap().max, 19.0);
    }
}
