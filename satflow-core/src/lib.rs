/*!
# satflow-core

Post-processing primitives for per-flow TCP instrumentation captured
during satellite-network emulation runs.

A capture is a finite stream of [`RawRecord`]s from one vantage point
(sender or receiver). The pipeline derives, per flow, a [`FlowSeries`]:
a relative time axis plus one column per requested metric, where
monotonic counters have been differenced into per-interval deltas. Two
captures are put on a common time axis with [`series::align`], and the
goodput delta column can be summarized into an
[`OutageReport`](series::OutageReport) with [`series::detect`].

Everything here is a pure, batch, in-memory transform: inputs are owned
or borrowed record slices, outputs are freshly built values, and the
[metric catalog](catalog) is static data safe to share between
concurrently running comparisons.

```
use satflow_core::{FlowId, RawRecord, Timestamp, series};

let records: Vec<RawRecord> = (0..4)
    .map(|i| {
        RawRecord::new(FlowId::ZERO, Timestamp::from_millis(i * 1_000))
            .with_value("cwnd", 10.0)
            .with_value("bytes_received", i as f64 * 14_480.0)
    })
    .collect();

let series = series::extract(&records, FlowId::ZERO, &["cwnd", "bytes_received"]).unwrap();
assert_eq!(series.len(), 3);
assert_eq!(series.column("bytes_received").unwrap().values, vec![14_480.0; 3]);
```
*/

pub mod catalog;
pub mod defaults;
pub mod measure;
mod record;
pub mod series;
pub(crate) mod time;

pub use self::{
    catalog::{MetricDescriptor, MetricKind, UnknownMetric},
    measure::{BitRate, Interval},
    record::{FlowId, RawRecord, Timestamp},
    series::{ExtractError, FlowSeries, MetricColumn},
    time::DurationParseError,
};
