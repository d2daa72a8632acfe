use satflow_core::{
    FlowId, FlowSeries, RawRecord, defaults,
    series::{self, ExtractError, OutageConfig, OutageReport},
};
use thiserror::Error;

/// What to extract from one capture: the flow and the metric columns.
///
/// By convention the metric list names sample-kind metrics first, so the
/// requested order and the derived column order coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureQuery {
    pub flow: FlowId,
    pub metrics: Vec<String>,
}

impl CaptureQuery {
    pub fn new(flow: FlowId, metrics: &[&str]) -> Self {
        Self {
            flow,
            metrics: metrics.iter().map(|name| (*name).to_owned()).collect(),
        }
    }

    fn metric_names(&self) -> Vec<&str> {
        self.metrics.iter().map(String::as_str).collect()
    }
}

/// One parameterized comparison between a receiver-side and a
/// sender-side capture.
///
/// A single request record replaces per-experiment entry points: the
/// experiment matrix becomes a table of `Comparison` values, each built
/// once and applied to its pair of record sets.
///
/// # Example
///
/// ```
/// use satflow::Comparison;
/// use satflow_core::FlowId;
///
/// let comparison = Comparison::builder()
///     .title("cubic, 10s route updates")
///     .receiver(FlowId::ZERO, &["cwnd", "bytes_received"])
///     .sender(FlowId::ZERO, &["cwnd", "bytes_sent"])
///     .build()
///     .unwrap();
/// # assert_eq!(comparison.title(), "cubic, 10s route updates");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    title: String,
    receiver: CaptureQuery,
    sender: CaptureQuery,
    outage: Option<OutageConfig>,
}

/// Builder for [`Comparison`].
///
/// Obtained via [`Comparison::builder`]; both capture queries are
/// required, the title and outage detection are optional.
#[derive(Debug, Clone, Default)]
pub struct ComparisonBuilder {
    title: Option<String>,
    receiver: Option<CaptureQuery>,
    sender: Option<CaptureQuery>,
    outage: Option<OutageConfig>,
}

/// Error returned when [`ComparisonBuilder::build`] is missing a side.
#[derive(Debug, Clone, Copy, Error)]
pub enum IncompleteComparison {
    #[error("comparison has no receiver-side capture query")]
    MissingReceiver,
    #[error("comparison has no sender-side capture query")]
    MissingSender,
}

impl ComparisonBuilder {
    /// Set the human-readable experiment title carried through to the
    /// renderer.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the receiver-side flow and metric list.
    pub fn receiver(mut self, flow: FlowId, metrics: &[&str]) -> Self {
        self.receiver = Some(CaptureQuery::new(flow, metrics));
        self
    }

    /// Set the sender-side flow and metric list.
    pub fn sender(mut self, flow: FlowId, metrics: &[&str]) -> Self {
        self.sender = Some(CaptureQuery::new(flow, metrics));
        self
    }

    /// Request an [`OutageReport`] over the receiver-side goodput
    /// deltas.
    ///
    /// The report is attached only when the receiver metric list also
    /// names the goodput counter ([`defaults::GOODPUT_METRIC`]).
    pub fn outage(mut self, config: OutageConfig) -> Self {
        self.outage = Some(config);
        self
    }

    pub fn build(self) -> Result<Comparison, IncompleteComparison> {
        let receiver = self.receiver.ok_or(IncompleteComparison::MissingReceiver)?;
        let sender = self.sender.ok_or(IncompleteComparison::MissingSender)?;

        Ok(Comparison {
            title: self.title.unwrap_or_default(),
            receiver,
            sender,
            outage: self.outage,
        })
    }
}

/// A receiver/sender pair of [`FlowSeries`] on a common time axis,
/// ready for the external renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub title: String,
    pub receiver: FlowSeries,
    pub sender: FlowSeries,
    /// Present when outage detection was configured and the receiver
    /// query included the goodput counter.
    pub outage: Option<OutageReport>,
}

impl Comparison {
    pub fn builder() -> ComparisonBuilder {
        ComparisonBuilder::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Run the pipeline for both captures and align the results.
    ///
    /// Extracts each side with its own query, aligns the two series on
    /// a common time axis, and, when configured, attaches the outage
    /// report computed over the receiver's goodput delta column. No
    /// other side effects; calling it twice with the same inputs gives
    /// the same result.
    ///
    /// # Errors
    ///
    /// Propagates [`ExtractError`] from either side; nothing partial is
    /// returned.
    pub fn assemble(
        &self,
        receiver_records: &[RawRecord],
        sender_records: &[RawRecord],
    ) -> Result<AlignedPair, ExtractError> {
        let receiver = series::extract(
            receiver_records,
            self.receiver.flow,
            &self.receiver.metric_names(),
        )?;
        let sender = series::extract(
            sender_records,
            self.sender.flow,
            &self.sender.metric_names(),
        )?;

        let (receiver, sender) = series::align(receiver, sender);

        let outage = self.outage.as_ref().and_then(|config| {
            receiver
                .column(defaults::GOODPUT_METRIC)
                .map(|column| series::detect(&column.values, config))
        });

        Ok(AlignedPair {
            title: self.title.clone(),
            receiver,
            sender,
            outage,
        })
    }
}
