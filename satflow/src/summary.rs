//! Renderer-facing summaries of derived series.
//!
//! The visualization side needs axis ranges and headline numbers without
//! re-walking the series; [`SeriesSummary::of`] computes them once per
//! [`FlowSeries`].

use satflow_core::{FlowSeries, MetricDescriptor};

/// Observed value statistics of one [`MetricColumn`].
///
/// Non-finite values (a `NaN` carried through from a sparse capture) are
/// ignored; a column with no finite value summarizes to all zeroes.
///
/// [`MetricColumn`]: satflow_core::MetricColumn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    pub descriptor: &'static MetricDescriptor,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ColumnSummary {
    /// The axis range the renderer should use for this column: the
    /// observed range clipped into the catalog's display bounds.
    pub fn display_range(&self) -> (f64, f64) {
        let (lower, upper) = self.descriptor.display_bounds;
        (self.min.max(lower), self.max.min(upper))
    }
}

/// Per-column statistics and the time span of one [`FlowSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    /// Seconds between the first and last retained sample; `0.0` for a
    /// series with fewer than two samples.
    pub span_seconds: f64,
    /// One summary per column, in column order.
    pub columns: Vec<ColumnSummary>,
}

impl SeriesSummary {
    pub fn of(series: &FlowSeries) -> Self {
        let span_seconds = match (series.relative_time.first(), series.relative_time.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        };

        let columns = series
            .columns
            .iter()
            .map(|column| {
                let mut min = f64::INFINITY;
                let mut max = f64::NEG_INFINITY;
                let mut sum = 0.0;
                let mut finite = 0usize;

                for value in &column.values {
                    if !value.is_finite() {
                        continue;
                    }
                    min = min.min(*value);
                    max = max.max(*value);
                    sum += value;
                    finite += 1;
                }

                if finite == 0 {
                    ColumnSummary {
                        descriptor: column.descriptor,
                        min: 0.0,
                        max: 0.0,
                        mean: 0.0,
                    }
                } else {
                    ColumnSummary {
                        descriptor: column.descriptor,
                        min,
                        max,
                        mean: sum / finite as f64,
                    }
                }
            })
            .collect();

        Self {
            span_seconds,
            columns,
        }
    }

    /// Look up a column summary by metric name.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns
            .iter()
            .find(|summary| summary.descriptor.name == name)
    }
}
