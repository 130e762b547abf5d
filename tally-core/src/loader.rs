//! The loading-strategy trait the aggregator consumes.

use async_trait::async_trait;

use crate::sample::{PointData, Sample};
use tally_types::{ScaleRatio, TallyError};

/// Loading strategy for one usage data shape.
///
/// A loader knows how to fetch raw bucketed points for a time range and how
/// to combine, extrapolate, and synthesize points of its shape. Strategies
/// are stateless from the aggregator's point of view and are supplied fresh
/// per hosting view.
///
/// The three shape operations default to the payload's [`PointData`]
/// algebra; a strategy only overrides them when its shape needs different
/// semantics (e.g. a counter that must not be ratio-scaled).
#[async_trait]
pub trait UsageLoader<T: PointData>: Send + Sync {
    /// A stable identifier used in error tagging and logs
    /// (e.g. "tally-rest", "tally-mock").
    fn name(&self) -> &'static str;

    /// Fetch raw points bucketed at `bucket_seconds` covering
    /// `[start, end)`; an open `end` means "up to now" (used for the live
    /// minute-level fetch). Return order is not guaranteed; callers re-sort
    /// time-descending before use.
    async fn load_series(
        &self,
        bucket_seconds: i64,
        start: i64,
        end: Option<i64>,
    ) -> Result<Vec<Sample<T>>, TallyError>;

    /// Combine two points believed to share a time bucket: merged payload,
    /// newest timestamp.
    fn combine(&self, a: Sample<T>, b: Sample<T>) -> Sample<T> {
        Sample::new(a.time.max(b.time), T::merge(a.data, b.data))
    }

    /// Scale a point's payload by `ratio` and stamp it with `time`.
    fn scale(&self, item: &Sample<T>, ratio: ScaleRatio, time: i64) -> Sample<T> {
        Sample::new(time, item.data.scaled(ratio))
    }

    /// Produce one zero-valued point per requested time, shaped
    /// consistently with the points already observed.
    fn zero_fill(&self, times: &[i64], observed: &[Sample<T>]) -> Vec<Sample<T>> {
        let zero = T::zero_like(observed);
        times
            .iter()
            .map(|&t| Sample::new(t, zero.clone()))
            .collect()
    }
}
