//! The bucketed data point and the algebra loading strategies apply to it.

use serde::{Deserialize, Serialize};
use tally_types::ScaleRatio;

/// One bucketed usage point: a Unix timestamp plus shape-specific data.
///
/// `time` is the bucket start in Unix seconds. Loaders may return samples in
/// any order; consumers re-sort time-descending before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample<T> {
    /// Bucket start, Unix seconds.
    pub time: i64,
    /// Shape-specific payload.
    pub data: T,
}

impl<T> Sample<T> {
    /// Build a sample from a bucket start and payload.
    pub const fn new(time: i64, data: T) -> Self {
        Self { time, data }
    }
}

/// Per-shape algebra a loading strategy uses to combine, extrapolate, and
/// synthesize points.
///
/// `merge` must be associative and commutative (it sums numeric fields);
/// `scaled` scales every numeric field by the given ratio; `zero_like`
/// produces a zero value shaped consistently with the points already
/// observed (a breakdown zero carries one entry per category seen).
pub trait PointData: Clone + Send + Sync + 'static {
    /// Combine two payloads believed to share a time bucket.
    #[must_use]
    fn merge(a: Self, b: Self) -> Self;

    /// Scale every numeric field by `ratio`.
    #[must_use]
    fn scaled(&self, ratio: ScaleRatio) -> Self;

    /// A zero payload shaped consistently with `observed`.
    #[must_use]
    fn zero_like(observed: &[Sample<Self>]) -> Self;
}
