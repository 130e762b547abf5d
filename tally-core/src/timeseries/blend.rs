use crate::loader::UsageLoader;
use crate::sample::{PointData, Sample};
use tally_types::ScaleRatio;

/// Blend fine-grained live points for the still-open bucket into `perf`.
///
/// `perf` must be time-descending historical points; `live` holds the
/// minute-level points observed so far in the current coarse bucket. When
/// `live` is non-empty the points are reduced to one aggregate via the
/// loader's `combine`, extrapolated to a full-bucket estimate with the ratio
/// `(live_buckets_per_step + 1) / live.len()`, stamped one bucket after the
/// newest historical point (or at `fallback_anchor` when no history exists),
/// and prepended as the new most-recent bucket.
///
/// The `+ 1` in the ratio numerator is part of the contract: the estimate
/// deliberately leans above a straight per-minute extrapolation near the
/// bucket boundary, and consumers assert the exact `(m + 1) / n` factor.
pub fn blend_live<T: PointData>(
    loader: &dyn UsageLoader<T>,
    perf: &mut Vec<Sample<T>>,
    live: Vec<Sample<T>>,
    live_buckets_per_step: u32,
    bucket_seconds: i64,
    fallback_anchor: i64,
) {
    let mut live = live.into_iter();
    let Some(first) = live.next() else {
        return;
    };
    let mut count: u64 = 1;
    let aggregate = live.fold(first, |acc, next| {
        count += 1;
        loader.combine(acc, next)
    });

    let Ok(ratio) = ScaleRatio::new(u64::from(live_buckets_per_step) + 1, count) else {
        return;
    };
    let anchor = perf
        .first()
        .map_or(fallback_anchor, |newest| newest.time + bucket_seconds);
    let estimate = loader.scale(&aggregate, ratio, anchor);
    perf.insert(0, estimate);
}
