use crate::loader::UsageLoader;
use crate::sample::{PointData, Sample};

/// Append zero-valued buckets for the stretch of the window preceding the
/// earliest real data point, so the charted series has no leading gap (e.g.
/// buckets from before the monitored entity existed).
///
/// `perf` must be time-descending. The walk anchors at the oldest time
/// present and steps backward by `bucket_seconds` while still inside
/// `window_start`; with fewer than two points present it anchors at
/// `now_anchor` instead (typically "now" truncated to the bucket width),
/// even when a lone real point exists.
pub fn backfill_zeros<T: PointData>(
    loader: &dyn UsageLoader<T>,
    perf: &mut Vec<Sample<T>>,
    window_start: i64,
    bucket_seconds: i64,
    now_anchor: i64,
) {
    let anchor = match perf.last() {
        Some(oldest) if perf.len() >= 2 => oldest.time,
        _ => now_anchor,
    };

    let mut missing = Vec::new();
    let mut t = anchor - bucket_seconds;
    while t >= window_start {
        missing.push(t);
        t -= bucket_seconds;
    }
    if missing.is_empty() {
        return;
    }

    let zeros = loader.zero_fill(&missing, perf);
    perf.extend(zeros);
}
