//! Deterministic series builders used by tests and examples.

use chrono::Utc;
use rust_decimal::Decimal;

use tally_core::{BreakdownData, CostData, GaugeData, Sample};

const HOUR: i64 = 3_600;

/// The start of the current hour, Unix seconds.
#[must_use]
pub fn current_hour_start() -> i64 {
    let now = Utc::now().timestamp();
    now.div_euclid(HOUR) * HOUR
}

/// `count` contiguous cost buckets walking backward from `newest`, each
/// valued `value`.
#[must_use]
pub fn cost_series(newest: i64, count: usize, bucket_seconds: i64, value: i64) -> Vec<Sample<CostData>> {
    (0..count as i64)
        .map(|k| {
            Sample::new(
                newest - k * bucket_seconds,
                CostData::new(Decimal::from(value)),
            )
        })
        .collect()
}

/// `count` fine-grained live points starting at `start`, one per minute,
/// each valued `value`.
#[must_use]
pub fn minute_costs(start: i64, count: usize, value: i64) -> Vec<Sample<CostData>> {
    (0..count as i64)
        .map(|m| Sample::new(start + m * 60, CostData::new(Decimal::from(value))))
        .collect()
}

/// `count` contiguous gauge buckets walking backward from `newest`.
#[must_use]
pub fn gauge_series(newest: i64, count: usize, bucket_seconds: i64) -> Vec<Sample<GaugeData>> {
    (0..count as i64)
        .map(|k| {
            Sample::new(
                newest - k * bucket_seconds,
                GaugeData {
                    total: Decimal::from(100),
                    min: Decimal::from(1),
                    max: Decimal::from(9),
                },
            )
        })
        .collect()
}

/// `count` contiguous breakdown buckets walking backward from `newest`,
/// each carrying the given `(category, amount)` pairs.
#[must_use]
pub fn breakdown_series(
    newest: i64,
    count: usize,
    bucket_seconds: i64,
    pairs: &[(&str, i64)],
) -> Vec<Sample<BreakdownData>> {
    (0..count as i64)
        .map(|k| {
            Sample::new(
                newest - k * bucket_seconds,
                BreakdownData::from_pairs(
                    pairs.iter().map(|&(c, v)| (c, Decimal::from(v))),
                ),
            )
        })
        .collect()
}
