use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const WEEK: i64 = 604_800;

const fn week_start_day(day: i64) -> i64 {
    day - ((day + 3).rem_euclid(7))
}

/// Bucket width used to group raw usage points when charting a window.
///
/// The numeric width of every variant tiles its calendar truncation boundary
/// exactly: hours align to the top of the hour, days to UTC midnight, and
/// weeks to Monday 00:00 UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInterval {
    /// One-hour buckets (3 600 s).
    Hour,
    /// One-day buckets (86 400 s).
    Day,
    /// One-week buckets (604 800 s), Monday-start.
    Week,
}

impl TimeInterval {
    /// Bucket width in seconds.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Hour => HOUR,
            Self::Day => DAY,
            Self::Week => WEEK,
        }
    }

    /// Select the bucket width for a window length in days.
    ///
    /// Up to three days chart hourly, up to thirty days daily, anything
    /// longer weekly. Pure and idempotent; the tiers are part of the public
    /// contract (a 3-day window is still hourly, a 31-day window is weekly).
    #[must_use]
    pub const fn step_for(duration_days: u32) -> Self {
        if duration_days <= 3 {
            Self::Hour
        } else if duration_days <= 30 {
            Self::Day
        } else {
            Self::Week
        }
    }

    /// Floor a Unix timestamp to this interval's calendar boundary.
    ///
    /// Weeks start Monday 00:00 UTC: `day - ((day + 3) % 7)`, since
    /// 1970-01-01 is a Thursday.
    #[must_use]
    pub const fn truncate(self, ts: i64) -> i64 {
        match self {
            Self::Hour => ts.div_euclid(HOUR) * HOUR,
            Self::Day => ts.div_euclid(DAY) * DAY,
            Self::Week => week_start_day(ts.div_euclid(DAY)) * DAY,
        }
    }

    /// Compact label, e.g. for axis legends.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Hour => "1h",
            Self::Day => "1d",
            Self::Week => "1w",
        }
    }

    /// Human-readable unit name.
    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
        }
    }

    /// Default presentation label for a bucket start time.
    ///
    /// Hosts with their own display layer are free to ignore these and
    /// format bucket timestamps however they like.
    #[must_use]
    pub fn format_bucket(self, ts: i64) -> String {
        let Some(dt) = DateTime::<Utc>::from_timestamp(ts, 0) else {
            return String::new();
        };
        match self {
            Self::Hour => dt.format("%H:%M").to_string(),
            Self::Day | Self::Week => dt.format("%b %-d").to_string(),
        }
    }

    /// Default presentation label for a bucket span.
    #[must_use]
    pub fn format_range(self, start: i64, end: i64) -> String {
        let (Some(s), Some(e)) = (
            DateTime::<Utc>::from_timestamp(start, 0),
            DateTime::<Utc>::from_timestamp(end, 0),
        ) else {
            return String::new();
        };
        match self {
            Self::Hour => format!("{} - {}", s.format("%H:%M"), e.format("%H:%M")),
            Self::Day | Self::Week => format!("{} - {}", s.format("%b %-d"), e.format("%b %-d")),
        }
    }
}
