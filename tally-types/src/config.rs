//! Configuration types shared across the aggregator and loader middleware.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Global configuration for a `UsageChart` aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Cadence of the live-data refresh tick while the window covers "now".
    pub live_refresh_period: Duration,
    /// Minimum time past the top of the current hour before live data is
    /// worth fetching at all.
    pub live_threshold: Duration,
    /// How many fine-grained live buckets tile one coarse bucket
    /// (60 one-minute buckets per hour).
    pub live_buckets_per_step: u32,
    /// When a requested drill-down index is out of range, fall back to the
    /// newest bucket instead of clearing the selection. Used by views that
    /// must always highlight the current period.
    pub enforce_step_selection: bool,
    /// Timeout for individual loader requests.
    pub loader_timeout: Duration,
    /// Optional overall deadline for the historical+live join of one
    /// `set_window` call. When exceeded, the whole operation fails with
    /// `RequestTimeout`.
    pub request_timeout: Option<Duration>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            live_refresh_period: Duration::from_secs(60),
            live_threshold: Duration::from_secs(60),
            live_buckets_per_step: 60,
            enforce_step_selection: false,
            loader_timeout: Duration::from_secs(5),
            request_timeout: None,
        }
    }
}

/// Exponential backoff configuration for retrying loader calls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Delay before the first retry, in milliseconds.
    pub min_backoff_ms: u64,
    /// Ceiling the delay never grows past, in milliseconds.
    pub max_backoff_ms: u64,
    /// Multiplier applied to the delay after each failed attempt (>= 1).
    pub factor: u32,
    /// Random jitter percentage [0, 100] stretched onto each delay so
    /// concurrent charts do not retry in lockstep.
    pub jitter_percent: u8,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            min_backoff_ms: 500,
            max_backoff_ms: 30_000,
            factor: 2,
            jitter_percent: 20,
        }
    }
}

/// Configuration for the retrying loader wrapper.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Backoff schedule between attempts.
    pub backoff: BackoffConfig,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            backoff: BackoffConfig::default(),
            max_retries: 3,
        }
    }
}

/// Configuration for the caching loader wrapper.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached responses.
    pub capacity: u64,
    /// Time-to-live for each cached response.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            ttl: Duration::from_secs(300),
        }
    }
}
