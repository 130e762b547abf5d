//! Tally keeps dashboard usage charts loaded, blended, and current.
//!
//! Overview
//! - A [`UsageChart`] owns one chart's state for the lifetime of its hosting
//!   view: the selected [`DateWindow`], the loaded series, and the
//!   drill-down selection.
//! - Data comes through a pluggable [`UsageLoader`] strategy; the chart is
//!   generic over the point shape, so plain cost series, gauge series, and
//!   categorical breakdowns share one implementation.
//! - Every load runs the same pipeline: fetch historical and live points
//!   concurrently, blend the still-open bucket into a full-period estimate,
//!   backfill leading zeros so the series tiles the window, then publish.
//!
//! Key behaviors and trade-offs
//! - Window loads are fail-fast joins: either both fetches land and the
//!   series updates atomically, or neither does and the previous series
//!   stays visible.
//! - A newer `set_window` supersedes any in-flight one; last write wins by
//!   invocation order, not response arrival order.
//! - While the window covers "now", a 60-second tick re-fetches only the
//!   live minute buckets and re-blends them against the cached historical
//!   result, so the newest bucket tracks reality without re-querying whole
//!   ranges.
//! - Drill-down selection never errors; out-of-range requests clear the
//!   selection or, for views that must always highlight the current period,
//!   fall back to the newest bucket.
//!
//! Examples
//! Building a chart over a REST loader with retry and caching:
//! ```rust,ignore
//! use std::sync::Arc;
//! use tally::{UsageChart, DateWindow};
//! use tally_core::CostData;
//!
//! let loader = tally_rest::RestLoaderBuilder::new("https://billing.internal/api")
//!     .with_retry(Default::default())
//!     .with_cache(Default::default())
//!     .build::<CostData>()?;
//!
//! let chart = UsageChart::builder()
//!     .with_loader(loader)
//!     .events(Arc::new(view_sink))
//!     .build()?;
//!
//! chart.set_window(DateWindow::new(7, today)?).await?;
//! chart.select_step(Some(0));
//! ```
//!
//! Restoring a chart from route parameters:
//! ```rust,ignore
//! use tally::WindowParams;
//!
//! let params = WindowParams::from_query("days=7&end=2026-08-05&step=3")?;
//! chart.set_params(params).await?;
//! assert_eq!(chart.params().map(|p| p.to_query()), Some(query));
//! ```
//!
//! See `tally/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod events;
mod selection;
mod window;

pub use core::{UsageChart, UsageChartBuilder};
pub use events::{ChartEvents, SelectedStep};

pub use tally_middleware::{CachingLoader, RetryingLoader};

// Re-export core types for convenience
pub use tally_core::{
    // Foundational types
    BreakdownData,
    CategoryAmount,
    ChartConfig,
    CostData,
    DateWindow,
    GaugeData,
    PointData,
    Sample,
    ScaleRatio,
    TallyError,
    TimeDescendingSeries,
    TimeInterval,
    UsageLoader,
    WindowParams,

    BackoffConfig,
    CacheConfig,
    RetryConfig,
};
