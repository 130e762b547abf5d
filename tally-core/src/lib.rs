//! tally-core
//!
//! Core types, traits, and utilities shared across the tally ecosystem.
//!
//! - `sample`: the bucketed data point and the per-shape merge/scale/zero algebra.
//! - `shapes`: built-in point shapes (plain cost, gauge, categorical breakdown).
//! - `loader`: the `UsageLoader` loading-strategy trait.
//! - `series`: the time-descending series wrapper (index 0 = newest bucket).
//! - `timeseries`: pure blend-and-backfill algorithms over a loaded window.
//!
//! Async runtime (Tokio)
//! ---------------------
//! This crate assumes the Tokio ecosystem as the async runtime. The
//! `ticker::TickerHandle` used by the aggregator's live refresh wraps
//! `tokio::task::JoinHandle<()>` and uses `tokio::sync::oneshot::Sender<()>`
//! for cooperative shutdown, so code driving a live chart must run under a
//! Tokio 1.x runtime.
#![warn(missing_docs)]

pub mod loader;
pub mod sample;
pub mod series;
/// Built-in point shapes implementing the [`sample::PointData`] algebra.
pub mod shapes;
/// Cancel-on-drop handle for the live-refresh background task.
pub mod ticker;
/// Time-series utilities: live blending and leading zero backfill.
pub mod timeseries;

pub use loader::UsageLoader;
pub use sample::{PointData, Sample};
pub use series::TimeDescendingSeries;
pub use shapes::{BreakdownData, CategoryAmount, CostData, GaugeData};
pub use tally_types::{
    BackoffConfig, CacheConfig, ChartConfig, DateWindow, RetryConfig, ScaleRatio, TallyError,
    TimeInterval, WindowParams,
};
pub use timeseries::{backfill_zeros, blend_live};
