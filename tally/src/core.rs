use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tally_core::ticker::TickerHandle;
use tally_core::{PointData, Sample, TimeDescendingSeries, UsageLoader};
use tally_types::{ChartConfig, DateWindow, TallyError, TimeInterval, WindowParams};

use crate::events::{ChartEvents, NoopEvents};

/// Aggregator that keeps one dashboard chart's series loaded, blended, and
/// current for the lifetime of its hosting view.
///
/// Cheap to clone; clones share the same state and generation, so a host can
/// hand one handle to its routing layer and another to its render layer.
pub struct UsageChart<T: PointData> {
    pub(crate) inner: Arc<ChartInner<T>>,
}

impl<T: PointData> Clone for UsageChart<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

pub(crate) struct ChartState<T> {
    pub(crate) window: Option<DateWindow>,
    pub(crate) interval: TimeInterval,
    pub(crate) series: TimeDescendingSeries<T>,
    /// Raw historical points from the last successful load, re-blended
    /// against fresh live data on every tick.
    pub(crate) historical: Vec<Sample<T>>,
    pub(crate) selected: Option<usize>,
    pub(crate) ticker: Option<TickerHandle>,
}

pub(crate) struct ChartInner<T: PointData> {
    pub(crate) loader: Arc<dyn UsageLoader<T>>,
    pub(crate) events: Arc<dyn ChartEvents<T>>,
    pub(crate) cfg: ChartConfig,
    /// Bumped by every `set_window` and by `dispose`; async continuations
    /// compare their captured value before touching state, which makes
    /// "last write wins" explicit and disposal races no-ops.
    pub(crate) generation: AtomicU64,
    pub(crate) state: Mutex<ChartState<T>>,
}

impl<T: PointData> ChartInner<T> {
    pub(crate) fn lock_state(&self) -> MutexGuard<'_, ChartState<T>> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub(crate) fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Wrap a loader future with the per-call timeout and standardized
    /// timeout error mapping.
    pub(crate) async fn loader_call_with_timeout<R, Fut>(&self, fut: Fut) -> Result<R, TallyError>
    where
        Fut: core::future::Future<Output = Result<R, TallyError>>,
    {
        (tokio::time::timeout(self.cfg.loader_timeout, fut).await)
            .unwrap_or_else(|_| Err(TallyError::loader_timeout(self.loader.name())))
    }
}

/// Builder for constructing a [`UsageChart`] with custom configuration.
pub struct UsageChartBuilder<T: PointData> {
    loader: Option<Arc<dyn UsageLoader<T>>>,
    events: Option<Arc<dyn ChartEvents<T>>>,
    cfg: ChartConfig,
}

impl<T: PointData> Default for UsageChartBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PointData> UsageChartBuilder<T> {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts without a loader; you must supply one via [`with_loader`].
    /// - Defaults are conservative: 60 s live refresh, 60 s live threshold,
    ///   60 live buckets per step, no step-selection enforcement, 5 s loader
    ///   timeout, no overall deadline.
    ///
    /// [`with_loader`]: UsageChartBuilder::with_loader
    #[must_use]
    pub fn new() -> Self {
        Self {
            loader: None,
            events: None,
            cfg: ChartConfig::default(),
        }
    }

    /// Supply the loading strategy the chart fetches through.
    #[must_use]
    pub fn with_loader(mut self, loader: Arc<dyn UsageLoader<T>>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Supply the host's callback sink. Charts built without one run with
    /// no-op events (useful for headless tests of the loading path).
    #[must_use]
    pub fn events(mut self, events: Arc<dyn ChartEvents<T>>) -> Self {
        self.events = Some(events);
        self
    }

    /// Force-select the newest bucket whenever a requested drill-down is out
    /// of range.
    ///
    /// Behavior and trade-offs:
    /// - With enforcement on, the chart always has a selection while data is
    ///   present, which suits "current day" views that must highlight the
    ///   running hour.
    /// - With enforcement off, out-of-range requests clear the selection.
    #[must_use]
    pub const fn enforce_step_selection(mut self, yes: bool) -> Self {
        self.cfg.enforce_step_selection = yes;
        self
    }

    /// Set the cadence of the live refresh tick.
    ///
    /// Behavior and trade-offs:
    /// - Shorter periods track the open bucket more closely at the cost of
    ///   more upstream load; each tick replaces the previous one, so a slow
    ///   loader never stacks overlapping refreshes.
    #[must_use]
    pub const fn live_refresh_period(mut self, period: std::time::Duration) -> Self {
        self.cfg.live_refresh_period = period;
        self
    }

    /// Set how long after the top of the hour live data becomes worth
    /// fetching.
    #[must_use]
    pub const fn live_threshold(mut self, threshold: std::time::Duration) -> Self {
        self.cfg.live_threshold = threshold;
        self
    }

    /// Set how many fine-grained live buckets tile one coarse bucket.
    #[must_use]
    pub const fn live_buckets_per_step(mut self, buckets: u32) -> Self {
        self.cfg.live_buckets_per_step = buckets;
        self
    }

    /// Set the per-call loader timeout.
    #[must_use]
    pub const fn loader_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.loader_timeout = timeout;
        self
    }

    /// Set an overall deadline for the historical+live join of one
    /// `set_window`.
    ///
    /// Behavior and trade-offs:
    /// - Bounds total latency even when both fetches crawl; on expiry the
    ///   whole operation fails with `RequestTimeout` and the previous series
    ///   stays on screen.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Replace the whole configuration at once.
    #[must_use]
    pub fn config(mut self, cfg: ChartConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the chart.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no loader has been supplied via
    /// [`UsageChartBuilder::with_loader`].
    pub fn build(self) -> Result<UsageChart<T>, TallyError> {
        let loader = self.loader.ok_or_else(|| {
            TallyError::invalid_arg("no loader supplied; add one via with_loader(...)")
        })?;
        let events = self.events.unwrap_or_else(|| Arc::new(NoopEvents));
        Ok(UsageChart {
            inner: Arc::new(ChartInner {
                loader,
                events,
                cfg: self.cfg,
                generation: AtomicU64::new(0),
                state: Mutex::new(ChartState {
                    window: None,
                    interval: TimeInterval::Hour,
                    series: TimeDescendingSeries::empty(),
                    historical: Vec::new(),
                    selected: None,
                    ticker: None,
                }),
            }),
        })
    }
}

impl<T: PointData> UsageChart<T> {
    /// Start building a new chart.
    ///
    /// Typical usage chains the loader and host sink, e.g.:
    ///
    /// ```rust,ignore
    /// let chart = UsageChart::builder()
    ///     .with_loader(loader)
    ///     .events(view_sink)
    ///     .enforce_step_selection(true)
    ///     .build()?;
    /// chart.set_window(DateWindow::new(1, today)?).await?;
    /// ```
    #[must_use]
    pub fn builder() -> UsageChartBuilder<T> {
        UsageChartBuilder::new()
    }

    /// Defensive copy of the current canonical series.
    #[must_use]
    pub fn series(&self) -> TimeDescendingSeries<T> {
        self.inner.lock_state().series.clone()
    }

    /// The window currently charted, if any, carrying the live selection.
    #[must_use]
    pub fn window(&self) -> Option<DateWindow> {
        let st = self.inner.lock_state();
        st.window.map(|w| w.with_selected_step(st.selected))
    }

    /// The current drill-down index, if any.
    #[must_use]
    pub fn selected_step(&self) -> Option<usize> {
        self.inner.lock_state().selected
    }

    /// Current window and selection as route/query parameters.
    #[must_use]
    pub fn params(&self) -> Option<WindowParams> {
        self.window().map(WindowParams::from)
    }

    /// Cancel all pending work: in-flight loads are orphaned (their results
    /// are dropped on arrival) and the live-refresh tick stops.
    ///
    /// Safe to call repeatedly, and on charts that never loaded anything.
    pub fn dispose(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        let mut st = self.inner.lock_state();
        if let Some(mut ticker) = st.ticker.take() {
            ticker.cancel();
        }
    }
}
