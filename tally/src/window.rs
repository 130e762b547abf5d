use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use chrono::Utc;

use tally_core::ticker::TickerHandle;
use tally_core::{
    PointData, Sample, TimeDescendingSeries, UsageLoader, backfill_zeros, blend_live,
};
use tally_types::{DateWindow, TallyError, TimeInterval, WindowParams};

use crate::core::{ChartInner, UsageChart};
use crate::events::SelectedStep;
use crate::selection;

/// Width of the fine-grained live buckets, in seconds.
const LIVE_BUCKET_SECONDS: i64 = 60;

pub(crate) struct LivePlan {
    pub(crate) hour_start: i64,
}

/// Decide whether a live fetch is worthwhile for `window` at `now`.
///
/// Live data exists only while the window covers "now", and only once more
/// than `threshold` has elapsed since the top of the current hour (earlier
/// than that there is nothing meaningful to extrapolate from).
pub(crate) fn live_plan(window: &DateWindow, now: i64, threshold: Duration) -> Option<LivePlan> {
    if !window.covers(now) {
        return None;
    }
    let hour_start = TimeInterval::Hour.truncate(now);
    let threshold = i64::try_from(threshold.as_secs()).unwrap_or(i64::MAX);
    if now - hour_start <= threshold {
        return None;
    }
    Some(LivePlan { hour_start })
}

/// Run the canonical blend-and-backfill over one load's results.
fn assemble<T: PointData>(
    loader: &dyn UsageLoader<T>,
    historical_sorted: Vec<Sample<T>>,
    live: Vec<Sample<T>>,
    window_start: i64,
    bucket: i64,
    live_buckets_per_step: u32,
    anchor_now: i64,
    interval: TimeInterval,
) -> TimeDescendingSeries<T> {
    let mut perf = historical_sorted;
    blend_live(
        loader,
        &mut perf,
        live,
        live_buckets_per_step,
        bucket,
        TimeInterval::Hour.truncate(anchor_now),
    );
    backfill_zeros(
        loader,
        &mut perf,
        window_start,
        bucket,
        interval.truncate(anchor_now),
    );
    TimeDescendingSeries::from_unordered(perf)
}

async fn with_deadline<R>(
    deadline: Option<Duration>,
    fut: impl core::future::Future<Output = R>,
) -> Result<R, TallyError> {
    match deadline {
        Some(d) => (tokio::time::timeout(d, fut).await).map_err(|_| TallyError::RequestTimeout),
        None => Ok(fut.await),
    }
}

impl<T: PointData> UsageChart<T> {
    /// Load and publish the given window.
    ///
    /// Behavior and trade-offs:
    /// - `on_window_selected` fires immediately (optimistically), before any
    ///   data arrives, so the host's own window state never lags.
    /// - Historical and live data are fetched concurrently and joined with
    ///   fail-fast semantics: on any failure nothing is published and the
    ///   previous series stays visible (stale but consistent).
    /// - A newer `set_window` supersedes this one; a superseded call drops
    ///   its late results silently and returns `Ok`.
    /// - While the window covers "now", a recurring live refresh keeps the
    ///   newest bucket's estimate current until the hour ends; each
    ///   `set_window` replaces the previous refresh task.
    ///
    /// # Errors
    /// Returns the loader's error when either fetch fails or times out, or
    /// `RequestTimeout` when the configured overall deadline expires.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tally::chart::set_window",
            skip(self, window),
            fields(days = window.duration_days(), end = %window.end_date()),
        )
    )]
    pub async fn set_window(&self, window: DateWindow) -> Result<(), TallyError> {
        let inner = &self.inner;
        let interval = window.interval();
        let bucket = interval.seconds();
        let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut st = inner.lock_state();
            if let Some(mut ticker) = st.ticker.take() {
                ticker.cancel();
            }
            st.window = Some(window);
            st.interval = interval;
        }
        inner
            .events
            .on_window_selected(window.start_time(), window.end_time(), &window);

        let now = Utc::now().timestamp();
        let plan = live_plan(&window, now, inner.cfg.live_threshold);

        let historical_fut = inner.loader_call_with_timeout(inner.loader.load_series(
            bucket,
            window.start_time(),
            Some(window.end_time()),
        ));
        let (historical, live) = match plan {
            Some(ref p) => {
                let live_fut = inner.loader_call_with_timeout(inner.loader.load_series(
                    LIVE_BUCKET_SECONDS,
                    p.hour_start,
                    None,
                ));
                with_deadline(inner.cfg.request_timeout, async {
                    tokio::try_join!(historical_fut, live_fut)
                })
                .await??
            }
            None => {
                let historical = with_deadline(inner.cfg.request_timeout, historical_fut).await??;
                (historical, Vec::new())
            }
        };

        // A newer set_window (or dispose) owns the state now.
        if inner.current_generation() != generation {
            return Ok(());
        }

        let historical_sorted = TimeDescendingSeries::from_unordered(historical).into_inner();
        let series = assemble(
            inner.loader.as_ref(),
            historical_sorted.clone(),
            live,
            window.start_time(),
            bucket,
            inner.cfg.live_buckets_per_step,
            // For windows entirely in the past the walk anchors at the
            // window's edge rather than wandering up to the present.
            now.min(window.end_time()),
            interval,
        );

        {
            let mut st = inner.lock_state();
            if inner.current_generation() != generation {
                return Ok(());
            }
            st.series = series.clone();
            st.historical = historical_sorted;
        }
        inner.events.on_data_loaded(series);

        if window.covers(now) {
            let hour_start = TimeInterval::Hour.truncate(now);
            let ticker = spawn_ticker(inner, generation, window, bucket, hour_start);
            let mut st = inner.lock_state();
            if inner.current_generation() == generation {
                st.ticker = Some(ticker);
            }
        }

        self.apply_selection(window.selected_step());
        Ok(())
    }

    /// Load and publish the window described by route/query parameters.
    ///
    /// # Errors
    /// Returns `InvalidArg` for malformed parameters, otherwise whatever
    /// [`UsageChart::set_window`] returns.
    pub async fn set_params(&self, params: WindowParams) -> Result<(), TallyError> {
        self.set_window(DateWindow::try_from(params)?).await
    }

    /// Re-run the current window, preserving the drill-down selection.
    ///
    /// A no-op on charts that never had a window.
    ///
    /// # Errors
    /// Propagates [`UsageChart::set_window`] failures.
    pub async fn refresh(&self) -> Result<(), TallyError> {
        let window = {
            let st = self.inner.lock_state();
            st.window.map(|w| w.with_selected_step(st.selected))
        };
        match window {
            Some(w) => self.set_window(w).await,
            None => Ok(()),
        }
    }

    /// Drill into one bucket of the loaded series (`None` clears).
    ///
    /// Selection never errors: an out-of-range index either clears the
    /// selection or, with enforcement on, falls back to the newest bucket.
    /// The resolved outcome is reported through `on_step_selected`.
    pub fn select_step(&self, index: Option<usize>) {
        self.apply_selection(index);
    }

    pub(crate) fn apply_selection(&self, requested: Option<usize>) {
        let inner = &self.inner;
        let outcome = {
            let mut st = inner.lock_state();
            let resolved = selection::resolve(
                requested,
                st.series.len(),
                inner.cfg.enforce_step_selection,
            );
            st.selected = resolved;
            if let Some(w) = st.window {
                st.window = Some(w.with_selected_step(resolved));
            }
            resolved.and_then(|index| {
                st.series
                    .step_span(index, st.interval.seconds())
                    .map(|(start, end)| SelectedStep { start, end, index })
            })
        };
        inner.events.on_step_selected(outcome);
    }
}

fn spawn_ticker<T: PointData>(
    inner: &Arc<ChartInner<T>>,
    generation: u64,
    window: DateWindow,
    bucket: i64,
    hour_start: i64,
) -> TickerHandle {
    let weak = Arc::downgrade(inner);
    let period = inner.cfg.live_refresh_period;
    let (stop_tx, mut stop_rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        let mut ticks = tokio::time::interval(period);
        ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick fires immediately; set_window just published.
        ticks.tick().await;
        loop {
            tokio::select! {
                _ = &mut stop_rx => break,
                _ = ticks.tick() => {
                    let Some(inner) = weak.upgrade() else { break };
                    if inner.current_generation() != generation {
                        break;
                    }
                    let now = Utc::now().timestamp();
                    if TimeInterval::Hour.truncate(now) != hour_start || !window.covers(now) {
                        break;
                    }
                    refresh_live(&inner, generation, window, bucket, now).await;
                }
            }
        }
    });
    TickerHandle::new(handle, stop_tx)
}

/// One tick of the live refresh: re-fetch only the live points and re-run
/// blend/backfill against a copy of the last historical result.
async fn refresh_live<T: PointData>(
    inner: &ChartInner<T>,
    generation: u64,
    window: DateWindow,
    bucket: i64,
    now: i64,
) {
    let Some(plan) = live_plan(&window, now, inner.cfg.live_threshold) else {
        return;
    };
    let live = match inner
        .loader_call_with_timeout(inner.loader.load_series(
            LIVE_BUCKET_SECONDS,
            plan.hour_start,
            None,
        ))
        .await
    {
        Ok(points) => points,
        Err(_err) => {
            // Keep the last good series on screen; the next tick retries.
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "live refresh failed");
            return;
        }
    };

    let historical = {
        let st = inner.lock_state();
        if inner.current_generation() != generation {
            return;
        }
        st.historical.clone()
    };
    let series = assemble(
        inner.loader.as_ref(),
        historical,
        live,
        window.start_time(),
        bucket,
        inner.cfg.live_buckets_per_step,
        now.min(window.end_time()),
        window.interval(),
    );
    {
        let mut st = inner.lock_state();
        if inner.current_generation() != generation {
            return;
        }
        st.series = series.clone();
    }
    inner.events.on_data_loaded(series);
}
