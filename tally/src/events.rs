use tally_core::TimeDescendingSeries;
use tally_types::DateWindow;

/// A resolved drill-down: the selected bucket's span and its index in the
/// time-descending series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedStep {
    /// Bucket start, Unix seconds.
    pub start: i64,
    /// Bucket end (exclusive), Unix seconds.
    pub end: i64,
    /// Index into the series (0 = newest bucket).
    pub index: usize,
}

/// Host callbacks invoked by a [`crate::UsageChart`].
///
/// All methods default to no-ops so hosts implement only what they render.
/// Callbacks are invoked inline from the chart's async operations and from
/// the live-refresh tick; implementations should hand work off rather than
/// block.
pub trait ChartEvents<T>: Send + Sync {
    /// Fired once per `set_window`, before any data arrives, so the host can
    /// update its own window state immediately.
    fn on_window_selected(&self, start: i64, end: i64, window: &DateWindow) {
        let _ = (start, end, window);
    }

    /// Fired after every successful blend/backfill with a defensive copy of
    /// the canonical series.
    fn on_data_loaded(&self, series: TimeDescendingSeries<T>) {
        let _ = series;
    }

    /// Fired on every selection-state transition; `None` means the chart has
    /// no selected bucket.
    fn on_step_selected(&self, selection: Option<SelectedStep>) {
        let _ = selection;
    }
}

/// Default sink for charts built without an events handler.
pub(crate) struct NoopEvents;

impl<T> ChartEvents<T> for NoopEvents {}
