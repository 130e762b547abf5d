use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Handle to the background live-refresh task of one chart.
///
/// Dropping the handle stops the task; the aggregator replaces the handle on
/// every `set_window` so at most one tick loop runs per chart.
#[derive(Debug)]
pub struct TickerHandle {
    task: Option<JoinHandle<()>>,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl TickerHandle {
    /// Wrap a spawned tick loop and its stop signal.
    #[must_use]
    pub const fn new(task: JoinHandle<()>, stop_tx: oneshot::Sender<()>) -> Self {
        Self {
            task: Some(task),
            stop_tx: Some(stop_tx),
        }
    }

    /// Request a graceful stop and wait for the task to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Stop the task without waiting. Safe to call more than once.
    ///
    /// The stop signal is sent first so a loop blocked on its select arm can
    /// wind down; a task that has not finished by then is aborted outright.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take()
            && !task.is_finished()
        {
            task.abort();
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
