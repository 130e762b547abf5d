use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;

use tally_core::{PointData, Sample, UsageLoader};
use tally_types::{RetryConfig, ScaleRatio, TallyError};

/// Add a bounded jitter window on top of a base delay.
fn jitter_wait(base_ms: u64, jitter_percent: u8) -> u64 {
    let jitter_range = if jitter_percent == 0 {
        1
    } else {
        std::cmp::max(1, (base_ms.saturating_mul(u64::from(jitter_percent))) / 100)
    };
    let mut rng = rand::rng();
    base_ms + rng.random_range(0..jitter_range)
}

/// Wrapper that retries transient `load_series` failures with exponential
/// backoff and jitter.
///
/// Only transient errors (loader faults and timeouts) are retried;
/// validation and data-shape errors surface immediately. The shape algebra
/// is delegated to the inner loader so strategy-specific overrides survive
/// wrapping.
pub struct RetryingLoader<T> {
    inner: Arc<dyn UsageLoader<T>>,
    cfg: RetryConfig,
}

impl<T: PointData> RetryingLoader<T> {
    /// Wrap `inner` with the given retry schedule.
    #[must_use]
    pub fn new(inner: Arc<dyn UsageLoader<T>>, cfg: RetryConfig) -> Self {
        Self { inner, cfg }
    }
}

#[async_trait]
impl<T: PointData> UsageLoader<T> for RetryingLoader<T> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn load_series(
        &self,
        bucket_seconds: i64,
        start: i64,
        end: Option<i64>,
    ) -> Result<Vec<Sample<T>>, TallyError> {
        let mut delay_ms = self.cfg.backoff.min_backoff_ms;
        let mut attempt: u32 = 0;
        loop {
            match self.inner.load_series(bucket_seconds, start, end).await {
                Ok(points) => return Ok(points),
                Err(e) if e.is_transient() && attempt < self.cfg.max_retries => {
                    attempt += 1;
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        loader = self.inner.name(),
                        attempt,
                        delay_ms,
                        error = %e,
                        "retrying load_series after transient failure"
                    );
                    let wait = jitter_wait(delay_ms, self.cfg.backoff.jitter_percent);
                    tokio::time::sleep(std::time::Duration::from_millis(wait)).await;
                    delay_ms = delay_ms
                        .saturating_mul(u64::from(self.cfg.backoff.factor))
                        .min(self.cfg.backoff.max_backoff_ms);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn combine(&self, a: Sample<T>, b: Sample<T>) -> Sample<T> {
        self.inner.combine(a, b)
    }

    fn scale(&self, item: &Sample<T>, ratio: ScaleRatio, time: i64) -> Sample<T> {
        self.inner.scale(item, ratio, time)
    }

    fn zero_fill(&self, times: &[i64], observed: &[Sample<T>]) -> Vec<Sample<T>> {
        self.inner.zero_fill(times, observed)
    }
}
