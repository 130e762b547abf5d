use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;

use tally_core::{PointData, Sample, UsageLoader};
use tally_types::{CacheConfig, ScaleRatio, TallyError};

/// Identity of a bounded series request for caching discrimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SeriesKey {
    bucket_seconds: i64,
    start: i64,
    end: i64,
}

/// Wrapper that caches bounded (historical) responses with a TTL.
///
/// Open-ended requests (the live minute-level fetch) always pass through:
/// their whole point is observing the still-changing current bucket.
/// Errors are never cached.
pub struct CachingLoader<T: PointData> {
    inner: Arc<dyn UsageLoader<T>>,
    cache: Cache<SeriesKey, Vec<Sample<T>>>,
}

impl<T: PointData> CachingLoader<T> {
    /// Wrap `inner` with a TTL response cache.
    #[must_use]
    pub fn new(inner: Arc<dyn UsageLoader<T>>, cfg: CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(cfg.capacity)
            .time_to_live(cfg.ttl)
            .build();
        Self { inner, cache }
    }
}

#[async_trait]
impl<T: PointData> UsageLoader<T> for CachingLoader<T> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn load_series(
        &self,
        bucket_seconds: i64,
        start: i64,
        end: Option<i64>,
    ) -> Result<Vec<Sample<T>>, TallyError> {
        let Some(end) = end else {
            return self.inner.load_series(bucket_seconds, start, None).await;
        };
        let key = SeriesKey {
            bucket_seconds,
            start,
            end,
        };
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }
        let points = self
            .inner
            .load_series(bucket_seconds, start, Some(end))
            .await?;
        self.cache.insert(key, points.clone()).await;
        Ok(points)
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
