use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;

use tally_core::{PointData, TallyError, UsageLoader};
use tally_middleware::{CachingLoader, RetryingLoader};
use tally_types::{CacheConfig, RetryConfig};

use crate::RestUsageLoader;

const DEFAULT_SERIES_PATH: &str = "usage/series";

/// Builder for [`RestUsageLoader`], optionally wrapped in retry and caching
/// middleware.
///
/// Behavior and trade-offs:
/// - Retry smooths over transient upstream hiccups at the cost of latency on
///   failure; it never retries validation or decode errors.
/// - Caching short-circuits repeated historical window loads (hosts tend to
///   flip between a handful of ranges); live fetches always pass through.
/// - Wrapping order is fixed: cache outside retry, so a cache hit skips the
///   retry machinery entirely.
pub struct RestLoaderBuilder {
    base_url: String,
    series_path: String,
    client: Option<reqwest::Client>,
    retry: Option<RetryConfig>,
    cache: Option<CacheConfig>,
}

impl RestLoaderBuilder {
    /// Start a builder for the given API base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            series_path: DEFAULT_SERIES_PATH.to_string(),
            client: None,
            retry: None,
            cache: None,
        }
    }

    /// Override the series path appended to the base URL.
    #[must_use]
    pub fn series_path(mut self, path: impl Into<String>) -> Self {
        self.series_path = path.into();
        self
    }

    /// Supply a preconfigured `reqwest` client (connection pools, proxies,
    /// default headers). A default client is built otherwise.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Retry transient failures with the given schedule.
    #[must_use]
    pub const fn with_retry(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Cache bounded responses with the given capacity and TTL.
    #[must_use]
    pub const fn with_cache(mut self, cfg: CacheConfig) -> Self {
        self.cache = Some(cfg);
        self
    }

    /// Build the loader for point shape `T`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the base URL or series path do not parse
    /// into a usable endpoint.
    pub fn build<T>(self) -> Result<Arc<dyn UsageLoader<T>>, TallyError>
    where
        T: PointData + DeserializeOwned,
    {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.series_path.trim_start_matches('/')
        );
        let endpoint = Url::parse(&joined)
            .map_err(|e| TallyError::invalid_arg(format!("bad endpoint {joined}: {e}")))?;
        let client = self.client.unwrap_or_default();

        let mut loader: Arc<dyn UsageLoader<T>> =
            Arc::new(RestUsageLoader::from_parts(client, endpoint));
        if let Some(cfg) = self.retry {
            loader = Arc::new(RetryingLoader::new(loader, cfg));
        }
        if let Some(cfg) = self.cache {
            loader = Arc::new(CachingLoader::new(loader, cfg));
        }
        Ok(loader)
    }
}
