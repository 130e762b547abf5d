//! tally-rest
//!
//! Concrete loading strategy that implements `UsageLoader` on top of a REST
//! endpoint serving bucketed usage points as JSON. The endpoint contract is
//! deliberately thin: `GET {base}/{path}?step=..&start=..[&end=..]`
//! returning an array of `{ "time": .., "data": { .. } }` records in any
//! order.
#![warn(missing_docs)]

/// Error normalization from transport/status/decode failures.
pub mod adapter;
mod builder;

pub use builder::RestLoaderBuilder;

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use tally_core::{PointData, Sample, TallyError, UsageLoader};

/// Loader fetching bucketed usage points from a REST endpoint.
///
/// Generic over the point shape; any `PointData` payload that deserializes
/// from the endpoint's JSON works unchanged.
pub struct RestUsageLoader<T> {
    client: reqwest::Client,
    endpoint: Url,
    _shape: PhantomData<fn() -> T>,
}

impl<T> RestUsageLoader<T> {
    pub(crate) const fn from_parts(client: reqwest::Client, endpoint: Url) -> Self {
        Self {
            client,
            endpoint,
            _shape: PhantomData,
        }
    }

    /// The resolved series endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl<T> UsageLoader<T> for RestUsageLoader<T>
where
    T: PointData + DeserializeOwned,
{
    fn name(&self) -> &'static str {
        "tally-rest"
    }

    async fn load_series(
        &self,
        bucket_seconds: i64,
        start: i64,
        end: Option<i64>,
    ) -> Result<Vec<Sample<T>>, TallyError> {
        if bucket_seconds <= 0 {
            return Err(TallyError::invalid_arg(format!(
                "bucket width must be positive, got {bucket_seconds}"
            )));
        }

        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("step", &bucket_seconds.to_string());
            query.append_pair("start", &start.to_string());
            if let Some(end) = end {
                query.append_pair("end", &end.to_string());
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(%url, "fetching usage series");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(adapter::from_transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(adapter::from_status(status));
        }
        response
            .json::<Vec<Sample<T>>>()
            .await
            .map_err(adapter::from_decode)
    }
}
