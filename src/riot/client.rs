use std::{num::NonZeroU32, sync::Arc, time::Duration};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::metrics::RequestMetrics;

use super::region::{Platform, Region};

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Shared Riot API client. One instance is built at startup and handed to
/// every handler; the inner `reqwest::Client` pools connections.
///
/// Calls are single attempt: no retry, no backoff. A failing upstream fails
/// the request that triggered it and nothing else.
pub struct RiotClient {
    http: reqwest::Client,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    /// Riot API Key
    key: String,
    /// Replaces both platform and regional hosts when set (local proxies, tests).
    base_url_override: Option<String>,
    metrics: Arc<RequestMetrics>,
}

impl RiotClient {
    pub fn new(
        key: String,
        rate_limit_per_second: NonZeroU32,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            limiter: RateLimiter::direct(Quota::per_second(rate_limit_per_second)),
            key,
            base_url_override: None,
            metrics: RequestMetrics::new("riot"),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn metrics(&self) -> Arc<RequestMetrics> {
        self.metrics.clone()
    }

    pub(crate) fn platform_url(&self, platform: Platform) -> String {
        self.base_url_override
            .clone()
            .unwrap_or_else(|| platform.base_url())
    }

    pub(crate) fn regional_url(&self, region: Region) -> String {
        self.base_url_override
            .clone()
            .unwrap_or_else(|| region.base_url())
    }

    /// Issue a GET and classify the outcome:
    /// 2xx is `Some(payload)`, 404 is `None`, anything else is an error.
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, AppError> {
        self.limiter.until_ready().await;
        self.metrics.inc();

        tracing::trace!("[RIOT::CLIENT] GET {}", url);

        let res = self.fetch(url, query).await;
        if res.is_err() {
            self.metrics.record_failure();
        }
        res
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, AppError> {
        let res = self
            .http
            .get(url)
            .header("X-Riot-Token", &self.key)
            .query(query)
            .send()
            .await?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("[RIOT::CLIENT] {} is absent", url);
            return Ok(None);
        }

        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            return Err(AppError::RiotApi {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Some(res.json().await?))
    }

    /// Same as [`RiotClient::get_optional`] but an absent resource is an error.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        resource: &'static str,
    ) -> Result<T, AppError> {
        self.get_optional(url, query)
            .await?
            .ok_or(AppError::NotFound(resource))
    }
}
