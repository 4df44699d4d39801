use crate::config::DisplayMode;
use crate::fetch::cache::{cache_key, AnalyticsCache};
use crate::fetch::payload::AnalyticsPayload;
use crate::fetch::range::RangeToken;
use crate::fetch::FetchError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Raw response handed back by the transport, before classification.
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

/// Outbound HTTP capability injected into [`AnalyticsClient`].
///
/// Production wires in [`HttpTransport`]; tests substitute a canned
/// implementation so the client logic runs without a network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one GET with the API key header. Errors are transport-level
    /// only (DNS, connect, timeout); any HTTP status is a success here.
    async fn get(&self, url: &str, api_key: &str) -> Result<UpstreamResponse, String>;
}

/// reqwest-backed transport with a fixed per-request timeout.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, api_key: &str) -> Result<UpstreamResponse, String> {
        let response = self
            .client
            .get(url)
            .header("x-api-key", api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok(UpstreamResponse { status, body })
    }
}

/// Cache-aware client for the upstream analytics API.
///
/// Per invocation: one cache read, at most one upstream call, at most one
/// cache write. A live cached entry short-circuits the fetch, so each
/// distinct `(domain, range, mode)` tuple reaches upstream at most once
/// per TTL window.
pub struct AnalyticsClient {
    transport: Arc<dyn Transport>,
    cache: AnalyticsCache,
    api_url: String,
}

impl AnalyticsClient {
    pub fn new(transport: Arc<dyn Transport>, api_url: String, cache_ttl_secs: u64) -> Self {
        Self {
            transport,
            cache: AnalyticsCache::new(cache_ttl_secs),
            api_url,
        }
    }

    pub const fn cache(&self) -> &AnalyticsCache {
        &self.cache
    }

    /// Fetch the payload for one widget render.
    ///
    /// `force_refresh` unconditionally drops the cached entry before the
    /// lookup; authorization for that is the caller's concern. No retries:
    /// a transient upstream failure surfaces immediately.
    pub async fn fetch(
        &self,
        api_key: &str,
        domain: &str,
        range: RangeToken,
        mode: DisplayMode,
        force_refresh: bool,
    ) -> Result<AnalyticsPayload, FetchError> {
        let key = cache_key(domain, range, mode);

        if force_refresh {
            self.cache.remove(&key);
        }

        if let Some(payload) = self.cache.get(&key) {
            tracing::debug!(domain, range = range.as_str(), "Cache hit");
            return Ok(payload);
        }

        let window = range.resolve();
        let url = format!(
            "{}?domain={domain}&date_from={}&date_to={}&scope=core&limit_lists=10",
            self.api_url, window.from, window.to
        );

        tracing::info!(
            domain,
            range = range.as_str(),
            date_from = %window.from,
            date_to = %window.to,
            "Fetching upstream analytics"
        );

        let response = self
            .transport
            .get(&url, api_key)
            .await
            .map_err(FetchError::Transport)?;

        if !(200..300).contains(&response.status) {
            return Err(FetchError::Http(response.status));
        }

        let value: serde_json::Value =
            serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))?;
        let payload = AnalyticsPayload::from_value(&value)
            .ok_or_else(|| FetchError::Decode("response body is not a JSON object".to_string()))?;

        self.cache.insert(key, payload.clone());
        Ok(payload)
    }
}
