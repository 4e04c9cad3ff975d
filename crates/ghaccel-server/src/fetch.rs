//! Upstream fetch proxy.
//!
//! One inbound request produces at most one upstream GET. There are no
//! retries; redirects are followed by the HTTP client. Bodies are buffered in
//! full before the response is built, so body size is bounded only by memory.
//!
//! When the inbound connection goes away, axum drops the handler future and
//! with it the in-flight upstream request.
//!
//! Successful upstream responses are kept in a bounded in-process cache keyed
//! by upstream URL. `refresh=true` skips the cache read and asks intermediaries
//! to revalidate; the `Cache-Control` sent downstream is unaffected.

use anyhow::Context;
use axum::http::header::{
    CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, PRAGMA,
};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use ghaccel_core::content_type::FALLBACK_CONTENT_TYPE;
use ghaccel_core::{DeliveryPolicy, RequestOptions, ResourceKind, UpstreamTarget};
use moka::future::Cache;

use crate::config::Config;
use crate::error::{AccelError, transport_message};

/// A successful, fully buffered upstream response.
#[derive(Clone, Debug)]
pub struct UpstreamResponse {
    /// Upstream `Content-Type`, verbatim.
    pub content_type: Option<HeaderValue>,
    /// Upstream `Content-Length`, verbatim.
    pub content_length: Option<HeaderValue>,
    pub body: Bytes,
    /// When this response was fetched from upstream.
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

/// Type alias for the upstream response cache.
pub type UpstreamCache = Cache<String, UpstreamResponse>;

/// Response handed back to the client.
#[derive(Debug)]
pub struct Delivery {
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IntoResponse for Delivery {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.headers, self.body).into_response()
    }
}

/// Upstream HTTP client plus its response cache.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    cache: Option<UpstreamCache>,
}

impl Fetcher {
    /// Build the client from configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.upstream_timeout)
            .build()
            .context("failed to build upstream HTTP client")?;

        let cache = (config.upstream_cache_bytes > 0).then(|| {
            Cache::builder()
                .max_capacity(config.upstream_cache_bytes)
                .weigher(weigh)
                .time_to_live(config.upstream_cache_ttl)
                .build()
        });

        tracing::info!(
            timeout_secs = config.upstream_timeout.as_secs(),
            cache_bytes = config.upstream_cache_bytes,
            cache_ttl_secs = config.upstream_cache_ttl.as_secs(),
            "upstream client initialized"
        );

        Ok(Self { client, cache })
    }

    /// GET `url` and buffer the body.
    ///
    /// `transport_error` is the client-facing message used if upstream cannot
    /// be reached.
    pub async fn fetch(
        &self,
        url: &str,
        force_refresh: bool,
        transport_error: &'static str,
    ) -> Result<UpstreamResponse, AccelError> {
        if !force_refresh {
            if let Some(hit) = self.cached(url).await {
                tracing::debug!(url = %url, fetched_at = %hit.fetched_at, "upstream cache hit");
                return Ok(hit);
            }
        }

        tracing::debug!(url = %url, force_refresh, "fetching from upstream");

        let mut request = self.client.get(url);
        if force_refresh {
            request = request
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache");
        }

        let response = request.send().await.map_err(|source| AccelError::Transport {
            message: transport_error,
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "upstream returned error");
            return Err(AccelError::Upstream {
                status,
                reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let content_length = response.headers().get(CONTENT_LENGTH).cloned();
        let body = response.bytes().await.map_err(|source| AccelError::Transport {
            message: transport_error,
            source,
        })?;

        let fetched = UpstreamResponse {
            content_type,
            content_length,
            body,
            fetched_at: chrono::Utc::now(),
        };

        if let Some(cache) = &self.cache {
            cache.insert(url.to_string(), fetched.clone()).await;
        }

        Ok(fetched)
    }

    async fn cached(&self, url: &str) -> Option<UpstreamResponse> {
        match &self.cache {
            Some(cache) => cache.get(url).await,
            None => None,
        }
    }

    /// Fetch `target` and build the client response.
    ///
    /// - `Content-Type`: the target's fixed type, else upstream's, else
    ///   `application/octet-stream`
    /// - `Content-Disposition`: `inline` when preview is requested, otherwise
    ///   `attachment` with `fallback_filename`
    /// - `Cache-Control`: always `public, max-age={ttl}` from `policy`
    /// - `Content-Length`: forwarded from upstream for release assets only
    pub async fn deliver(
        &self,
        target: &UpstreamTarget,
        options: RequestOptions,
        policy: &DeliveryPolicy,
        fallback_filename: &str,
    ) -> Result<Delivery, AccelError> {
        let upstream = self
            .fetch(
                &target.url,
                options.force_refresh,
                transport_message(target.kind),
            )
            .await?;

        let mut headers = HeaderMap::new();

        let content_type = match target.expected_content_type {
            Some(fixed) => HeaderValue::from_static(fixed),
            None => upstream
                .content_type
                .clone()
                .unwrap_or_else(|| HeaderValue::from_static(FALLBACK_CONTENT_TYPE)),
        };
        headers.insert(CONTENT_TYPE, content_type);

        headers.insert(
            CONTENT_DISPOSITION,
            content_disposition(options.preview_requested, fallback_filename)?,
        );

        let cache_control = HeaderValue::from_str(&policy.cache_control())
            .context("invalid Cache-Control value")?;
        headers.insert(CACHE_CONTROL, cache_control);

        if target.kind == ResourceKind::Release {
            if let Some(length) = upstream.content_length {
                headers.insert(CONTENT_LENGTH, length);
            }
        }

        tracing::info!(
            url = %target.url,
            kind = %target.kind,
            bytes = upstream.body.len(),
            preview = options.preview_requested,
            "delivered upstream resource"
        );

        Ok(Delivery {
            headers,
            body: upstream.body,
        })
    }
}

/// Cache weight of one entry: key plus body, so empty bodies still count.
fn weigh(url: &String, response: &UpstreamResponse) -> u32 {
    let bytes = url.len().saturating_add(response.body.len());
    u32::try_from(bytes).unwrap_or(u32::MAX)
}

/// `inline`, or `attachment; filename="..."` with quotes and backslashes escaped.
fn content_disposition(preview: bool, filename: &str) -> anyhow::Result<HeaderValue> {
    if preview {
        return Ok(HeaderValue::from_static("inline"));
    }

    let escaped = filename.replace('\\', "\\\\").replace('"', "\\\"");
    HeaderValue::from_bytes(format!("attachment; filename=\"{escaped}\"").as_bytes())
        .with_context(|| format!("filename not representable in a header: {filename:?}"))
}
