//! Application configuration loaded from environment variables.

use std::time::Duration;

use anyhow::Context;
use ghaccel_core::policy::{ARCHIVE_TTL_SECS, RAW_TTL_SECS, RELEASE_TTL_SECS};
use ghaccel_core::translate::{GITHUB_URL, RAW_URL};
use ghaccel_core::{PolicyTable, UpstreamHosts};

/// Identifying `User-Agent` sent with every upstream request.
pub const DEFAULT_USER_AGENT: &str = "GitHub-Accelerator/1.0";

/// Upstream requests give up after this long. The upstream hosts document no
/// limit of their own.
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// 256 MiB of buffered upstream bodies.
const DEFAULT_UPSTREAM_CACHE_BYTES: u64 = 256 * 1024 * 1024;

const DEFAULT_UPSTREAM_CACHE_TTL_SECS: u64 = 300;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000").
    pub bind_addr: String,

    /// Public origin of this service, used to build accelerated URLs.
    /// e.g., "https://proxy.znzzi.com"
    pub base_url: String,

    /// Site name shown in page titles.
    pub site_name: String,

    /// Upstream base URLs for github.com and raw.githubusercontent.com.
    pub upstream: UpstreamHosts,

    /// `User-Agent` header for upstream requests.
    pub user_agent: String,

    /// Timeout for a whole upstream request, body included.
    pub upstream_timeout: Duration,

    /// Cache lifetime and disposition per resource kind.
    pub policies: PolicyTable,

    /// Byte budget of the in-process upstream cache. Zero disables it.
    pub upstream_cache_bytes: u64,

    /// Lifetime of an upstream cache entry.
    pub upstream_cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - None (all have defaults for local development)
    ///
    /// Optional:
    /// - `ACCEL_BIND_ADDR`: Server bind address (default: "0.0.0.0:3000")
    /// - `ACCEL_BASE_URL`: Public base URL (default: "http://localhost:3000")
    /// - `ACCEL_SITE_NAME`: Site name (default: "GitHub Accelerator")
    /// - `ACCEL_GITHUB_URL`: Release/archive upstream (default: "https://github.com")
    /// - `ACCEL_RAW_URL`: Raw file upstream (default: "https://raw.githubusercontent.com")
    /// - `ACCEL_USER_AGENT`: Upstream `User-Agent` (default: "GitHub-Accelerator/1.0")
    /// - `ACCEL_UPSTREAM_TIMEOUT_SECS`: Upstream timeout (default: 30)
    /// - `ACCEL_RELEASE_TTL_SECS`, `ACCEL_ARCHIVE_TTL_SECS`, `ACCEL_RAW_TTL_SECS`:
    ///   advertised `max-age` per kind (default: 604800, 86400, 3600)
    /// - `ACCEL_UPSTREAM_CACHE_BYTES`: upstream cache budget, 0 disables (default: 256 MiB)
    /// - `ACCEL_UPSTREAM_CACHE_TTL_SECS`: upstream cache entry lifetime (default: 300)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("ACCEL_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let base_url = std::env::var("ACCEL_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let site_name =
            std::env::var("ACCEL_SITE_NAME").unwrap_or_else(|_| "GitHub Accelerator".to_string());

        let upstream = UpstreamHosts {
            github: std::env::var("ACCEL_GITHUB_URL")
                .unwrap_or_else(|_| GITHUB_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            raw: std::env::var("ACCEL_RAW_URL")
                .unwrap_or_else(|_| RAW_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        };

        let user_agent =
            std::env::var("ACCEL_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let timeout_secs = env_number("ACCEL_UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?;
        anyhow::ensure!(timeout_secs > 0, "ACCEL_UPSTREAM_TIMEOUT_SECS must be > 0");

        let policies = PolicyTable::with_ttls(
            env_number("ACCEL_RELEASE_TTL_SECS", RELEASE_TTL_SECS)?,
            env_number("ACCEL_ARCHIVE_TTL_SECS", ARCHIVE_TTL_SECS)?,
            env_number("ACCEL_RAW_TTL_SECS", RAW_TTL_SECS)?,
        )
        .context("cache TTLs must be > 0")?;

        let upstream_cache_bytes =
            env_number("ACCEL_UPSTREAM_CACHE_BYTES", DEFAULT_UPSTREAM_CACHE_BYTES)?;
        let upstream_cache_ttl = Duration::from_secs(env_number(
            "ACCEL_UPSTREAM_CACHE_TTL_SECS",
            DEFAULT_UPSTREAM_CACHE_TTL_SECS,
        )?);

        tracing::info!(
            bind_addr = %bind_addr,
            base_url = %base_url,
            github_url = %upstream.github,
            raw_url = %upstream.raw,
            timeout_secs,
            upstream_cache_bytes,
            "accelerator configuration loaded"
        );

        Ok(Self {
            bind_addr,
            base_url,
            site_name,
            upstream,
            user_agent,
            upstream_timeout: Duration::from_secs(timeout_secs),
            policies,
            upstream_cache_bytes,
            upstream_cache_ttl,
        })
    }
}

impl Default for Config {
    /// Development defaults, identical to `from_env` with an empty environment.
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            base_url: "http://localhost:3000".to_string(),
            site_name: "GitHub Accelerator".to_string(),
            upstream: UpstreamHosts::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            policies: PolicyTable::default(),
            upstream_cache_bytes: DEFAULT_UPSTREAM_CACHE_BYTES,
            upstream_cache_ttl: Duration::from_secs(DEFAULT_UPSTREAM_CACHE_TTL_SECS),
        }
    }
}

/// Parse an optional numeric env var, falling back to `default` when unset.
fn env_number<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got {raw:?}")),
        Err(_) => Ok(default),
    }
}
