//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::fetch::Fetcher;

/// Shared application state available to all request handlers.
///
/// Everything here is read-only after startup except the upstream cache
/// inside [`Fetcher`], which is internally synchronized.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration, including the delivery policy table.
    pub config: Arc<Config>,

    /// Upstream HTTP client.
    pub fetcher: Fetcher,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let fetcher = Fetcher::new(&config)?;

        Ok(Self {
            config: Arc::new(config),
            fetcher,
        })
    }
}
