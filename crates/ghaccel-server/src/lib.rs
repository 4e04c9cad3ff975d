//! GitHub Accelerator - HTTP front for GitHub-hosted content.
//!
//! This crate serves GitHub release assets, branch archives and raw files
//! through accelerator URLs, with `Cache-Control` lifetimes chosen per content
//! class so that a CDN in front of it can do the heavy lifting.
//!
//! # Architecture
//!
//! - **Translate**: `ghaccel-core` maps accelerator paths to upstream URLs
//! - **Fetch**: one upstream GET per request, fully buffered, no retries
//! - **Deliver**: content type, disposition and cache headers per policy
//! - **Render**: home and preview pages with maud
//!
//! # URL Pattern
//!
//! ```text
//! GET /api/release/{owner}/{repo}/{tag}/{file...}
//! GET /api/archive/{owner}/{repo}/{ref}/{zip|tar.gz}
//! GET /api/raw/{owner}/{repo}/{ref}/{path...}
//! ```
//!
//! Query parameters:
//! - `preview=false` - serve as `attachment` instead of `inline`
//! - `refresh=true` - bypass cached upstream copies

pub mod config;
pub mod error;
pub mod fetch;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::{app, router};
pub use state::AppState;
