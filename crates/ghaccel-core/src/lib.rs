//! GitHub accelerator core - URL translation and delivery policy.
//!
//! This crate holds the pure, I/O-free half of the accelerator:
//!
//! - **Content types**: extension → MIME type, plus the previewable list
//! - **Translation**: accelerator request ↔ GitHub URL
//! - **Policy**: cache lifetime and disposition per resource kind
//! - **Dispatch**: the preview dispatcher's redirect decision
//!
//! # URL Pattern
//!
//! ```text
//! /api/release/{owner}/{repo}/{tag}/{file...}  → github.com/.../releases/download/{tag}/{file}
//! /api/archive/{owner}/{repo}/{ref}/{format}   → github.com/.../archive/refs/heads/{ref}.{format}
//! /api/raw/{owner}/{repo}/{ref}/{path...}      → raw.githubusercontent.com/.../{ref}/{path}
//! ```
//!
//! Requests hold decoded path segments; [`segment`] encodes them whenever a
//! URL or path is rendered.
//!
//! Every table here is a process-lifetime constant; nothing is shared mutably.

pub mod content_type;
pub mod dispatch;
pub mod error;
pub mod policy;
pub mod request;
pub mod segment;
pub mod translate;

pub use error::ValidationError;
pub use policy::{DeliveryPolicy, Disposition, PolicyTable};
pub use request::{RequestOptions, ResourceKind, ResourceRequest};
pub use translate::{PastedUrl, UpstreamHosts, UpstreamTarget, from_pasted_url, to_upstream};
