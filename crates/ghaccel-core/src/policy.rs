//! Cache lifetime and disposition policy per resource kind.
//!
//! | Kind | TTL | Default disposition |
//! |------|-----|---------------------|
//! | Release | 7 days | inline |
//! | Archive | 24 hours | inline |
//! | Raw | 1 hour | inline |
//!
//! The TTL is only advertised downstream through `Cache-Control`; the CDN in
//! front of the accelerator does the actual caching.

use crate::request::ResourceKind;

/// Release assets are immutable once published.
pub const RELEASE_TTL_SECS: u32 = 60 * 60 * 24 * 7;

/// Branch archives move with the branch.
pub const ARCHIVE_TTL_SECS: u32 = 60 * 60 * 24;

/// Raw files move with every push.
pub const RAW_TTL_SECS: u32 = 60 * 60;

/// `Content-Disposition` kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Inline,
    Attachment,
}

/// Delivery policy for one resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryPolicy {
    /// Advertised downstream lifetime, always > 0.
    pub cache_ttl_secs: u32,
    /// Disposition used when the request does not say.
    pub default_disposition: Disposition,
}

impl DeliveryPolicy {
    /// `Cache-Control` header value.
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_ttl_secs)
    }
}

/// Immutable table of delivery policies, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    release: DeliveryPolicy,
    archive: DeliveryPolicy,
    raw: DeliveryPolicy,
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::build(RELEASE_TTL_SECS, ARCHIVE_TTL_SECS, RAW_TTL_SECS)
    }
}

impl PolicyTable {
    /// Build a table with custom TTLs. Returns `None` if any TTL is zero.
    pub fn with_ttls(release: u32, archive: u32, raw: u32) -> Option<Self> {
        if release == 0 || archive == 0 || raw == 0 {
            return None;
        }
        Some(Self::build(release, archive, raw))
    }

    fn build(release: u32, archive: u32, raw: u32) -> Self {
        let inline = |cache_ttl_secs| DeliveryPolicy {
            cache_ttl_secs,
            default_disposition: Disposition::Inline,
        };

        Self {
            release: inline(release),
            archive: inline(archive),
            raw: inline(raw),
        }
    }

    /// Policy for a resource kind.
    pub fn for_kind(&self, kind: ResourceKind) -> DeliveryPolicy {
        match kind {
            ResourceKind::Release => self.release,
            ResourceKind::Archive => self.archive,
            ResourceKind::Raw => self.raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ttls() {
        let table = PolicyTable::default();
        assert_eq!(table.for_kind(ResourceKind::Release).cache_ttl_secs, 604_800);
        assert_eq!(table.for_kind(ResourceKind::Archive).cache_ttl_secs, 86_400);
        assert_eq!(table.for_kind(ResourceKind::Raw).cache_ttl_secs, 3_600);
    }

    #[test]
    fn defaults_are_inline() {
        let table = PolicyTable::default();
        for kind in [ResourceKind::Release, ResourceKind::Archive, ResourceKind::Raw] {
            assert_eq!(table.for_kind(kind).default_disposition, Disposition::Inline);
        }
    }

    #[test]
    fn cache_control_value() {
        let policy = PolicyTable::default().for_kind(ResourceKind::Raw);
        assert_eq!(policy.cache_control(), "public, max-age=3600");
    }

    #[test]
    fn zero_ttl_rejected() {
        assert!(PolicyTable::with_ttls(0, 1, 1).is_none());
        assert!(PolicyTable::with_ttls(1, 1, 0).is_none());
        assert_eq!(
            PolicyTable::with_ttls(10, 20, 30)
                .unwrap()
                .for_kind(ResourceKind::Archive)
                .cache_ttl_secs,
            20
        );
    }
}
