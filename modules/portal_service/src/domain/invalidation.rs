//! Listing invalidation after writes
//!
//! Every successful write marks the public and admin listing views of the
//! affected entity family as stale so renderers rebuild them on next request.

use async_trait::async_trait;

/// Entity family whose listings a write touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Resources,
    Gallery,
}

impl ListingKind {
    /// Public listing route followed by the admin listing route
    pub fn paths(&self) -> [&'static str; 2] {
        match self {
            ListingKind::Resources => ["/knowledge-hub", "/admin/dashboard/resources"],
            ListingKind::Gallery => ["/gallery", "/admin/dashboard/gallery"],
        }
    }
}

/// Sink for view invalidation requests
///
/// Implementations may purge a CDN, notify a static renderer, or just log.
/// Failures are reported back but never undo the write that triggered them.
#[async_trait]
pub trait ViewInvalidator: Send + Sync {
    async fn invalidate(&self, path: &str) -> anyhow::Result<()>;
}

/// Invalidator that only records the request in the log
pub struct TracingInvalidator;

#[async_trait]
impl ViewInvalidator for TracingInvalidator {
    async fn invalidate(&self, path: &str) -> anyhow::Result<()> {
        tracing::debug!(path, "listing view invalidated");
        Ok(())
    }
}

/// Invalidate both listing paths of `kind`, logging any failure
pub async fn invalidate_listings(invalidator: &dyn ViewInvalidator, kind: ListingKind) {
    for path in kind.paths() {
        if let Err(e) = invalidator.invalidate(path).await {
            tracing::warn!(path, error = %e, "failed to invalidate listing view");
        }
    }
}
