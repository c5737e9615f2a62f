//! Resolution cache
//!
//! Maps image identities to the entry that last resolved successfully.
//! Entries are only ever inserted or replaced, never expired: staleness is
//! bounded by the mirror refresh cadence, not by a TTL.

use dockyard_core::{ImageName, ScmEntry};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::trace;

/// Concurrent map of resolved library entries
///
/// Readers share the lock; a writer holds it exclusively for a single
/// insertion. There is no multi-entry atomicity.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<ImageName, ScmEntry>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry last resolved for `image`
    pub async fn get(&self, image: &ImageName) -> Option<ScmEntry> {
        self.entries.read().await.get(image).cloned()
    }

    /// Record `entry` as the resolution of `image`, replacing any previous one
    pub async fn put(&self, image: ImageName, entry: ScmEntry) {
        trace!("Caching resolution of {}", image);
        self.entries.write().await.insert(image, entry);
    }

    /// Copy of every cached entry, taken under the read lock
    pub async fn snapshot(&self) -> HashMap<ImageName, ScmEntry> {
        self.entries.read().await.clone()
    }

    /// Number of cached identities
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing has been cached yet
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
