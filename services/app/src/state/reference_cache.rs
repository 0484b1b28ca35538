//! services/app/src/state/reference_cache.rs
//!
//! The TTL-bounded cache for the curriculum-material catalog. Serves the
//! in-memory copy while it is younger than the TTL, refreshes it wholesale
//! otherwise, and keeps the last-known-good data when a refresh fails.

use activity_core::domain::ReferenceMaterial;
use activity_core::ports::ReferenceMaterialService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The result of a cache read. Reads never fail: a refresh error is carried
/// alongside whatever data the cache still holds.
#[derive(Debug, Clone)]
pub struct CacheRead {
    pub data: Vec<ReferenceMaterial>,
    pub served_from_cache: bool,
    pub age_minutes: u64,
    /// Set when this read attempted a refresh and the fetch failed.
    pub refresh_error: Option<String>,
}

struct CacheInner {
    data: Vec<ReferenceMaterial>,
    loaded_at: Option<Instant>,
    selected_id: Option<Uuid>,
}

impl CacheInner {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.loaded_at
            .map(|at| at.elapsed() < ttl)
            .unwrap_or(false)
    }

    fn age_minutes(&self) -> u64 {
        self.loaded_at
            .map(|at| at.elapsed().as_secs() / 60)
            .unwrap_or(0)
    }
}

/// Process-wide cache for the reference-material catalog.
pub struct ReferenceMaterialCache {
    api: Arc<dyn ReferenceMaterialService>,
    ttl: Duration,
    inner: Mutex<CacheInner>,
    /// Serializes refreshes so concurrent `get` calls share one fetch.
    refresh_gate: Mutex<()>,
}

impl ReferenceMaterialCache {
    pub fn new(api: Arc<dyn ReferenceMaterialService>, ttl: Duration) -> Self {
        Self {
            api,
            ttl,
            inner: Mutex::new(CacheInner {
                data: Vec::new(),
                loaded_at: None,
                selected_id: None,
            }),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Returns the catalog, refreshing it first when the cached copy is
    /// missing, expired, or `force_refresh` is set.
    ///
    /// A failed refresh serves the previous data with `refresh_error` set;
    /// stale-but-present beats empty.
    pub async fn get(&self, force_refresh: bool) -> CacheRead {
        {
            let inner = self.inner.lock().await;
            if !force_refresh && inner.is_fresh(self.ttl) {
                debug!(age_minutes = inner.age_minutes(), "Serving reference materials from cache");
                return CacheRead {
                    data: inner.data.clone(),
                    served_from_cache: true,
                    age_minutes: inner.age_minutes(),
                    refresh_error: None,
                };
            }
        }

        // Only one refresh may be in flight. A caller that waited here while
        // another refresh ran re-checks freshness and reuses its result.
        let _gate = self.refresh_gate.lock().await;
        {
            let inner = self.inner.lock().await;
            if !force_refresh && inner.is_fresh(self.ttl) {
                return CacheRead {
                    data: inner.data.clone(),
                    served_from_cache: true,
                    age_minutes: inner.age_minutes(),
                    refresh_error: None,
                };
            }
        }

        match self.api.list_reference_materials().await {
            Ok(fresh) => {
                let mut inner = self.inner.lock().await;
                info!(count = fresh.len(), "Reference materials refreshed");
                inner.data = fresh;
                inner.loaded_at = Some(Instant::now());
                // The selection is a projection over the catalog; it cannot
                // outlive its row.
                if let Some(id) = inner.selected_id {
                    if !inner.data.iter().any(|m| m.id == id) {
                        inner.selected_id = None;
                    }
                }
                CacheRead {
                    data: inner.data.clone(),
                    served_from_cache: false,
                    age_minutes: 0,
                    refresh_error: None,
                }
            }
            Err(e) => {
                let inner = self.inner.lock().await;
                warn!(error = %e, "Reference material refresh failed; serving previous data");
                CacheRead {
                    data: inner.data.clone(),
                    served_from_cache: inner.loaded_at.is_some(),
                    age_minutes: inner.age_minutes(),
                    refresh_error: Some(e.to_string()),
                }
            }
        }
    }

    /// Resets the cache to cold. The only way to make the next `get` ignore
    /// previously loaded data.
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.data.clear();
        inner.loaded_at = None;
        inner.selected_id = None;
    }

    /// Marks a catalog entry as the current selection.
    pub async fn select(&self, id: Uuid) {
        self.inner.lock().await.selected_id = Some(id);
    }

    pub async fn clear_selection(&self) {
        self.inner.lock().await.selected_id = None;
    }

    /// The currently selected catalog entry, if its row is still present.
    pub async fn selected(&self) -> Option<ReferenceMaterial> {
        let inner = self.inner.lock().await;
        let id = inner.selected_id?;
        inner.data.iter().find(|m| m.id == id).cloned()
    }
}
