//! services/app/src/state/report_cache.rs
//!
//! Per-activity cache of the session-report resolution. Bounds redundant
//! round-trips when a user revisits the same activity within the TTL window,
//! and keeps "no report yet" distinct from "lookup failed" so the UI can
//! offer "create new" versus "retry".

use activity_core::domain::Report;
use activity_core::ports::ReportService;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

/// How an activity's report resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    /// The report payload is available.
    Exists(Report),
    /// The remote check returned not-found; expected for unreported
    /// activities.
    Missing,
    /// The lookup failed for any other reason.
    Error(String),
}

struct Entry {
    status: ReportStatus,
    fetched_at: Instant,
}

/// Process-wide report-status cache, keyed by activity identity.
pub struct ReportStatusCache {
    api: Arc<dyn ReportService>,
    ttl: Duration,
    entries: Mutex<HashMap<Uuid, Entry>>,
}

impl ReportStatusCache {
    pub fn new(api: Arc<dyn ReportService>, ttl: Duration) -> Self {
        Self {
            api,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves the report status for an activity.
    ///
    /// The freshness check happens strictly before any network call: an entry
    /// younger than the TTL is served as-is, so a re-focused view never races
    /// a lookup the cache has already satisfied.
    pub async fn resolve(&self, activity_id: Uuid) -> ReportStatus {
        {
            let entries = self.entries.lock().await;
            if let Some(entry) = entries.get(&activity_id) {
                if entry.fetched_at.elapsed() < self.ttl {
                    debug!(%activity_id, "Serving report status from cache");
                    return entry.status.clone();
                }
            }
        }

        let status = match self.api.get_report_for_activity(activity_id).await {
            Ok(report) => ReportStatus::Exists(report),
            Err(e) if e.is_not_found() => ReportStatus::Missing,
            Err(e) => {
                warn!(%activity_id, error = %e, "Report lookup failed");
                ReportStatus::Error(e.to_string())
            }
        };

        let mut entries = self.entries.lock().await;
        entries.insert(
            activity_id,
            Entry {
                status: status.clone(),
                fetched_at: Instant::now(),
            },
        );
        status
    }

    /// Records a freshly created report, so an immediate `resolve` returns
    /// `Exists` without a network call.
    pub async fn record_created(&self, report: Report) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            report.activity_id,
            Entry {
                status: ReportStatus::Exists(report),
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drops the entry for an activity. The next `resolve` performs a fresh
    /// remote check rather than assuming `Missing`.
    pub async fn invalidate(&self, activity_id: Uuid) {
        self.entries.lock().await.remove(&activity_id);
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}
