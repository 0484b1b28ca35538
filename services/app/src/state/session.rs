//! services/app/src/state/session.rs
//!
//! The process-wide application session: owns the caches, the workflow
//! tracker, and the outward list-invalidation signal, and carries the
//! mutating operations whose failures propagate to the UI.

use activity_core::domain::{
    Activity, ActivityFilters, ActivityStatus, NewReport, Page, Report,
};
use activity_core::ports::{
    ActivityService, LookupService, PortResult, ReferenceMaterialService, ReportService,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;

use crate::adapters::HttpApi;
use crate::config::Config;
use crate::error::AppError;
use crate::state::form::ActivityForm;
use crate::state::lookups::Lookups;
use crate::state::reference_cache::ReferenceMaterialCache;
use crate::state::report_cache::{ReportStatus, ReportStatusCache};
use crate::state::workflow::GuidedWorkflow;

/// Tells any list view displaying activities to refresh its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListInvalidation {
    Created(Uuid),
    Updated(Uuid),
    Deleted(Uuid),
}

/// The shared application session, created once at startup and handed to
/// every screen.
pub struct SessionState {
    activities: Arc<dyn ActivityService>,
    reports: Arc<dyn ReportService>,
    pub config: Arc<Config>,
    pub materials: ReferenceMaterialCache,
    pub report_status: ReportStatusCache,
    pub lookups: Lookups,
    pub workflow: GuidedWorkflow,
    invalidation: broadcast::Sender<ListInvalidation>,
}

impl SessionState {
    pub fn new(
        config: Arc<Config>,
        activities: Arc<dyn ActivityService>,
        materials_api: Arc<dyn ReferenceMaterialService>,
        lookup_api: Arc<dyn LookupService>,
        reports_api: Arc<dyn ReportService>,
    ) -> Self {
        let (invalidation, _) = broadcast::channel(16);
        Self {
            materials: ReferenceMaterialCache::new(materials_api, config.reference_ttl),
            report_status: ReportStatusCache::new(reports_api.clone(), config.report_ttl),
            lookups: Lookups::new(lookup_api),
            workflow: GuidedWorkflow::new(),
            activities,
            reports: reports_api,
            config,
            invalidation,
        }
    }

    /// Builds the session against the real backend.
    pub fn connect(config: Config) -> Result<Self, AppError> {
        let api = Arc::new(HttpApi::new(&config)?);
        Ok(Self::new(
            Arc::new(config),
            api.clone(),
            api.clone(),
            api.clone(),
            api,
        ))
    }

    /// A fresh form controller sharing this session's invalidation signal.
    pub fn new_form(&self) -> ActivityForm {
        ActivityForm::new(
            self.activities.clone(),
            self.invalidation.clone(),
            self.config.min_activity_minutes,
            self.config.advisory_debounce,
        )
    }

    /// List views subscribe here to learn when their data went stale.
    pub fn subscribe_invalidation(&self) -> broadcast::Receiver<ListInvalidation> {
        self.invalidation.subscribe()
    }

    //-------------------------------------------------------------------------------------
    // Reads
    //-------------------------------------------------------------------------------------

    pub async fn list_activities(
        &self,
        filters: &ActivityFilters,
    ) -> PortResult<Page<Activity>> {
        self.activities.list_activities(filters).await
    }

    pub async fn get_activity(&self, id: Uuid) -> PortResult<Activity> {
        self.activities.get_activity(id).await
    }

    /// Derives the lifecycle status of an activity from the local clock and
    /// the report cache, and lets the workflow tracker observe it so a stale
    /// cursor clears on the next sighting.
    pub async fn activity_status(&self, activity: &Activity) -> ActivityStatus {
        let has_report = matches!(
            self.report_status.resolve(activity.id).await,
            ReportStatus::Exists(_)
        );
        let status = activity.status_at(chrono::Local::now().naive_local(), has_report);
        self.workflow.observe_status(activity.id, status);
        status
    }

    //-------------------------------------------------------------------------------------
    // Mutations (failures propagate to the caller)
    //-------------------------------------------------------------------------------------

    pub async fn delete_activity(&self, id: Uuid) -> Result<(), AppError> {
        self.activities.delete_activity(id).await?;
        info!(activity_id = %id, "Activity deleted");
        self.report_status.invalidate(id).await;
        self.workflow.forget_activity(id);
        let _ = self.invalidation.send(ListInvalidation::Deleted(id));
        Ok(())
    }

    pub async fn create_report(&self, payload: NewReport) -> Result<Report, AppError> {
        let report = self.reports.create_report(&payload).await?;
        info!(activity_id = %report.activity_id, "Report created");
        self.report_status.record_created(report.clone()).await;
        // A reported activity is terminal for the guided flow.
        self.workflow
            .observe_status(report.activity_id, ActivityStatus::Reported);
        let _ = self
            .invalidation
            .send(ListInvalidation::Updated(report.activity_id));
        Ok(report)
    }

    pub async fn delete_report(
        &self,
        activity_id: Uuid,
        report_id: Uuid,
    ) -> Result<(), AppError> {
        self.reports.delete_report(report_id).await?;
        info!(%activity_id, "Report deleted");
        // Cleared, not assumed missing: the next resolve re-checks remotely.
        self.report_status.invalidate(activity_id).await;
        let _ = self
            .invalidation
            .send(ListInvalidation::Updated(activity_id));
        Ok(())
    }
}
