//! crates/activity_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the concrete HTTP backend.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Activity, ActivityFilters, ActivityType, ActivityUpdate, Group, NewActivity, NewReport,
    Page, ReferenceMaterial, Report, Tutor,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// Adapters normalize transport failures into these variants from status
/// codes and structured response bodies; nothing downstream matches on
/// message strings.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    /// The requested item does not exist remotely. For report lookups this is
    /// an expected condition, not a fault.
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The server rejected a submission because of scheduling overlaps.
    /// Carries the server-provided conflict descriptions intact.
    #[error("Schedule conflict: {}", .0.join("; "))]
    ScheduleConflict(Vec<String>),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound(_))
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait ActivityService: Send + Sync {
    async fn list_activities(&self, filters: &ActivityFilters) -> PortResult<Page<Activity>>;

    async fn get_activity(&self, id: Uuid) -> PortResult<Activity>;

    /// Creates an activity. The payload is multipart-capable so attachments
    /// ride along with the structured fields.
    async fn create_activity(&self, payload: &NewActivity) -> PortResult<Activity>;

    async fn update_activity(&self, id: Uuid, payload: &ActivityUpdate)
        -> PortResult<Activity>;

    async fn delete_activity(&self, id: Uuid) -> PortResult<()>;
}

#[async_trait]
pub trait ReferenceMaterialService: Send + Sync {
    /// Returns the full material catalog. Consumed only by the TTL cache.
    async fn list_reference_materials(&self) -> PortResult<Vec<ReferenceMaterial>>;
}

#[async_trait]
pub trait LookupService: Send + Sync {
    async fn list_tutors(&self) -> PortResult<Vec<Tutor>>;

    async fn list_groups(&self) -> PortResult<Vec<Group>>;

    async fn list_activity_types(&self) -> PortResult<Vec<ActivityType>>;
}

#[async_trait]
pub trait ReportService: Send + Sync {
    /// Fetches the report for an activity; `NotFound` when none exists yet.
    async fn get_report_for_activity(&self, activity_id: Uuid) -> PortResult<Report>;

    async fn create_report(&self, payload: &NewReport) -> PortResult<Report>;

    async fn delete_report(&self, report_id: Uuid) -> PortResult<()>;
}
