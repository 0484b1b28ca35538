//! crates/activity_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

/// The minimum duration an activity must span, in minutes.
pub const MIN_ACTIVITY_MINUTES: i64 = 45;

/// The default late threshold when no explicit time is set, in minutes
/// after the start time.
pub const DEFAULT_LATE_OFFSET_MINUTES: i64 = 15;

/// The curriculum material attached to an activity.
///
/// Either a reference into the material catalog or free-text "manual"
/// material captured on the form. The variant itself encodes which capture
/// mode is active, so a catalog id and manual text can never coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Material {
    /// Catalog-backed material; `None` until the user picks an entry.
    Catalog(Option<Uuid>),
    /// Free-text material entered directly on the form.
    Manual { subject: String, name: String },
}

impl Material {
    /// True when the material is fully specified in its active mode.
    pub fn is_complete(&self) -> bool {
        match self {
            Material::Catalog(id) => id.is_some(),
            Material::Manual { subject, name } => {
                !subject.trim().is_empty() && !name.trim().is_empty()
            }
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, Material::Manual { .. })
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::Catalog(None)
    }
}

/// The attendance cut-off policy for an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LateThreshold {
    /// Minutes after the start time; used when no explicit time is chosen.
    OffsetMinutes(i64),
    /// An explicit time-of-day picked by the user.
    Explicit(NaiveTime),
}

impl LateThreshold {
    /// Resolves the policy against a concrete start time, when one is set.
    pub fn resolve(&self, start: NaiveTime) -> NaiveTime {
        match self {
            LateThreshold::OffsetMinutes(m) => start + chrono::Duration::minutes(*m),
            LateThreshold::Explicit(t) => *t,
        }
    }
}

impl Default for LateThreshold {
    fn default() -> Self {
        LateThreshold::OffsetMinutes(DEFAULT_LATE_OFFSET_MINUTES)
    }
}

/// The lifecycle position of an activity, derived from time comparison and
/// report existence. Never stored authoritatively on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityStatus {
    Planned,
    InProgress,
    Finished,
    Reported,
}

impl ActivityStatus {
    /// Terminal statuses end any guided workflow tracking this activity.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ActivityStatus::Finished | ActivityStatus::Reported)
    }
}

/// A scheduled tutoring or group session.
#[derive(Debug, Clone)]
pub struct Activity {
    pub id: Uuid,
    pub activity_type_id: Uuid,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub late_threshold: LateThreshold,
    pub tutor_id: Uuid,
    pub group_id: Option<Uuid>,
    pub level: Option<String>,
    pub material: Material,
}

impl Activity {
    /// Derives the lifecycle status at the given local moment.
    ///
    /// An activity with no time range yet is always `Planned`. A report, once
    /// it exists, dominates the time comparison.
    pub fn status_at(&self, now: NaiveDateTime, has_report: bool) -> ActivityStatus {
        if has_report {
            return ActivityStatus::Reported;
        }
        let (Some(start), Some(end)) = (self.start_time, self.end_time) else {
            return ActivityStatus::Planned;
        };
        let starts = self.date.and_time(start);
        let ends = self.date.and_time(end);
        if now < starts {
            ActivityStatus::Planned
        } else if now < ends {
            ActivityStatus::InProgress
        } else {
            ActivityStatus::Finished
        }
    }
}

/// Validates a start/end pair against the ordering and minimum-duration rules.
///
/// Returns the duration in minutes on success.
pub fn validate_time_range(
    start: NaiveTime,
    end: NaiveTime,
    min_minutes: i64,
) -> Result<i64, TimeRangeError> {
    if end <= start {
        return Err(TimeRangeError::EndNotAfterStart);
    }
    let minutes = (end - start).num_minutes();
    if minutes < min_minutes {
        return Err(TimeRangeError::TooShort { minutes, min_minutes });
    }
    Ok(minutes)
}

/// Why a start/end pair was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimeRangeError {
    #[error("end time must be strictly after start time")]
    EndNotAfterStart,
    #[error("duration of {minutes} minutes is below the {min_minutes} minute minimum")]
    TooShort { minutes: i64, min_minutes: i64 },
}

/// An immutable catalog row in the reference-material list.
///
/// Owned exclusively by the reference cache; replaced wholesale on refresh,
/// never patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMaterial {
    pub id: Uuid,
    pub subject: String,
    pub name: String,
    pub category: String,
    pub sort_order: i32,
}

/// The derived artifact confirming an activity occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id: Uuid,
    pub activity_id: Uuid,
    pub notes: String,
    pub attendee_count: u32,
    pub created_at: NaiveDateTime,
}

// Lookup rows used to populate forms and resolve display names.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tutor {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityType {
    pub id: Uuid,
    pub name: String,
    /// Whether the manual-attendance step of the guided workflow applies.
    pub supports_attendance: bool,
}

/// A file attached to an activity at creation time.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// The outbound payload for creating an activity. Multipart-capable so file
/// attachments can ride along with the structured fields.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub activity_type_id: Uuid,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub late_threshold: LateThreshold,
    pub tutor_id: Uuid,
    pub group_id: Option<Uuid>,
    pub level: Option<String>,
    pub material: Material,
    pub attachments: Vec<Attachment>,
}

/// The outbound payload for updating an activity: a plain structured record.
#[derive(Debug, Clone)]
pub struct ActivityUpdate {
    pub activity_type_id: Uuid,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub late_threshold: LateThreshold,
    pub tutor_id: Uuid,
    pub group_id: Option<Uuid>,
    pub level: Option<String>,
    pub material: Material,
}

/// The outbound payload for filing a report.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub activity_id: Uuid,
    pub notes: String,
    pub attendee_count: u32,
}

/// Server-side filters for the activity list.
#[derive(Debug, Clone, Default)]
pub struct ActivityFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub tutor_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub page: Option<u32>,
}

/// One page of a server-side list.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total: u64,
}
