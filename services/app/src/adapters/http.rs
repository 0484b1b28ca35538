//! services/app/src/adapters/http.rs
//!
//! This module contains the HTTP adapter, which is the concrete
//! implementation of the service ports from the `core` crate. It talks to
//! the backend REST API using `reqwest` and normalizes transport failures
//! into structured `PortError` variants, so nothing downstream ever matches
//! on message strings.

use activity_core::domain::{
    Activity, ActivityFilters, ActivityType, ActivityUpdate, Group, LateThreshold, Material,
    NewActivity, NewReport, Page, ReferenceMaterial, Report, Tutor,
};
use activity_core::ports::{
    ActivityService, LookupService, PortError, PortResult, ReferenceMaterialService,
    ReportService,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use reqwest::{multipart, Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An HTTP adapter that implements every service port against the backend
/// REST API.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Creates a new `HttpApi` with the bearer token (when configured)
    /// installed as a default header.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = format!("Bearer {}", token)
                .parse()
                .map_err(|_| AppError::Internal("Invalid API token format".to_string()))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        // The timeout is generous so multipart uploads are not cut short.
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// The structured failure body the backend returns for rejected submissions.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    conflicts: Vec<String>,
}

/// Normalizes a non-success response into a `PortError`.
///
/// A conflict list in the body wins over the bare status code, so both a 409
/// and a validation-shaped rejection carrying conflicts surface as
/// `ScheduleConflict`.
async fn classify_failure(response: Response) -> PortError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
        if !parsed.conflicts.is_empty() {
            return PortError::ScheduleConflict(parsed.conflicts);
        }
        if status == StatusCode::NOT_FOUND {
            return PortError::NotFound(parsed.message);
        }
    }

    match status {
        StatusCode::NOT_FOUND => PortError::NotFound(body),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized,
        StatusCode::CONFLICT => PortError::ScheduleConflict(vec![body]),
        _ => PortError::Unexpected(format!("HTTP {}: {}", status, body)),
    }
}

/// Awaits a response and deserializes the success body.
async fn read_json<T: for<'de> Deserialize<'de>>(response: Response) -> PortResult<T> {
    if !response.status().is_success() {
        return Err(classify_failure(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| PortError::Unexpected(format!("Malformed response body: {}", e)))
}

/// Awaits a response expected to carry no useful body.
async fn read_ack(response: Response) -> PortResult<()> {
    if !response.status().is_success() {
        return Err(classify_failure(response).await);
    }
    Ok(())
}

fn transport_error(e: reqwest::Error) -> PortError {
    PortError::Unexpected(format!("Transport error: {}", e))
}

//=========================================================================================
// "Impure" Wire Record Structs
//=========================================================================================

#[derive(Serialize, Deserialize)]
struct ActivityRecord {
    id: Uuid,
    activity_type_id: Uuid,
    date: NaiveDate,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    late_time: Option<NaiveTime>,
    late_offset_minutes: Option<i64>,
    tutor_id: Uuid,
    group_id: Option<Uuid>,
    level: Option<String>,
    material_id: Option<Uuid>,
    material_subject: Option<String>,
    material_name: Option<String>,
}

impl ActivityRecord {
    fn to_domain(self) -> Activity {
        let material = match (self.material_id, self.material_subject, self.material_name) {
            (Some(id), _, _) => Material::Catalog(Some(id)),
            (None, Some(subject), Some(name)) => Material::Manual { subject, name },
            _ => Material::Catalog(None),
        };
        let late_threshold = match self.late_time {
            Some(t) => LateThreshold::Explicit(t),
            None => LateThreshold::OffsetMinutes(
                self.late_offset_minutes
                    .unwrap_or(activity_core::domain::DEFAULT_LATE_OFFSET_MINUTES),
            ),
        };
        Activity {
            id: self.id,
            activity_type_id: self.activity_type_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            late_threshold,
            tutor_id: self.tutor_id,
            group_id: self.group_id,
            level: self.level,
            material,
        }
    }
}

/// The structured fields sent for both create and update.
#[derive(Serialize)]
struct ActivityPayload {
    activity_type_id: Uuid,
    date: NaiveDate,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    late_time: Option<NaiveTime>,
    late_offset_minutes: Option<i64>,
    tutor_id: Uuid,
    group_id: Option<Uuid>,
    level: Option<String>,
    material_id: Option<Uuid>,
    material_subject: Option<String>,
    material_name: Option<String>,
}

impl ActivityPayload {
    fn from_parts(
        activity_type_id: Uuid,
        date: NaiveDate,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
        late_threshold: &LateThreshold,
        tutor_id: Uuid,
        group_id: Option<Uuid>,
        level: Option<String>,
        material: &Material,
    ) -> Self {
        let (late_time, late_offset_minutes) = match late_threshold {
            LateThreshold::Explicit(t) => (Some(*t), None),
            LateThreshold::OffsetMinutes(m) => (None, Some(*m)),
        };
        let (material_id, material_subject, material_name) = match material {
            Material::Catalog(id) => (*id, None, None),
            Material::Manual { subject, name } => {
                (None, Some(subject.clone()), Some(name.clone()))
            }
        };
        Self {
            activity_type_id,
            date,
            start_time,
            end_time,
            late_time,
            late_offset_minutes,
            tutor_id,
            group_id,
            level,
            material_id,
            material_subject,
            material_name,
        }
    }
}

#[derive(Deserialize)]
struct PageRecord<T> {
    items: Vec<T>,
    page: u32,
    total: u64,
}

#[derive(Deserialize)]
struct ReferenceMaterialRecord {
    id: Uuid,
    subject: String,
    name: String,
    category: String,
    sort_order: i32,
}

impl ReferenceMaterialRecord {
    fn to_domain(self) -> ReferenceMaterial {
        ReferenceMaterial {
            id: self.id,
            subject: self.subject,
            name: self.name,
            category: self.category,
            sort_order: self.sort_order,
        }
    }
}

#[derive(Deserialize)]
struct ReportRecord {
    id: Uuid,
    activity_id: Uuid,
    notes: String,
    attendee_count: u32,
    created_at: NaiveDateTime,
}

impl ReportRecord {
    fn to_domain(self) -> Report {
        Report {
            id: self.id,
            activity_id: self.activity_id,
            notes: self.notes,
            attendee_count: self.attendee_count,
            created_at: self.created_at,
        }
    }
}

#[derive(Deserialize)]
struct NamedRecord {
    id: Uuid,
    name: String,
}

#[derive(Deserialize)]
struct ActivityTypeRecord {
    id: Uuid,
    name: String,
    supports_attendance: bool,
}

//=========================================================================================
// Port Implementations
//=========================================================================================

#[async_trait]
impl ActivityService for HttpApi {
    async fn list_activities(&self, filters: &ActivityFilters) -> PortResult<Page<Activity>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(d) = filters.date_from {
            query.push(("date_from", d.to_string()));
        }
        if let Some(d) = filters.date_to {
            query.push(("date_to", d.to_string()));
        }
        if let Some(id) = filters.tutor_id {
            query.push(("tutor_id", id.to_string()));
        }
        if let Some(id) = filters.group_id {
            query.push(("group_id", id.to_string()));
        }
        if let Some(p) = filters.page {
            query.push(("page", p.to_string()));
        }

        let response = self
            .client
            .get(self.url("/activities"))
            .query(&query)
            .send()
            .await
            .map_err(transport_error)?;
        let page: PageRecord<ActivityRecord> = read_json(response).await?;
        Ok(Page {
            items: page.items.into_iter().map(ActivityRecord::to_domain).collect(),
            page: page.page,
            total: page.total,
        })
    }

    async fn get_activity(&self, id: Uuid) -> PortResult<Activity> {
        let response = self
            .client
            .get(self.url(&format!("/activities/{}", id)))
            .send()
            .await
            .map_err(transport_error)?;
        let record: ActivityRecord = read_json(response).await?;
        Ok(record.to_domain())
    }

    async fn create_activity(&self, payload: &NewActivity) -> PortResult<Activity> {
        let fields = ActivityPayload::from_parts(
            payload.activity_type_id,
            payload.date,
            payload.start_time,
            payload.end_time,
            &payload.late_threshold,
            payload.tutor_id,
            payload.group_id,
            payload.level.clone(),
            &payload.material,
        );
        let fields_json = serde_json::to_string(&fields)
            .map_err(|e| PortError::Unexpected(format!("Payload encoding failed: {}", e)))?;

        // Create is multipart so attachments ride along with the fields.
        let mut form = multipart::Form::new().text("activity", fields_json);
        for attachment in &payload.attachments {
            let part = multipart::Part::bytes(attachment.data.to_vec())
                .file_name(attachment.file_name.clone())
                .mime_str(&attachment.content_type)
                .map_err(|e| {
                    PortError::Unexpected(format!(
                        "Invalid attachment content type '{}': {}",
                        attachment.content_type, e
                    ))
                })?;
            form = form.part("attachments", part);
        }

        let response = self
            .client
            .post(self.url("/activities"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        let record: ActivityRecord = read_json(response).await?;
        Ok(record.to_domain())
    }

    async fn update_activity(
        &self,
        id: Uuid,
        payload: &ActivityUpdate,
    ) -> PortResult<Activity> {
        let fields = ActivityPayload::from_parts(
            payload.activity_type_id,
            payload.date,
            payload.start_time,
            payload.end_time,
            &payload.late_threshold,
            payload.tutor_id,
            payload.group_id,
            payload.level.clone(),
            &payload.material,
        );
        let response = self
            .client
            .put(self.url(&format!("/activities/{}", id)))
            .json(&fields)
            .send()
            .await
            .map_err(transport_error)?;
        let record: ActivityRecord = read_json(response).await?;
        Ok(record.to_domain())
    }

    async fn delete_activity(&self, id: Uuid) -> PortResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/activities/{}", id)))
            .send()
            .await
            .map_err(transport_error)?;
        read_ack(response).await
    }
}

#[async_trait]
impl ReferenceMaterialService for HttpApi {
    async fn list_reference_materials(&self) -> PortResult<Vec<ReferenceMaterial>> {
        let response = self
            .client
            .get(self.url("/reference-materials"))
            .send()
            .await
            .map_err(transport_error)?;
        let records: Vec<ReferenceMaterialRecord> = read_json(response).await?;
        Ok(records.into_iter().map(ReferenceMaterialRecord::to_domain).collect())
    }
}

#[async_trait]
impl LookupService for HttpApi {
    async fn list_tutors(&self) -> PortResult<Vec<Tutor>> {
        let response = self
            .client
            .get(self.url("/tutors"))
            .send()
            .await
            .map_err(transport_error)?;
        let records: Vec<NamedRecord> = read_json(response).await?;
        Ok(records
            .into_iter()
            .map(|r| Tutor { id: r.id, name: r.name })
            .collect())
    }

    async fn list_groups(&self) -> PortResult<Vec<Group>> {
        let response = self
            .client
            .get(self.url("/groups"))
            .send()
            .await
            .map_err(transport_error)?;
        let records: Vec<NamedRecord> = read_json(response).await?;
        Ok(records
            .into_iter()
            .map(|r| Group { id: r.id, name: r.name })
            .collect())
    }

    async fn list_activity_types(&self) -> PortResult<Vec<ActivityType>> {
        let response = self
            .client
            .get(self.url("/activity-types"))
            .send()
            .await
            .map_err(transport_error)?;
        let records: Vec<ActivityTypeRecord> = read_json(response).await?;
        Ok(records
            .into_iter()
            .map(|r| ActivityType {
                id: r.id,
                name: r.name,
                supports_attendance: r.supports_attendance,
            })
            .collect())
    }
}

#[async_trait]
impl ReportService for HttpApi {
    async fn get_report_for_activity(&self, activity_id: Uuid) -> PortResult<Report> {
        let response = self
            .client
            .get(self.url(&format!("/activities/{}/report", activity_id)))
            .send()
            .await
            .map_err(transport_error)?;
        let record: ReportRecord = read_json(response).await?;
        Ok(record.to_domain())
    }

    async fn create_report(&self, payload: &NewReport) -> PortResult<Report> {
        let body = serde_json::json!({
            "activity_id": payload.activity_id,
            "notes": payload.notes,
            "attendee_count": payload.attendee_count,
        });
        let response = self
            .client
            .post(self.url("/reports"))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let record: ReportRecord = read_json(response).await?;
        Ok(record.to_domain())
    }

    async fn delete_report(&self, report_id: Uuid) -> PortResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/reports/{}", report_id)))
            .send()
            .await
            .map_err(transport_error)?;
        read_ack(response).await
    }
}
