//! services/app/src/state/form.rs
//!
//! The activity form controller: one cohesive read/write surface over the
//! form fields, cross-field reset rules, time validation, the conflict
//! advisory, and the submission state machine.

use activity_core::domain::{
    validate_time_range, Activity, ActivityType, ActivityUpdate, Attachment, Group,
    LateThreshold, Material, NewActivity, TimeRangeError, Tutor,
};
use activity_core::ports::{ActivityService, PortError};
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::advisory::{AdvisoryInput, ConflictAdvisory};
use crate::state::lookups::LookupData;
use crate::state::session::ListInvalidation;

// User-facing validation messages.
const MSG_INVALID_DURATION: &str = "Durasi Tidak Valid";
const MSG_END_BEFORE_START: &str = "Waktu selesai harus setelah waktu mulai";
const MSG_LATE_BEFORE_START: &str = "Batas terlambat harus setelah waktu mulai";
const MSG_TYPE_REQUIRED: &str = "Jenis kegiatan wajib dipilih";
const MSG_DATE_REQUIRED: &str = "Tanggal wajib diisi";
const MSG_TUTOR_REQUIRED: &str = "Tutor wajib dipilih";
const MSG_GROUP_REQUIRED: &str = "Kelompok wajib dipilih";
const MSG_MATERIAL_REQUIRED: &str = "Materi wajib diisi";
const MSG_TIMES_REQUIRED: &str = "Waktu mulai dan selesai wajib diisi";

/// Which time field a `set_time` call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
    LateThreshold,
}

/// Create versus update submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update(Uuid),
}

/// The submission state machine. Terminal states persist until the user
/// acknowledges them; there is no silent retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Succeeded,
    FailedValidation(String),
    FailedConflict(Vec<String>),
    FailedOther(String),
}

/// The activity form controller.
pub struct ActivityForm {
    api: Arc<dyn ActivityService>,
    invalidation: broadcast::Sender<ListInvalidation>,
    advisory: ConflictAdvisory,
    min_minutes: i64,

    activity_type: Option<ActivityType>,
    tutor: Option<Tutor>,
    group: Option<Group>,
    level: Option<String>,
    date: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    late_threshold: LateThreshold,
    material: Material,
    attachments: Vec<Attachment>,

    submit_state: SubmitState,
}

impl ActivityForm {
    pub fn new(
        api: Arc<dyn ActivityService>,
        invalidation: broadcast::Sender<ListInvalidation>,
        min_minutes: i64,
        advisory_debounce: Duration,
    ) -> Self {
        Self {
            api,
            invalidation,
            advisory: ConflictAdvisory::new(advisory_debounce),
            min_minutes,
            activity_type: None,
            tutor: None,
            group: None,
            level: None,
            date: None,
            start_time: None,
            end_time: None,
            late_threshold: LateThreshold::default(),
            material: Material::default(),
            attachments: Vec::new(),
            submit_state: SubmitState::Idle,
        }
    }

    /// Seeds the form from an existing activity for edit mode, resolving the
    /// referenced lookup rows for display.
    pub fn prefill(&mut self, activity: &Activity, lookups: &LookupData) {
        self.activity_type = lookups.activity_type(activity.activity_type_id).cloned();
        self.tutor = lookups
            .tutors
            .iter()
            .find(|t| t.id == activity.tutor_id)
            .cloned();
        self.group = activity
            .group_id
            .and_then(|id| lookups.groups.iter().find(|g| g.id == id).cloned());
        self.level = activity.level.clone();
        self.date = Some(activity.date);
        self.start_time = activity.start_time;
        self.end_time = activity.end_time;
        self.late_threshold = activity.late_threshold;
        self.material = activity.material.clone();
        self.refresh_advisory();
    }

    //-------------------------------------------------------------------------------------
    // Field mutations
    //-------------------------------------------------------------------------------------

    /// Selects the activity type. Group, level, and material are no longer
    /// valid in the new context and are cleared.
    pub fn select_activity_type(&mut self, activity_type: ActivityType) {
        self.activity_type = Some(activity_type);
        self.group = None;
        self.level = None;
        self.material = Material::default();
        self.refresh_advisory();
    }

    /// Selects the group; the material selection belongs to the old group
    /// context and is cleared.
    pub fn select_group(&mut self, group: Group) {
        self.group = Some(group);
        self.material = Material::default();
        self.refresh_advisory();
    }

    pub fn select_tutor(&mut self, tutor: Tutor) {
        self.tutor = Some(tutor);
        self.refresh_advisory();
    }

    pub fn set_level(&mut self, level: Option<String>) {
        self.level = level;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
        self.refresh_advisory();
    }

    /// Switches between catalog-backed and free-text material capture. Each
    /// switch clears the other mode's data.
    pub fn toggle_manual_material(&mut self, manual: bool) {
        if manual == self.material.is_manual() {
            return;
        }
        self.material = if manual {
            Material::Manual {
                subject: String::new(),
                name: String::new(),
            }
        } else {
            Material::Catalog(None)
        };
    }

    /// Picks a catalog material; switches to catalog mode if needed.
    pub fn select_catalog_material(&mut self, material_id: Uuid) {
        self.material = Material::Catalog(Some(material_id));
    }

    /// Captures free-text material; switches to manual mode if needed.
    pub fn set_manual_material(&mut self, subject: String, name: String) {
        self.material = Material::Manual { subject, name };
    }

    pub fn set_late_offset(&mut self, minutes: i64) {
        self.late_threshold = LateThreshold::OffsetMinutes(minutes);
    }

    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    /// Commits a time change, or rejects it leaving the stored fields
    /// unchanged and returning the user-facing message. A committed change
    /// restarts the conflict advisory on the new tuple.
    pub fn set_time(&mut self, field: TimeField, value: NaiveTime) -> Result<(), String> {
        let (start, end, late) = match field {
            TimeField::Start => (Some(value), self.end_time, self.late_threshold),
            TimeField::End => (self.start_time, Some(value), self.late_threshold),
            TimeField::LateThreshold => {
                (self.start_time, self.end_time, LateThreshold::Explicit(value))
            }
        };

        if let (Some(s), Some(e)) = (start, end) {
            validate_time_range(s, e, self.min_minutes).map_err(time_range_message)?;
        }
        if let (Some(s), LateThreshold::Explicit(t)) = (start, late) {
            if t <= s {
                return Err(MSG_LATE_BEFORE_START.to_string());
            }
        }

        self.start_time = start;
        self.end_time = end;
        self.late_threshold = late;
        self.refresh_advisory();
        Ok(())
    }

    //-------------------------------------------------------------------------------------
    // Read accessors for the UI
    //-------------------------------------------------------------------------------------

    pub fn activity_type(&self) -> Option<&ActivityType> {
        self.activity_type.as_ref()
    }

    pub fn tutor(&self) -> Option<&Tutor> {
        self.tutor.as_ref()
    }

    pub fn group(&self) -> Option<&Group> {
        self.group.as_ref()
    }

    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<NaiveTime> {
        self.end_time
    }

    pub fn late_threshold(&self) -> LateThreshold {
        self.late_threshold
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// The current advisory text; empty until a complete tuple settles.
    pub fn conflict_advisory(&self) -> String {
        self.advisory.current()
    }

    pub fn submit_state(&self) -> &SubmitState {
        &self.submit_state
    }

    /// Exposed so the UI boundary can suppress duplicate submit taps.
    pub fn is_submitting(&self) -> bool {
        matches!(self.submit_state, SubmitState::Submitting)
    }

    //-------------------------------------------------------------------------------------
    // Validation and submission
    //-------------------------------------------------------------------------------------

    /// The authoritative pre-submit check.
    pub fn validate(&self) -> Result<(), String> {
        if self.activity_type.is_none() {
            return Err(MSG_TYPE_REQUIRED.to_string());
        }
        if self.date.is_none() {
            return Err(MSG_DATE_REQUIRED.to_string());
        }
        if self.tutor.is_none() {
            return Err(MSG_TUTOR_REQUIRED.to_string());
        }
        if self.group.is_none() {
            return Err(MSG_GROUP_REQUIRED.to_string());
        }
        if !self.material.is_complete() {
            return Err(MSG_MATERIAL_REQUIRED.to_string());
        }
        let (Some(start), Some(end)) = (self.start_time, self.end_time) else {
            return Err(MSG_TIMES_REQUIRED.to_string());
        };
        validate_time_range(start, end, self.min_minutes).map_err(time_range_message)?;
        if let LateThreshold::Explicit(t) = self.late_threshold {
            if t <= start {
                return Err(MSG_LATE_BEFORE_START.to_string());
            }
        }
        Ok(())
    }

    /// Builds and sends the outbound payload.
    ///
    /// Exactly one submission may run at a time; the state machine moves
    /// `Idle -> Submitting -> {Succeeded | FailedValidation | FailedConflict
    /// | FailedOther}` and `acknowledge` returns it to `Idle`.
    pub async fn submit(&mut self, mode: SubmitMode) -> Result<Activity, AppError> {
        if self.is_submitting() {
            return Err(AppError::Internal(
                "A submission is already in progress".to_string(),
            ));
        }
        if let Err(message) = self.validate() {
            self.submit_state = SubmitState::FailedValidation(message.clone());
            return Err(AppError::Validation(message));
        }
        self.submit_state = SubmitState::Submitting;

        let result = match mode {
            SubmitMode::Create => self.api.create_activity(&self.create_payload()).await,
            SubmitMode::Update(id) => {
                self.api.update_activity(id, &self.update_payload()).await
            }
        };

        match result {
            Ok(activity) => {
                info!(activity_id = %activity.id, "Activity submission succeeded");
                self.submit_state = SubmitState::Succeeded;
                let signal = match mode {
                    SubmitMode::Create => ListInvalidation::Created(activity.id),
                    SubmitMode::Update(_) => ListInvalidation::Updated(activity.id),
                };
                // No receivers is fine; the signal is best-effort.
                let _ = self.invalidation.send(signal);
                Ok(activity)
            }
            Err(PortError::ScheduleConflict(conflicts)) => {
                warn!(count = conflicts.len(), "Activity submission rejected with conflicts");
                self.submit_state = SubmitState::FailedConflict(conflicts.clone());
                Err(AppError::ScheduleConflict(conflicts))
            }
            Err(e) => {
                warn!(error = %e, "Activity submission failed");
                self.submit_state = SubmitState::FailedOther(e.to_string());
                Err(AppError::Port(e))
            }
        }
    }

    /// Returns the state machine to `Idle` after the user has seen the
    /// outcome. A no-op while a submission is still running.
    pub fn acknowledge(&mut self) {
        if !self.is_submitting() {
            self.submit_state = SubmitState::Idle;
        }
    }

    //-------------------------------------------------------------------------------------
    // Internals
    //-------------------------------------------------------------------------------------

    fn refresh_advisory(&self) {
        self.advisory.update(AdvisoryInput {
            date: self.date,
            start: self.start_time,
            end: self.end_time,
            tutor_name: self.tutor.as_ref().map(|t| t.name.clone()),
            group_name: self.group.as_ref().map(|g| g.name.clone()),
        });
    }

    fn create_payload(&self) -> NewActivity {
        NewActivity {
            activity_type_id: self.activity_type.as_ref().map(|t| t.id).unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            start_time: self.start_time,
            end_time: self.end_time,
            late_threshold: self.late_threshold,
            tutor_id: self.tutor.as_ref().map(|t| t.id).unwrap_or_default(),
            group_id: self.group.as_ref().map(|g| g.id),
            level: self.level.clone(),
            material: self.material.clone(),
            attachments: self.attachments.clone(),
        }
    }

    fn update_payload(&self) -> ActivityUpdate {
        ActivityUpdate {
            activity_type_id: self.activity_type.as_ref().map(|t| t.id).unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            start_time: self.start_time,
            end_time: self.end_time,
            late_threshold: self.late_threshold,
            tutor_id: self.tutor.as_ref().map(|t| t.id).unwrap_or_default(),
            group_id: self.group.as_ref().map(|g| g.id),
            level: self.level.clone(),
            material: self.material.clone(),
        }
    }
}

fn time_range_message(err: TimeRangeError) -> String {
    match err {
        TimeRangeError::EndNotAfterStart => MSG_END_BEFORE_START.to_string(),
        TimeRangeError::TooShort { .. } => MSG_INVALID_DURATION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_core::domain::{ActivityFilters, Page};
    use activity_core::ports::PortResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted activity service: succeeds, or fails with a fixed error.
    struct FakeActivities {
        failure: Mutex<Option<PortError>>,
    }

    impl FakeActivities {
        fn ok() -> Self {
            Self { failure: Mutex::new(None) }
        }

        fn failing(err: PortError) -> Self {
            Self { failure: Mutex::new(Some(err)) }
        }

        fn respond(&self, payload_echo: Activity) -> PortResult<Activity> {
            match self.failure.lock().unwrap().clone() {
                Some(err) => Err(err),
                None => Ok(payload_echo),
            }
        }
    }

    #[async_trait]
    impl ActivityService for FakeActivities {
        async fn list_activities(
            &self,
            _filters: &ActivityFilters,
        ) -> PortResult<Page<Activity>> {
            Ok(Page { items: vec![], page: 1, total: 0 })
        }

        async fn get_activity(&self, _id: Uuid) -> PortResult<Activity> {
            Err(PortError::NotFound("kegiatan tidak ditemukan".to_string()))
        }

        async fn create_activity(&self, payload: &NewActivity) -> PortResult<Activity> {
            self.respond(Activity {
                id: Uuid::new_v4(),
                activity_type_id: payload.activity_type_id,
                date: payload.date,
                start_time: payload.start_time,
                end_time: payload.end_time,
                late_threshold: payload.late_threshold,
                tutor_id: payload.tutor_id,
                group_id: payload.group_id,
                level: payload.level.clone(),
                material: payload.material.clone(),
            })
        }

        async fn update_activity(
            &self,
            id: Uuid,
            payload: &ActivityUpdate,
        ) -> PortResult<Activity> {
            self.respond(Activity {
                id,
                activity_type_id: payload.activity_type_id,
                date: payload.date,
                start_time: payload.start_time,
                end_time: payload.end_time,
                late_threshold: payload.late_threshold,
                tutor_id: payload.tutor_id,
                group_id: payload.group_id,
                level: payload.level.clone(),
                material: payload.material.clone(),
            })
        }

        async fn delete_activity(&self, _id: Uuid) -> PortResult<()> {
            Ok(())
        }
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn form_with(api: Arc<dyn ActivityService>) -> (ActivityForm, broadcast::Receiver<ListInvalidation>) {
        let (tx, rx) = broadcast::channel(8);
        (ActivityForm::new(api, tx, 45, Duration::from_secs(1)), rx)
    }

    fn tutor() -> Tutor {
        Tutor { id: Uuid::new_v4(), name: "Budi".to_string() }
    }

    fn group() -> Group {
        Group { id: Uuid::new_v4(), name: "Kelompok A".to_string() }
    }

    fn activity_type() -> ActivityType {
        ActivityType {
            id: Uuid::new_v4(),
            name: "Bimbingan Belajar".to_string(),
            supports_attendance: true,
        }
    }

    /// Fills every mandatory field with a valid 09:00-10:00 slot.
    fn fill_valid(form: &mut ActivityForm) {
        form.select_activity_type(activity_type());
        form.select_group(group());
        form.select_tutor(tutor());
        form.set_date(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        form.set_time(TimeField::Start, t(9, 0)).unwrap();
        form.set_time(TimeField::End, t(10, 0)).unwrap();
        form.select_catalog_material(Uuid::new_v4());
    }

    #[tokio::test]
    async fn short_duration_is_rejected_and_fields_stay_unchanged() {
        let (mut form, _rx) = form_with(Arc::new(FakeActivities::ok()));
        form.set_time(TimeField::Start, t(9, 0)).unwrap();

        let err = form.set_time(TimeField::End, t(9, 30)).unwrap_err();
        assert_eq!(err, "Durasi Tidak Valid");
        assert_eq!(form.start_time(), Some(t(9, 0)));
        assert_eq!(form.end_time(), None);
    }

    #[tokio::test]
    async fn end_not_after_start_is_rejected() {
        let (mut form, _rx) = form_with(Arc::new(FakeActivities::ok()));
        form.set_time(TimeField::Start, t(10, 0)).unwrap();
        let err = form.set_time(TimeField::End, t(10, 0)).unwrap_err();
        assert_eq!(err, "Waktu selesai harus setelah waktu mulai");
        assert_eq!(form.end_time(), None);
    }

    #[tokio::test]
    async fn explicit_late_threshold_must_follow_start() {
        let (mut form, _rx) = form_with(Arc::new(FakeActivities::ok()));
        form.set_time(TimeField::Start, t(9, 0)).unwrap();
        let err = form.set_time(TimeField::LateThreshold, t(8, 45)).unwrap_err();
        assert_eq!(err, "Batas terlambat harus setelah waktu mulai");
        assert_eq!(form.late_threshold(), LateThreshold::default());

        form.set_time(TimeField::LateThreshold, t(9, 15)).unwrap();
        assert_eq!(form.late_threshold(), LateThreshold::Explicit(t(9, 15)));
    }

    #[tokio::test]
    async fn activity_type_change_clears_dependent_fields() {
        let (mut form, _rx) = form_with(Arc::new(FakeActivities::ok()));
        form.select_group(group());
        form.set_level(Some("Dasar".to_string()));
        form.select_catalog_material(Uuid::new_v4());

        form.select_activity_type(activity_type());
        assert!(form.group().is_none());
        assert!(form.level().is_none());
        assert_eq!(form.material(), &Material::Catalog(None));
    }

    #[tokio::test]
    async fn group_change_clears_material_only() {
        let (mut form, _rx) = form_with(Arc::new(FakeActivities::ok()));
        form.select_activity_type(activity_type());
        form.select_catalog_material(Uuid::new_v4());

        form.select_group(group());
        assert!(form.activity_type().is_some());
        assert_eq!(form.material(), &Material::Catalog(None));
    }

    #[tokio::test]
    async fn toggling_material_mode_clears_the_other_mode() {
        let (mut form, _rx) = form_with(Arc::new(FakeActivities::ok()));
        form.select_catalog_material(Uuid::new_v4());

        form.toggle_manual_material(true);
        assert_eq!(
            form.material(),
            &Material::Manual { subject: String::new(), name: String::new() }
        );

        form.set_manual_material("Matematika".to_string(), "Pecahan".to_string());
        form.toggle_manual_material(false);
        assert_eq!(form.material(), &Material::Catalog(None));
    }

    #[tokio::test]
    async fn validation_reports_the_first_missing_field() {
        let (mut form, _rx) = form_with(Arc::new(FakeActivities::ok()));
        assert_eq!(form.validate().unwrap_err(), "Jenis kegiatan wajib dipilih");

        form.select_activity_type(activity_type());
        assert_eq!(form.validate().unwrap_err(), "Tanggal wajib diisi");

        form.set_date(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(form.validate().unwrap_err(), "Tutor wajib dipilih");

        form.select_tutor(tutor());
        assert_eq!(form.validate().unwrap_err(), "Kelompok wajib dipilih");

        form.select_group(group());
        assert_eq!(form.validate().unwrap_err(), "Materi wajib diisi");

        form.toggle_manual_material(true);
        form.set_manual_material("Matematika".to_string(), "Pecahan".to_string());
        assert_eq!(form.validate().unwrap_err(), "Waktu mulai dan selesai wajib diisi");

        form.set_time(TimeField::Start, t(9, 0)).unwrap();
        form.set_time(TimeField::End, t(10, 0)).unwrap();
        assert!(form.validate().is_ok());
    }

    #[tokio::test]
    async fn successful_submit_fires_the_invalidation_signal() {
        let (mut form, mut rx) = form_with(Arc::new(FakeActivities::ok()));
        fill_valid(&mut form);

        let created = form.submit(SubmitMode::Create).await.unwrap();
        assert_eq!(form.submit_state(), &SubmitState::Succeeded);
        assert_eq!(rx.try_recv().unwrap(), ListInvalidation::Created(created.id));

        form.acknowledge();
        assert_eq!(form.submit_state(), &SubmitState::Idle);
    }

    #[tokio::test]
    async fn conflict_rejection_carries_the_server_list() {
        let conflicts = vec!["Tutor X sudah memiliki kegiatan lain".to_string()];
        let (mut form, _rx) = form_with(Arc::new(FakeActivities::failing(
            PortError::ScheduleConflict(conflicts.clone()),
        )));
        fill_valid(&mut form);

        let err = form.submit(SubmitMode::Create).await.unwrap_err();
        assert!(matches!(err, AppError::ScheduleConflict(ref list) if *list == conflicts));
        assert_eq!(form.submit_state(), &SubmitState::FailedConflict(conflicts));
    }

    #[tokio::test]
    async fn generic_failure_is_distinct_from_conflict() {
        let (mut form, _rx) = form_with(Arc::new(FakeActivities::failing(
            PortError::Unexpected("500".to_string()),
        )));
        fill_valid(&mut form);

        let err = form.submit(SubmitMode::Create).await.unwrap_err();
        assert!(matches!(err, AppError::Port(PortError::Unexpected(_))));
        assert!(matches!(form.submit_state(), SubmitState::FailedOther(_)));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_network() {
        let (mut form, mut rx) = form_with(Arc::new(FakeActivities::ok()));
        form.set_time(TimeField::Start, t(9, 0)).unwrap();

        let err = form.submit(SubmitMode::Create).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(matches!(form.submit_state(), SubmitState::FailedValidation(_)));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn committed_time_change_recomputes_the_advisory() {
        let (mut form, _rx) = form_with(Arc::new(FakeActivities::ok()));
        fill_valid(&mut form);

        tokio::time::advance(Duration::from_secs(1)).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        let settled = form.conflict_advisory();
        assert!(settled.contains("Budi"));
        assert!(settled.contains("09:00-10:00"));

        // A new end time clears the advisory and restarts the debounce.
        form.set_time(TimeField::End, t(11, 0)).unwrap();
        assert_eq!(form.conflict_advisory(), "");
        tokio::time::advance(Duration::from_secs(1)).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        assert!(form.conflict_advisory().contains("09:00-11:00"));
    }

    #[tokio::test]
    async fn attachments_are_included_in_the_create_payload() {
        let (mut form, _rx) = form_with(Arc::new(FakeActivities::ok()));
        fill_valid(&mut form);
        form.add_attachment(Attachment {
            file_name: "dokumentasi.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: bytes::Bytes::from_static(b"\xff\xd8\xff"),
        });

        let payload = form.create_payload();
        assert_eq!(payload.attachments.len(), 1);
        assert_eq!(payload.attachments[0].file_name, "dokumentasi.jpg");
    }

    #[tokio::test]
    async fn update_mode_sends_a_structured_record() {
        let (mut form, mut rx) = form_with(Arc::new(FakeActivities::ok()));
        fill_valid(&mut form);

        let id = Uuid::new_v4();
        let updated = form.submit(SubmitMode::Update(id)).await.unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(rx.try_recv().unwrap(), ListInvalidation::Updated(id));
    }
}
