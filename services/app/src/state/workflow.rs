//! services/app/src/state/workflow.rs
//!
//! The cross-screen guided workflow tracker (activity detail -> manual
//! attendance -> activity report). A single process-wide cursor slot:
//! checkpoints re-stamp it, terminal activity statuses clear it.

use activity_core::domain::ActivityStatus;
use std::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// The navigation checkpoints the guided flow recognizes. They are not a
/// fixed linear sequence; manual attendance may be skipped when the activity
/// type does not support it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    ActivityDetail,
    ManualAttendance,
    ActivityReport,
}

/// The single-slot cursor for an in-progress guided flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowCursor {
    pub activity_id: Uuid,
    pub step: WorkflowStep,
    pub last_status: ActivityStatus,
}

/// Process-wide guided-workflow tracker. Only one flow may be active at a
/// time; a checkpoint for a different activity supersedes the previous
/// cursor.
#[derive(Default)]
pub struct GuidedWorkflow {
    cursor: Mutex<Option<WorkflowCursor>>,
}

impl GuidedWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that navigation reached a checkpoint for an activity.
    ///
    /// Re-entering the same checkpoint is idempotent; a terminal status
    /// resets the cursor instead of stamping it.
    pub fn checkpoint(&self, activity_id: Uuid, step: WorkflowStep, status: ActivityStatus) {
        let mut cursor = self.cursor.lock().unwrap();
        if status.is_terminal() {
            if cursor.take().is_some() {
                info!(%activity_id, ?status, "Guided workflow finished");
            }
            return;
        }
        debug!(%activity_id, ?step, "Guided workflow checkpoint");
        *cursor = Some(WorkflowCursor {
            activity_id,
            step,
            last_status: status,
        });
    }

    /// Applies the terminal rule on any later sighting of the tracked
    /// activity, clearing a stale cursor left by an abandoned flow.
    pub fn observe_status(&self, activity_id: Uuid, status: ActivityStatus) {
        let mut cursor = self.cursor.lock().unwrap();
        match cursor.as_mut() {
            Some(c) if c.activity_id == activity_id => {
                if status.is_terminal() {
                    info!(%activity_id, ?status, "Guided workflow reached terminal status");
                    *cursor = None;
                } else {
                    c.last_status = status;
                }
            }
            _ => {}
        }
    }

    /// Clears the cursor when its activity is deleted remotely.
    pub fn forget_activity(&self, activity_id: Uuid) {
        let mut cursor = self.cursor.lock().unwrap();
        if cursor.as_ref().is_some_and(|c| c.activity_id == activity_id) {
            *cursor = None;
        }
    }

    /// Explicitly abandons the flow.
    pub fn reset(&self) {
        *self.cursor.lock().unwrap() = None;
    }

    pub fn cursor(&self) -> Option<WorkflowCursor> {
        self.cursor.lock().unwrap().clone()
    }

    pub fn is_active(&self) -> bool {
        self.cursor.lock().unwrap().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoints_stamp_and_restamp_the_cursor() {
        let workflow = GuidedWorkflow::new();
        let id = Uuid::new_v4();

        workflow.checkpoint(id, WorkflowStep::ActivityDetail, ActivityStatus::Planned);
        assert_eq!(
            workflow.cursor(),
            Some(WorkflowCursor {
                activity_id: id,
                step: WorkflowStep::ActivityDetail,
                last_status: ActivityStatus::Planned,
            })
        );

        // Re-entering the same checkpoint is idempotent.
        workflow.checkpoint(id, WorkflowStep::ActivityDetail, ActivityStatus::Planned);
        assert_eq!(workflow.cursor().unwrap().step, WorkflowStep::ActivityDetail);

        // Skipping manual attendance straight to the report is allowed.
        workflow.checkpoint(id, WorkflowStep::ActivityReport, ActivityStatus::InProgress);
        let cursor = workflow.cursor().unwrap();
        assert_eq!(cursor.step, WorkflowStep::ActivityReport);
        assert_eq!(cursor.last_status, ActivityStatus::InProgress);
    }

    #[test]
    fn a_new_activity_supersedes_the_previous_cursor() {
        let workflow = GuidedWorkflow::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        workflow.checkpoint(first, WorkflowStep::ActivityDetail, ActivityStatus::Planned);
        workflow.checkpoint(second, WorkflowStep::ActivityDetail, ActivityStatus::Planned);
        assert_eq!(workflow.cursor().unwrap().activity_id, second);
    }

    #[test]
    fn terminal_status_resets_the_cursor() {
        let workflow = GuidedWorkflow::new();
        let id = Uuid::new_v4();

        workflow.checkpoint(id, WorkflowStep::ActivityReport, ActivityStatus::InProgress);
        workflow.checkpoint(id, WorkflowStep::ActivityReport, ActivityStatus::Reported);
        assert!(!workflow.is_active());
    }

    #[test]
    fn observing_a_terminal_status_clears_a_stale_cursor() {
        let workflow = GuidedWorkflow::new();
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();

        workflow.checkpoint(id, WorkflowStep::ManualAttendance, ActivityStatus::InProgress);

        // Sightings of other activities leave the cursor alone.
        workflow.observe_status(other, ActivityStatus::Finished);
        assert!(workflow.is_active());

        workflow.observe_status(id, ActivityStatus::Finished);
        assert!(!workflow.is_active());
    }

    #[test]
    fn non_terminal_observation_updates_last_status() {
        let workflow = GuidedWorkflow::new();
        let id = Uuid::new_v4();

        workflow.checkpoint(id, WorkflowStep::ActivityDetail, ActivityStatus::Planned);
        workflow.observe_status(id, ActivityStatus::InProgress);
        assert_eq!(
            workflow.cursor().unwrap().last_status,
            ActivityStatus::InProgress
        );
    }

    #[test]
    fn deletion_and_reset_both_clear_the_cursor() {
        let workflow = GuidedWorkflow::new();
        let id = Uuid::new_v4();

        workflow.checkpoint(id, WorkflowStep::ActivityDetail, ActivityStatus::Planned);
        workflow.forget_activity(Uuid::new_v4());
        assert!(workflow.is_active());
        workflow.forget_activity(id);
        assert!(!workflow.is_active());

        workflow.checkpoint(id, WorkflowStep::ActivityDetail, ActivityStatus::Planned);
        workflow.reset();
        assert!(workflow.cursor().is_none());
    }
}
