pub mod advisory;
pub mod form;
pub mod lookups;
pub mod reference_cache;
pub mod report_cache;
pub mod session;
pub mod workflow;

// Re-export the pieces screens touch directly.
pub use advisory::{AdvisoryInput, ConflictAdvisory};
pub use form::{ActivityForm, SubmitMode, SubmitState, TimeField};
pub use lookups::{LookupData, Lookups};
pub use reference_cache::{CacheRead, ReferenceMaterialCache};
pub use report_cache::{ReportStatus, ReportStatusCache};
pub use session::{ListInvalidation, SessionState};
pub use workflow::{GuidedWorkflow, WorkflowCursor, WorkflowStep};
