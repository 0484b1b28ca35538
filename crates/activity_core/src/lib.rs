pub mod domain;
pub mod ports;

pub use domain::{
    Activity, ActivityFilters, ActivityStatus, ActivityType, ActivityUpdate, Attachment, Group,
    LateThreshold, Material, NewActivity, NewReport, Page, ReferenceMaterial, Report,
    TimeRangeError, Tutor,
};
pub use ports::{
    ActivityService, LookupService, PortError, PortResult, ReferenceMaterialService,
    ReportService,
};
