//! services/app/src/error.rs
//!
//! Defines the primary error type for the entire app service layer.

use crate::config::ConfigError;
use activity_core::ports::PortError;

/// The primary error type for the `app` crate.
///
/// Cache reads never produce this type; they absorb failures internally and
/// serve whatever last-known-good state they hold. Mutating operations
/// (submit, delete) propagate it so the UI can react.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A local, pre-submit validation failure. Never reaches the network
    /// boundary and is always user-correctable.
    #[error("{0}")]
    Validation(String),

    /// The server rejected a submission with a structured conflict list,
    /// kept intact for user-facing remediation suggestions.
    #[error("Jadwal bentrok: {}", .0.join("; "))]
    ScheduleConflict(Vec<String>),

    /// Represents an error that propagated up from one of the core service
    /// ports.
    #[error("Service Port Error: {0}")]
    Port(PortError),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl From<PortError> for AppError {
    /// Lifts a port failure, promoting the structured conflict variant so
    /// callers can branch on it without digging into the port layer.
    fn from(err: PortError) -> Self {
        match err {
            PortError::ScheduleConflict(list) => AppError::ScheduleConflict(list),
            other => AppError::Port(other),
        }
    }
}
