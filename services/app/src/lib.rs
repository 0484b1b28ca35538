//! services/app/src/lib.rs
//!
//! The application-session layer behind the mobile UI: configuration, the
//! HTTP adapter for the backend REST API, and the state modules that keep
//! caches, the activity form, and the guided workflow coherent.

pub mod adapters;
pub mod config;
pub mod error;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use error::AppError;
pub use state::SessionState;
