//! services/app/src/telemetry.rs
//!
//! Tracing subscriber setup, invoked once by the host application shell.

use crate::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber using the configured log level.
///
/// The host calls this exactly once at startup; a second call panics inside
/// `tracing`, so it is deliberately not retried here.
pub fn init(config: &Config) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
