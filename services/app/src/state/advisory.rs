//! services/app/src/state/advisory.rs
//!
//! The debounced, purely local schedule-conflict advisory. Produces an
//! informational warning once the candidate tuple has been stable for the
//! debounce window; it never calls the network and asserts nothing about
//! actual conflicts, which the server verifies at submission time.

use chrono::{NaiveDate, NaiveTime};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// The candidate tuple the advisory is computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisoryInput {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub tutor_name: Option<String>,
    pub group_name: Option<String>,
}

impl AdvisoryInput {
    /// The complete, ordered tuple, or `None` when any required input is
    /// missing or the range is inverted.
    fn complete(&self) -> Option<(NaiveDate, NaiveTime, NaiveTime, &str)> {
        let date = self.date?;
        let start = self.start?;
        let end = self.end?;
        let tutor = self.tutor_name.as_deref().filter(|t| !t.trim().is_empty())?;
        if start >= end {
            return None;
        }
        Some((date, start, end, tutor))
    }
}

/// Debounce-driven advisory holder.
///
/// Every input change cancels the pending evaluation and restarts the timer;
/// dropping the holder cancels it too, so no late callback mutates state
/// after the owning screen is gone.
pub struct ConflictAdvisory {
    debounce: Duration,
    text: Arc<Mutex<String>>,
    pending: Mutex<Option<CancellationToken>>,
}

impl ConflictAdvisory {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            text: Arc::new(Mutex::new(String::new())),
            pending: Mutex::new(None),
        }
    }

    /// Feeds a new candidate tuple. Must be called from within the runtime.
    ///
    /// Any previous advisory clears immediately; a complete, ordered tuple
    /// schedules a recomputation after the debounce window.
    pub fn update(&self, input: AdvisoryInput) {
        self.cancel_pending();
        self.text.lock().unwrap().clear();

        let Some((date, start, end, tutor)) = input.complete() else {
            return;
        };

        let message = compose_message(date, start, end, tutor, input.group_name.as_deref());
        let token = CancellationToken::new();
        let text = Arc::clone(&self.text);
        let debounce = self.debounce;
        let task_token = token.clone();
        // Anchor the debounce window at the update call, not at the task's
        // first poll, so virtual-time tests observe the documented window.
        let timer = tokio::time::sleep(debounce);
        tokio::spawn(async move {
            tokio::select! {
                _ = task_token.cancelled() => {}
                _ = timer => {
                    debug!("Conflict advisory computed");
                    *text.lock().unwrap() = message;
                }
            }
        });
        *self.pending.lock().unwrap() = Some(token);
    }

    /// The advisory text; empty when no complete tuple has settled.
    pub fn current(&self) -> String {
        self.text.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.cancel_pending();
        self.text.lock().unwrap().clear();
    }

    fn cancel_pending(&self) {
        if let Some(token) = self.pending.lock().unwrap().take() {
            token.cancel();
        }
    }
}

impl Drop for ConflictAdvisory {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn compose_message(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    tutor: &str,
    group: Option<&str>,
) -> String {
    let mut message = format!(
        "Tutor {} sudah dijadwalkan pada {} pukul {}-{}",
        tutor,
        date.format("%d/%m/%Y"),
        start.format("%H:%M"),
        end.format("%H:%M"),
    );
    if let Some(group) = group.filter(|g| !g.trim().is_empty()) {
        message.push_str(&format!(" untuk kelompok {}", group));
    }
    message.push_str(". Periksa kembali kemungkinan bentrok jadwal.");
    message
}
