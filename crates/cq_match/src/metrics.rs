// Observability hook for match requests.
//
// The engine has no opinion about metrics backends; it only hands each
// finished request to whatever `MatchMetrics` implementation the host
// process registered. Registration is global and happens once at
// startup, so every `QuizMatcher` in the process reports to the same
// place.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::MatchOutcome;

/// Metrics observer for match operations.
pub trait MatchMetrics: Send + Sync {
    /// Record the outcome of one match request.
    ///
    /// `resolved` / `total` are the answer-resolution counts from the
    /// report, `latency` is the wall-clock duration of the computation,
    /// and `outcome` is what was returned to the caller.
    fn record_match(
        &self,
        outcome: &MatchOutcome,
        resolved: usize,
        total: usize,
        latency: Duration,
    );
}

// The recorder slot is a lazily built RwLock rather than a bare static
// so it can be installed, swapped, and cleared at runtime (tests do all
// three). A poisoned lock only means a panicking recorder; the slot
// itself is still usable.
fn recorder_slot() -> &'static RwLock<Option<Arc<dyn MatchMetrics>>> {
    static SLOT: OnceCell<RwLock<Option<Arc<dyn MatchMetrics>>>> = OnceCell::new();
    SLOT.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn MatchMetrics>> {
    let guard = recorder_slot()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global match metrics recorder.
///
/// Call once during startup; passing `None` detaches the current
/// recorder.
pub fn set_match_metrics(recorder: Option<Arc<dyn MatchMetrics>>) {
    let mut guard = recorder_slot()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
