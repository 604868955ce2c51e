//! Cancellable deferred-advance timers, keyed by phase.

use std::collections::HashMap;
use std::time::Duration;

use lesson_contract::Phase;
use lesson_engine::LessonAction;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Runs the engine's deferred phase advances without blocking the caller.
///
/// Scheduling a phase that already has a pending advance replaces it: the
/// earlier timer is cancelled so the phase advances exactly once per
/// completion wave. Dropping the scheduler cancels everything, so a torn
/// down runtime never receives a stale advance.
pub(crate) struct AdvanceScheduler {
    tx: mpsc::UnboundedSender<LessonAction>,
    pending: HashMap<Phase, CancellationToken>,
}

impl AdvanceScheduler {
    pub(crate) fn new(tx: mpsc::UnboundedSender<LessonAction>) -> Self {
        Self {
            tx,
            pending: HashMap::new(),
        }
    }

    /// Arms (or re-arms) the advance timer for `phase`.
    ///
    /// Must run inside a tokio runtime context.
    pub(crate) fn schedule(&mut self, phase: Phase, delay: Duration) {
        if let Some(previous) = self.pending.remove(&phase) {
            previous.cancel();
        }
        let token = CancellationToken::new();
        self.pending.insert(phase, token.clone());
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(LessonAction::AdvancePhase { phase });
                }
            }
        });
    }

    pub(crate) fn cancel_all(&mut self) {
        for (_, token) in self.pending.drain() {
            token.cancel();
        }
    }
}

impl Drop for AdvanceScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
