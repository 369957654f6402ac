//! Cancellable delayed execution.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

struct Pending {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Runs the most recently scheduled action after a quiet period.
///
/// Scheduling an action cancels the previous one if its timer has not fired.
/// Once the timer fires the action runs to completion; cancellation only
/// applies to the waiting phase.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<Pending>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `action` to run after the delay, replacing any pending action.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    trace!("debounced action cancelled");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }
            action.await;
        });

        if let Some(previous) = self.lock().replace(Pending { token, handle }) {
            previous.token.cancel();
        }
    }

    /// Cancel the pending action, if any.
    ///
    /// Returns `true` if an action was waiting or running.
    pub fn cancel(&self) -> bool {
        match self.lock().take() {
            Some(pending) => {
                pending.token.cancel();
                !pending.handle.is_finished()
            }
            None => false,
        }
    }

    /// Check whether an action is waiting or running.
    pub fn is_pending(&self) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|pending| !pending.handle.is_finished())
    }

    /// Wait for the latest scheduled action to finish or be cancelled.
    pub async fn flush(&self) {
        let Some(pending) = self.lock().take() else {
            return;
        };
        if let Err(e) = pending.handle.await {
            if e.is_panic() {
                warn!(error = %e, "debounced action panicked");
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.lock().take() {
            pending.token.cancel();
        }
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}
