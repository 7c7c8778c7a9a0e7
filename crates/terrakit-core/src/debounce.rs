//! Trailing-edge debouncer.
//!
//! Each trigger cancels any previously scheduled execution and schedules a
//! new one after the configured delay, so a burst of triggers runs the
//! callback exactly once, after input settles. Used to rate-limit
//! resolution-driven recomputation during continuous zoom gestures.
//!
//! Requires a tokio runtime; `call` panics outside of one.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Debounced task scheduler with trailing-edge semantics.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Creates a debouncer with the given settle delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// The configured settle delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `callback` to run after the settle delay, replacing any
    /// previously scheduled callback that has not fired yet.
    pub fn call<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut pending = self.pending.lock();
        if let Some(task) = pending.take() {
            task.abort();
        }
        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        }));
    }

    /// Cancels the pending callback, if any.
    pub fn cancel(&self) {
        if let Some(task) = self.pending.lock().take() {
            task.abort();
        }
    }

    /// Whether a callback is currently scheduled and has not completed.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(task) = self.pending.get_mut().take() {
            task.abort();
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
