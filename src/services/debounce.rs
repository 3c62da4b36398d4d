//! Cancelable one-shot timer used to debounce keystrokes.
//!
//! At most one timer is armed at any time: scheduling a new action aborts
//! the previous one if it has not fired yet. Each schedule gets a generation
//! number so the receiver of a fired action can tell whether a newer
//! schedule superseded it while the action was already in flight.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            generation: 0,
        }
    }

    /// Arm the timer. `make` receives the new generation and returns the
    /// action to run once `delay` elapses without another call to
    /// `schedule` or `cancel`. Must be called within a tokio runtime.
    pub fn schedule<F, Fut>(&mut self, make: F) -> u64
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.generation += 1;

        let delay = self.delay;
        let action = make(self.generation);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));

        self.generation
    }

    /// Abort the armed timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Acknowledge that the action of `generation` fired. Returns false when
    /// a later schedule superseded it.
    pub fn fired(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
