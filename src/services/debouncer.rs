// src/services/debouncer.rs
//
// Reset-on-activity debouncer
//
// - Each push re-arms a single timer task; the previous one is aborted
// - A value is emitted only after a full quiet period without pushes
// - Emitted values arrive on an unbounded channel owned by the caller

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Debouncer<T> {
    quiet_period: Duration,
    output: mpsc::UnboundedSender<T>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<T> Debouncer<T>
where
    T: Send + 'static,
{
    /// Create a debouncer and the receiver of its stabilized values
    pub fn new(quiet_period: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (output, receiver) = mpsc::unbounded_channel();

        let debouncer = Self {
            quiet_period,
            output,
            pending: Arc::new(Mutex::new(None)),
        };

        (debouncer, receiver)
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Replace the pending value and restart the quiet period
    ///
    /// Must be called from within a tokio runtime.
    pub fn push(&self, value: T) {
        let output = self.output.clone();
        let quiet_period = self.quiet_period;

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            // Receiver gone means the session is shutting down
            let _ = output.send(value);
        }));
    }

    /// Drop the pending value, if any
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = pending.take() {
            task.abort();
        }
    }

    /// Whether a value is waiting for its quiet period to elapse
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = pending.take() {
            task.abort();
        }
    }
}
