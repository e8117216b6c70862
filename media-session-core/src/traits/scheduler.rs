use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Outcome of one repeating-task tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    /// The task is done; the scheduler drops it.
    Stop,
}

/// A repeating task body. Returning `Tick::Stop` self-terminates the
/// task without touching its handle.
pub type TickFn = Box<dyn FnMut() -> Tick + Send>;

/// Cancellation handle for one scheduled repeating task.
///
/// Cancelling is idempotent and affects only this task. Dropping the
/// handle cancels the task, so periodic work can never outlive its
/// owner.
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
    join: Option<thread::JoinHandle<()>>,
}

impl TaskHandle {
    /// Handle for a task driven externally (no thread to join).
    pub fn detached(cancelled: Arc<AtomicBool>) -> Self {
        Self {
            cancelled,
            join: None,
        }
    }

    /// Handle for a task running on its own thread; cancel joins it.
    pub fn threaded(cancelled: Arc<AtomicBool>, join: thread::JoinHandle<()>) -> Self {
        Self {
            cancelled,
            join: Some(join),
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(handle) = self.join.take() {
            let _ = handle.join();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Injected scheduler for the session's periodic tasks (level meter,
/// elapsed-time timer).
///
/// The production implementation runs each task on a named thread
/// (`timing::ThreadScheduler`); tests drive ticks by hand through a
/// manual implementation so no assertion depends on real time.
pub trait Scheduler: Send + Sync {
    /// Schedule `tick` to run every `period` until it returns
    /// `Tick::Stop` or the returned handle is cancelled. `label` names
    /// the task for diagnostics.
    fn schedule_repeating(&self, label: &str, period: Duration, tick: TickFn) -> TaskHandle;
}
