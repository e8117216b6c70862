use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use media_session_core::{Scheduler, TaskHandle, Tick, TickFn};

struct ManualTask {
    label: String,
    period: Duration,
    cancelled: Arc<AtomicBool>,
    tick: TickFn,
}

/// Scheduler driven by hand: nothing runs until `advance` is called,
/// so tests step the sampling loop and recording timer tick by tick
/// without depending on real time.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    tasks: Arc<Mutex<Vec<ManualTask>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every active task once, `ticks` times over. Tasks that
    /// return `Tick::Stop` or were cancelled are dropped.
    pub fn advance(&self, ticks: usize) {
        for _ in 0..ticks {
            // Run ticks outside the task-list lock so a tick that
            // schedules a new task cannot deadlock.
            let current = std::mem::take(&mut *self.tasks.lock());
            let mut keep = Vec::with_capacity(current.len());
            for mut task in current {
                if task.cancelled.load(Ordering::SeqCst) {
                    continue;
                }
                if (task.tick)() == Tick::Continue {
                    keep.push(task);
                } else {
                    task.cancelled.store(true, Ordering::SeqCst);
                }
            }
            let mut tasks = self.tasks.lock();
            let scheduled_during_tick = std::mem::take(&mut *tasks);
            keep.extend(scheduled_during_tick);
            *tasks = keep;
        }
    }

    /// Labels of tasks that are scheduled and not yet cancelled.
    pub fn active_labels(&self) -> Vec<String> {
        self.tasks
            .lock()
            .iter()
            .filter(|t| !t.cancelled.load(Ordering::SeqCst))
            .map(|t| t.label.clone())
            .collect()
    }

    pub fn active_tasks(&self) -> usize {
        self.active_labels().len()
    }

    pub fn period_of(&self, label: &str) -> Option<Duration> {
        self.tasks
            .lock()
            .iter()
            .find(|t| t.label == label)
            .map(|t| t.period)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, label: &str, period: Duration, tick: TickFn) -> TaskHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.tasks.lock().push(ManualTask {
            label: label.to_string(),
            period,
            cancelled: Arc::clone(&cancelled),
            tick,
        });
        TaskHandle::detached(cancelled)
    }
}
