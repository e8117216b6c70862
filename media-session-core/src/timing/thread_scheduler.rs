use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::traits::scheduler::{Scheduler, TaskHandle, Tick, TickFn};

/// Default scheduler: one named thread per repeating task, stopped via
/// a shared atomic flag checked before every tick.
///
/// Sleep-then-tick ordering means a cancelled task never fires again
/// after `cancel()` returns, since cancel joins the thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn schedule_repeating(&self, label: &str, period: Duration, mut tick: TickFn) -> TaskHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let name = label.to_string();

        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                while !flag.load(Ordering::SeqCst) {
                    thread::sleep(period);
                    if flag.load(Ordering::SeqCst) {
                        break;
                    }
                    if tick() == Tick::Stop {
                        log::debug!("repeating task '{}' self-terminated", name);
                        break;
                    }
                }
            })
            .expect("failed to spawn scheduler thread");

        TaskHandle::threaded(cancelled, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn ticks_until_cancelled() {
        let scheduler = ThreadScheduler;
        let count = Arc::new(Mutex::new(0u32));
        let counter = Arc::clone(&count);

        let mut handle = scheduler.schedule_repeating(
            "test-tick",
            Duration::from_millis(5),
            Box::new(move || {
                *counter.lock() += 1;
                Tick::Continue
            }),
        );

        thread::sleep(Duration::from_millis(60));
        handle.cancel();
        let after_cancel = *count.lock();
        assert!(after_cancel > 0);

        // cancel joined the thread, no further ticks can land
        thread::sleep(Duration::from_millis(30));
        assert_eq!(*count.lock(), after_cancel);
    }

    #[test]
    fn stop_self_terminates() {
        let scheduler = ThreadScheduler;
        let count = Arc::new(Mutex::new(0u32));
        let counter = Arc::clone(&count);

        let _handle = scheduler.schedule_repeating(
            "test-stop",
            Duration::from_millis(5),
            Box::new(move || {
                *counter.lock() += 1;
                Tick::Stop
            }),
        );

        thread::sleep(Duration::from_millis(60));
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn cancel_is_idempotent() {
        let scheduler = ThreadScheduler;
        let mut handle = scheduler.schedule_repeating(
            "test-idempotent",
            Duration::from_millis(5),
            Box::new(|| Tick::Continue),
        );
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
    }
}
