pub mod thread_scheduler;
