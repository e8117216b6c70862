pub mod capture_backend;
pub mod download_sink;
pub mod recorder_backend;
pub mod scheduler;
pub mod session_delegate;
