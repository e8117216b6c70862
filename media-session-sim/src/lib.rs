//! # media-session-sim
//!
//! Deterministic simulated backends for `media-session-core`.
//!
//! Implements every core trait seam without hardware or real time:
//! - `SimCaptureBackend` — scripted device topology, permission policy,
//!   unplugging, synthetic audio energy, live-track accounting
//! - `SimRecorder` — scripted format support and chunk delivery
//! - `ManualScheduler` — periodic tasks driven tick by tick
//! - `MemorySink` — captures downloads for assertions
//! - `CollectingDelegate` — records every session event
//!
//! The integration suites under `tests/` drive the full
//! `MediaSessionManager` through these fakes.

pub mod backend;
pub mod delegate;
pub mod recorder;
pub mod scheduler;
pub mod sink;

pub use backend::SimCaptureBackend;
pub use delegate::{CollectingDelegate, SessionEvent};
pub use recorder::SimRecorder;
pub use scheduler::ManualScheduler;
pub use sink::{MemorySink, SavedFile};
