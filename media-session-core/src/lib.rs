//! # media-session-core
//!
//! Platform-agnostic media session core.
//!
//! Owns the lifecycle of capture devices, the live stream, the audio
//! level meter, and the recording state machine. Platform glue (a
//! browser shell, a desktop capture stack, or the deterministic
//! simulated backend used in tests) implements the `CaptureBackend`
//! and `RecorderBackend` traits and plugs into the generic
//! `MediaSessionManager`.
//!
//! ## Architecture
//!
//! ```text
//! media-session-core (this crate)
//! ├── traits/      ← CaptureBackend, RecorderBackend, SessionDelegate,
//! │                  DownloadSink, Scheduler
//! ├── models/      ← SessionError, RecordingState, DeviceDescriptor,
//! │                  SessionConstraints, VisualEffect
//! ├── metering/    ← AudioMeter, level normalization
//! ├── recording/   ← MimeType negotiation, RecordingSession, RecordedClip
//! ├── timing/      ← ThreadScheduler (default periodic-task runner)
//! └── session/     ← MediaSessionManager (orchestrator)
//! ```

pub mod metering;
pub mod models;
pub mod recording;
pub mod session;
pub mod timing;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use metering::meter::{level_percent, AudioMeter};
pub use models::config::SessionConstraints;
pub use models::device::{DeviceDescriptor, DeviceKind};
pub use models::effect::VisualEffect;
pub use models::error::SessionError;
pub use models::state::RecordingState;
pub use recording::clip::{download_filename, ClipMetadata, RecordedClip};
pub use recording::mime::MimeType;
pub use recording::session::RecordingSession;
pub use session::manager::MediaSessionManager;
pub use timing::thread_scheduler::ThreadScheduler;
pub use traits::capture_backend::{AudioAnalyser, CaptureBackend, GrantedStream, MediaTrack};
pub use traits::download_sink::DownloadSink;
pub use traits::recorder_backend::{ChunkCallback, RecorderBackend};
pub use traits::scheduler::{Scheduler, TaskHandle, Tick, TickFn};
pub use traits::session_delegate::{Notice, NoticeSeverity, SessionDelegate};
