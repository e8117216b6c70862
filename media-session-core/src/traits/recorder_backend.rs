use std::sync::Arc;
use std::time::Duration;

use crate::models::error::SessionError;
use crate::traits::capture_backend::MediaTrack;

/// Callback invoked when the recorder has a buffered data fragment.
///
/// Fires on the recorder's delivery thread; keep processing minimal.
pub type ChunkCallback = Arc<dyn Fn(&[u8]) + Send + Sync + 'static>;

/// Interface to the platform's media recorder.
///
/// The core drives this state machine but does not implement encoding;
/// the negotiated mime is a hint the recorder may refine.
pub trait RecorderBackend: Send {
    /// Whether the recorder can encode into the given container/codec.
    fn supports_mime(&self, mime: &str) -> bool;

    /// Start recording the given audio track, delivering buffered
    /// fragments every `timeslice` of media time via `on_data`.
    /// `mime` of `None` lets the platform pick its default format.
    fn start(
        &mut self,
        track: &dyn MediaTrack,
        mime: Option<&str>,
        timeslice: Duration,
        on_data: ChunkCallback,
    ) -> Result<(), SessionError>;

    /// Stop recording, flushing any pending fragment through the
    /// callback before returning.
    fn stop(&mut self) -> Result<(), SessionError>;

    fn is_recording(&self) -> bool;
}
