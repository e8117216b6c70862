use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use media_session_core::{ChunkCallback, MediaTrack, RecorderBackend, SessionError};

#[derive(Default)]
struct RecorderInner {
    supported: Vec<String>,
    recording: bool,
    callback: Option<ChunkCallback>,
    last_mime_hint: Option<String>,
    last_timeslice: Option<Duration>,
    start_count: usize,
}

/// Simulated media recorder.
///
/// Supported formats are scripted at construction; fragments are
/// delivered only when the test calls `emit_chunk`, so a recording
/// with zero emissions exercises the no-data path deterministically.
#[derive(Clone, Default)]
pub struct SimRecorder {
    inner: Arc<Mutex<RecorderInner>>,
}

impl SimRecorder {
    /// Recorder supporting every probed format.
    pub fn new() -> Self {
        Self::supporting(&["audio/webm;codecs=opus", "audio/webm", "audio/mp4"])
    }

    pub fn supporting(mimes: &[&str]) -> Self {
        let recorder = Self::default();
        recorder.inner.lock().supported = mimes.iter().map(|m| m.to_string()).collect();
        recorder
    }

    /// Deliver one scripted fragment through the active callback.
    /// Ignored when not recording, as a real recorder would.
    pub fn emit_chunk(&self, data: &[u8]) {
        let callback = {
            let inner = self.inner.lock();
            if !inner.recording {
                return;
            }
            inner.callback.clone()
        };
        if let Some(callback) = callback {
            callback(data);
        }
    }

    /// The mime hint the recorder was last started with, `None` when
    /// the platform was left to pick.
    pub fn last_mime_hint(&self) -> Option<String> {
        self.inner.lock().last_mime_hint.clone()
    }

    pub fn last_timeslice(&self) -> Option<Duration> {
        self.inner.lock().last_timeslice
    }

    pub fn start_count(&self) -> usize {
        self.inner.lock().start_count
    }
}

impl RecorderBackend for SimRecorder {
    fn supports_mime(&self, mime: &str) -> bool {
        self.inner.lock().supported.iter().any(|m| m == mime)
    }

    fn start(
        &mut self,
        track: &dyn MediaTrack,
        mime: Option<&str>,
        timeslice: Duration,
        on_data: ChunkCallback,
    ) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        if inner.recording {
            return Err(SessionError::Backend("recorder already started".into()));
        }
        if !track.is_live() {
            return Err(SessionError::Backend("track is not live".into()));
        }
        log::debug!(
            "sim recorder started on {} (mime: {:?})",
            track.device_id(),
            mime
        );
        inner.recording = true;
        inner.callback = Some(on_data);
        inner.last_mime_hint = mime.map(str::to_string);
        inner.last_timeslice = Some(timeslice);
        inner.start_count += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        inner.recording = false;
        inner.callback = None;
        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.inner.lock().recording
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_outside_recording_is_ignored() {
        let recorder = SimRecorder::new();
        // No start: nothing to deliver to, and nothing panics.
        recorder.emit_chunk(&[1, 2, 3]);
        assert!(!recorder.is_recording());
        assert_eq!(recorder.start_count(), 0);
    }

    #[test]
    fn supported_set_is_scripted() {
        let recorder = SimRecorder::supporting(&["audio/mp4"]);
        assert!(recorder.supports_mime("audio/mp4"));
        assert!(!recorder.supports_mime("audio/webm"));
    }
}
