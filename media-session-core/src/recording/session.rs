use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use uuid::Uuid;

use super::clip::RecordedClip;
use super::mime::MimeType;
use crate::models::error::SessionError;
use crate::traits::recorder_backend::ChunkCallback;

/// An in-flight recording: negotiated format plus the fragment buffer
/// the recorder callback appends into.
///
/// Fragments arrive on the recorder's delivery thread while the session
/// lives on the manager's thread, so the buffer sits behind
/// `Arc<parking_lot::Mutex<_>>`. Sealing consumes the session.
pub struct RecordingSession {
    id: Uuid,
    mime: MimeType,
    chunks: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl RecordingSession {
    pub fn new(mime: MimeType) -> Self {
        Self {
            id: Uuid::new_v4(),
            mime,
            chunks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mime(&self) -> MimeType {
        self.mime
    }

    /// Callback handed to the recorder backend. Empty fragments are
    /// dropped, everything else is buffered in arrival order.
    pub fn chunk_sink(&self) -> ChunkCallback {
        let chunks = Arc::clone(&self.chunks);
        Arc::new(move |data: &[u8]| {
            if !data.is_empty() {
                chunks.lock().push(data.to_vec());
            }
        })
    }

    pub fn fragment_count(&self) -> usize {
        self.chunks.lock().len()
    }

    /// Freeze the fragment sequence and assemble the result.
    ///
    /// Zero collected fragments is not a crash, it reports
    /// `NoDataRecorded` and leaves no artifact behind.
    pub fn seal(self, duration: Duration) -> Result<RecordedClip, SessionError> {
        let fragments = std::mem::take(&mut *self.chunks.lock());
        if fragments.is_empty() {
            return Err(SessionError::NoDataRecorded);
        }

        let total: usize = fragments.iter().map(Vec::len).sum();
        let mut bytes = Vec::with_capacity(total);
        for fragment in fragments {
            bytes.extend_from_slice(&fragment);
        }

        Ok(RecordedClip::new(self.id, bytes, self.mime, duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_concatenate_in_arrival_order() {
        let session = RecordingSession::new(MimeType::WebmOpus);
        let sink = session.chunk_sink();

        sink(&[1, 2]);
        sink(&[3]);
        sink(&[4, 5, 6]);
        assert_eq!(session.fragment_count(), 3);

        let clip = session.seal(Duration::from_millis(300)).unwrap();
        assert_eq!(clip.bytes, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(clip.mime, MimeType::WebmOpus);
        assert_eq!(clip.duration, Duration::from_millis(300));
    }

    #[test]
    fn empty_fragments_are_dropped() {
        let session = RecordingSession::new(MimeType::Webm);
        let sink = session.chunk_sink();

        sink(&[]);
        sink(&[7]);
        sink(&[]);

        assert_eq!(session.fragment_count(), 1);
        let clip = session.seal(Duration::from_secs(1)).unwrap();
        assert_eq!(clip.bytes, vec![7]);
    }

    #[test]
    fn zero_fragments_seal_to_no_data() {
        let session = RecordingSession::new(MimeType::Webm);
        let _sink = session.chunk_sink();

        let err = session.seal(Duration::ZERO).unwrap_err();
        assert_eq!(err, SessionError::NoDataRecorded);
    }
}
