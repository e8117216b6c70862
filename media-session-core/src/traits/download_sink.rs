use crate::models::error::SessionError;

/// One-shot client-side save target for a recorded clip.
///
/// The core hands over borrowed bytes and retains no temporary handle
/// after the call returns; whatever reference the sink creates for the
/// save is the sink's to release.
pub trait DownloadSink {
    fn save(&mut self, filename: &str, mime: &str, bytes: &[u8]) -> Result<(), SessionError>;
}
