use std::sync::Arc;

use parking_lot::Mutex;

use media_session_core::{DownloadSink, SessionError};

/// One captured save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Download sink that captures saves in memory for assertions.
#[derive(Clone, Default)]
pub struct MemorySink {
    saves: Arc<Mutex<Vec<SavedFile>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saves(&self) -> Vec<SavedFile> {
        self.saves.lock().clone()
    }
}

impl DownloadSink for MemorySink {
    fn save(&mut self, filename: &str, mime: &str, bytes: &[u8]) -> Result<(), SessionError> {
        self.saves.lock().push(SavedFile {
            filename: filename.to_string(),
            mime: mime.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}
