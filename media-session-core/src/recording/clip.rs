use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::mime::MimeType;
use crate::models::error::SessionError;

/// A finished recording, held in memory until the next recording
/// starts or the session is torn down.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedClip {
    pub bytes: Vec<u8>,
    pub mime: MimeType,
    pub created_at: DateTime<Utc>,
    pub duration: Duration,
    pub metadata: ClipMetadata,
}

/// Metadata describing a recorded clip.
///
/// Serializable for handoff to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipMetadata {
    pub id: String,
    pub mime: String,
    pub byte_len: usize,
    pub duration_secs: f64,
    pub created_at: DateTime<Utc>,
}

impl RecordedClip {
    pub fn new(session_id: Uuid, bytes: Vec<u8>, mime: MimeType, duration: Duration) -> Self {
        let created_at = Utc::now();
        let metadata = ClipMetadata {
            id: session_id.to_string(),
            mime: mime.container_label().to_string(),
            byte_len: bytes.len(),
            duration_secs: duration.as_secs_f64(),
            created_at,
        };
        Self {
            bytes,
            mime,
            created_at,
            duration,
            metadata,
        }
    }
}

impl ClipMetadata {
    pub fn to_json(&self) -> Result<String, SessionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SessionError::Backend(format!("failed to serialize clip metadata: {}", e)))
    }
}

/// Build a download filename embedding a collision-resistant UTC
/// timestamp: `recording_YYYY-MM-DDTHH-MM-SS.<ext>`. Colons and dots
/// are replaced so the name is filesystem-safe everywhere.
pub fn download_filename(at: DateTime<Utc>, mime: MimeType) -> String {
    format!(
        "recording_{}.{}",
        at.format("%Y-%m-%dT%H-%M-%S"),
        mime.extension()
    )
}
