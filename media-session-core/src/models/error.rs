use thiserror::Error;

/// Errors that can occur during media session operations.
///
/// Every condition is user-recoverable: the manager returns to the
/// nearest stable state (idle capture, stopped recording) and reports
/// upward through the delegate. Nothing here terminates the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("device not available")]
    DeviceUnavailable,

    #[error("unknown device id: {0}")]
    InvalidDevice(String),

    #[error("no audio source selected")]
    NoAudioSource,

    #[error("recording already in progress")]
    AlreadyRecording,

    #[error("recorder produced no data")]
    NoDataRecorded,

    #[error("no finished recording to download")]
    NothingToDownload,

    #[error("invalid constraints: {0}")]
    InvalidConstraints(String),

    #[error("backend failure: {0}")]
    Backend(String),
}

impl SessionError {
    /// Warning-grade conditions that are reported as notices rather
    /// than through the error channel.
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            Self::AlreadyRecording | Self::NoDataRecorded | Self::NothingToDownload
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_classification() {
        assert!(SessionError::AlreadyRecording.is_benign());
        assert!(SessionError::NoDataRecorded.is_benign());
        assert!(SessionError::NothingToDownload.is_benign());
        assert!(!SessionError::PermissionDenied.is_benign());
        assert!(!SessionError::DeviceUnavailable.is_benign());
        assert!(!SessionError::InvalidDevice("x".into()).is_benign());
    }

    #[test]
    fn display_includes_device_id() {
        let err = SessionError::InvalidDevice("cam-7".into());
        assert_eq!(err.to_string(), "unknown device id: cam-7");
    }
}
