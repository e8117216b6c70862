use std::time::Duration;

use crate::models::device::DeviceDescriptor;
use crate::models::error::SessionError;
use crate::models::state::RecordingState;

/// Severity of a transient status notice.
///
/// The presentation layer auto-dismisses success and warning notices
/// after a few seconds; errors (delivered via `on_error`) persist until
/// dismissed or superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Success,
    Warning,
}

/// A user-facing status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Warning,
            message: message.into(),
        }
    }
}

/// Event sink for session status, rendered by the presentation layer.
///
/// Level and elapsed-time callbacks fire on scheduler threads, not the
/// caller's thread. Implementations marshal to the UI thread if needed.
pub trait SessionDelegate: Send + Sync {
    /// Called after every device enumeration with the fresh snapshot.
    fn on_device_list_changed(&self, cameras: &[DeviceDescriptor], microphones: &[DeviceDescriptor]);

    /// Called on every meter tick with a loudness percentage in [0, 100].
    fn on_level_changed(&self, percent: f32);

    /// Called when the recording state machine transitions.
    fn on_recording_state_changed(&self, state: &RecordingState);

    /// Called periodically while recording with the elapsed time.
    fn on_elapsed_time_changed(&self, elapsed: Duration);

    /// Called when an operation fails with a non-benign error.
    fn on_error(&self, error: &SessionError);

    /// Called with transient success/warning status messages.
    fn on_notice(&self, notice: &Notice);
}
