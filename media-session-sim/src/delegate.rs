use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use media_session_core::{
    DeviceDescriptor, Notice, RecordingState, SessionDelegate, SessionError,
};

/// Every observable session event, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    DeviceList { cameras: usize, microphones: usize },
    Level(f32),
    State(RecordingState),
    Elapsed(Duration),
    Error(SessionError),
    Notice(Notice),
}

/// Delegate that records everything it is told, for assertions.
#[derive(Clone, Default)]
pub struct CollectingDelegate {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl CollectingDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().clone()
    }

    pub fn levels(&self) -> Vec<f32> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SessionEvent::Level(percent) => Some(percent),
                _ => None,
            })
            .collect()
    }

    pub fn states(&self) -> Vec<RecordingState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SessionEvent::State(state) => Some(state),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<SessionError> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SessionEvent::Error(error) => Some(error),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SessionEvent::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    pub fn elapsed_reports(&self) -> Vec<Duration> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SessionEvent::Elapsed(elapsed) => Some(elapsed),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl SessionDelegate for CollectingDelegate {
    fn on_device_list_changed(
        &self,
        cameras: &[DeviceDescriptor],
        microphones: &[DeviceDescriptor],
    ) {
        self.events.lock().push(SessionEvent::DeviceList {
            cameras: cameras.len(),
            microphones: microphones.len(),
        });
    }

    fn on_level_changed(&self, percent: f32) {
        self.events.lock().push(SessionEvent::Level(percent));
    }

    fn on_recording_state_changed(&self, state: &RecordingState) {
        self.events.lock().push(SessionEvent::State(*state));
    }

    fn on_elapsed_time_changed(&self, elapsed: Duration) {
        self.events.lock().push(SessionEvent::Elapsed(elapsed));
    }

    fn on_error(&self, error: &SessionError) {
        self.events.lock().push(SessionEvent::Error(error.clone()));
    }

    fn on_notice(&self, notice: &Notice) {
        self.events.lock().push(SessionEvent::Notice(notice.clone()));
    }
}
