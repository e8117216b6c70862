use std::time::{Duration, Instant};

use uuid::Uuid;

/// Recording lifecycle state machine.
///
/// State transitions:
/// ```text
/// idle → recording → stopped → recording → ...
/// ```
/// A new recording discards the previous stopped session's artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Recording {
        started_at: Instant,
        /// Unique session id for log correlation.
        session_id: Uuid,
    },
    Stopped {
        duration: Duration,
    },
}

impl RecordingState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording { .. })
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped { .. })
    }

    /// Elapsed time while recording, or the final duration once stopped.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            Self::Idle => None,
            Self::Recording { started_at, .. } => Some(started_at.elapsed()),
            Self::Stopped { duration } => Some(*duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        let idle = RecordingState::Idle;
        assert!(idle.is_idle());
        assert!(!idle.is_recording());
        assert_eq!(idle.elapsed(), None);

        let recording = RecordingState::Recording {
            started_at: Instant::now(),
            session_id: Uuid::new_v4(),
        };
        assert!(recording.is_recording());
        assert!(recording.elapsed().is_some());

        let stopped = RecordingState::Stopped {
            duration: Duration::from_secs(3),
        };
        assert!(stopped.is_stopped());
        assert_eq!(stopped.elapsed(), Some(Duration::from_secs(3)));
    }
}
