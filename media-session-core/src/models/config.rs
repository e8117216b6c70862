use std::time::Duration;

/// Constraints and cadences for a media session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConstraints {
    /// Ideal video width in pixels (default: 1280).
    pub ideal_width: u32,

    /// Ideal video height in pixels (default: 720).
    pub ideal_height: u32,

    /// Request echo cancellation on the audio track (default: true).
    pub echo_cancellation: bool,

    /// Request noise suppression on the audio track (default: true).
    pub noise_suppression: bool,

    /// Requested audio sample rate in Hz (default: 44100).
    pub sample_rate: u32,

    /// How often the recorder delivers buffered fragments (default: 100ms).
    pub chunk_interval: Duration,

    /// Level-meter sampling period, one display frame (default: 16ms).
    pub meter_interval: Duration,

    /// Elapsed-time reporting period while recording (default: 1s).
    pub timer_interval: Duration,
}

impl SessionConstraints {
    pub fn validate(&self) -> Result<(), String> {
        if self.ideal_width == 0 || self.ideal_height == 0 {
            return Err(format!(
                "video resolution must be non-zero: {}x{}",
                self.ideal_width, self.ideal_height
            ));
        }
        if self.sample_rate == 0 {
            return Err("sample rate must be positive".into());
        }
        if self.chunk_interval.is_zero()
            || self.meter_interval.is_zero()
            || self.timer_interval.is_zero()
        {
            return Err("task intervals must be positive".into());
        }
        Ok(())
    }
}

impl Default for SessionConstraints {
    fn default() -> Self {
        Self {
            ideal_width: 1280,
            ideal_height: 720,
            echo_cancellation: true,
            noise_suppression: true,
            sample_rate: 44100,
            chunk_interval: Duration::from_millis(100),
            meter_interval: Duration::from_millis(16),
            timer_interval: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SessionConstraints::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_resolution() {
        let constraints = SessionConstraints {
            ideal_width: 0,
            ..Default::default()
        };
        assert!(constraints.validate().is_err());
    }

    #[test]
    fn rejects_zero_intervals() {
        let constraints = SessionConstraints {
            meter_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(constraints.validate().is_err());
    }
}
