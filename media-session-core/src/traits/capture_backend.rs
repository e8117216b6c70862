use crate::models::config::SessionConstraints;
use crate::models::device::{DeviceDescriptor, DeviceKind};
use crate::models::error::SessionError;

/// A live feed of audio or video samples from one device.
///
/// Tracks are owned exclusively by the session manager; nothing else
/// may hold a reference that outlives a switch. Stopping releases the
/// underlying hardware lock.
pub trait MediaTrack: Send {
    /// Id of the device backing this track.
    fn device_id(&self) -> &str;

    fn kind(&self) -> DeviceKind;

    /// Whether the track is still producing samples.
    fn is_live(&self) -> bool;

    /// Stop the track and release the device. Idempotent.
    fn stop(&mut self);
}

/// Frequency-domain analysis handle bound to one audio track.
///
/// Bins are byte magnitudes (0–255), 128 bins for the conventional
/// fftSize of 256.
pub trait AudioAnalyser: Send {
    fn bin_count(&self) -> usize;

    /// Fill `out` with the current frequency-domain energy, one byte
    /// per bin. `out` is sized to `bin_count()` by the caller.
    fn read_frequency_data(&mut self, out: &mut [u8]);

    /// Release the underlying audio-processing context. Idempotent.
    fn close(&mut self);
}

/// Tracks handed back by a granted combined access request.
pub struct GrantedStream {
    pub video: Option<Box<dyn MediaTrack>>,
    pub audio: Option<Box<dyn MediaTrack>>,
}

/// Interface to the platform's capture device API.
///
/// The core is a consumer only: it drives acquisition and teardown but
/// implements no device discovery itself. Implemented by platform
/// backends and by the simulated backend used in tests.
pub trait CaptureBackend: Send {
    /// Request combined camera + microphone access with the declared
    /// constraints. Fails with `PermissionDenied` when the user or OS
    /// refuses, `DeviceUnavailable` when no matching hardware exists.
    fn request_access(
        &mut self,
        constraints: &SessionConstraints,
    ) -> Result<GrantedStream, SessionError>;

    /// List all camera and microphone descriptors currently visible.
    /// Labels may be empty before access is granted.
    fn enumerate_devices(&self) -> Result<Vec<DeviceDescriptor>, SessionError>;

    /// Acquire a video track constrained to one device.
    fn open_video_track(
        &mut self,
        device_id: &str,
        constraints: &SessionConstraints,
    ) -> Result<Box<dyn MediaTrack>, SessionError>;

    /// Acquire an audio track constrained to one device.
    fn open_audio_track(
        &mut self,
        device_id: &str,
        constraints: &SessionConstraints,
    ) -> Result<Box<dyn MediaTrack>, SessionError>;

    /// Create a frequency-domain analyser bound to an audio track.
    fn create_analyser(
        &mut self,
        track: &dyn MediaTrack,
    ) -> Result<Box<dyn AudioAnalyser>, SessionError>;
}
