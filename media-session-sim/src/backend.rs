use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use media_session_core::{
    AudioAnalyser, CaptureBackend, DeviceDescriptor, DeviceKind, GrantedStream, MediaTrack,
    SessionConstraints, SessionError,
};

/// One scripted device in the simulated topology.
#[derive(Debug, Clone)]
struct SimDevice {
    id: String,
    kind: DeviceKind,
    label: String,
    unplugged: bool,
}

#[derive(Default)]
struct BackendInner {
    devices: Vec<SimDevice>,
    deny_access: bool,
    fail_analyser: bool,
    granted: bool,
    /// Liveness flag of every track ever opened, in open order.
    opened: Vec<(DeviceKind, Arc<AtomicBool>)>,
}

/// Simulated capture device API.
///
/// Cloneable handle over shared state, so tests keep a copy after
/// moving one into the manager: script the topology up front, then
/// unplug devices, flip permissions, or drive the synthetic energy
/// level mid-test. Tracks report liveness through shared flags, which
/// lets tests assert the one-live-track-per-kind invariant directly.
#[derive(Clone, Default)]
pub struct SimCaptureBackend {
    inner: Arc<Mutex<BackendInner>>,
    energy: Arc<AtomicU8>,
}

impl SimCaptureBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_camera(&self, id: &str, label: &str) -> &Self {
        self.add_device(id, DeviceKind::Camera, label);
        self
    }

    pub fn add_microphone(&self, id: &str, label: &str) -> &Self {
        self.add_device(id, DeviceKind::Microphone, label);
        self
    }

    fn add_device(&self, id: &str, kind: DeviceKind, label: &str) {
        self.inner.lock().devices.push(SimDevice {
            id: id.to_string(),
            kind,
            label: label.to_string(),
            unplugged: false,
        });
    }

    /// Make the next (and every further) access request fail with
    /// `PermissionDenied` until cleared.
    pub fn deny_access(&self, deny: bool) {
        self.inner.lock().deny_access = deny;
    }

    /// Make analyser creation fail, leaving the meter inactive.
    pub fn fail_analyser(&self, fail: bool) {
        self.inner.lock().fail_analyser = fail;
    }

    /// Remove a device from the visible topology; opening it afterwards
    /// fails with `DeviceUnavailable` (unplugged mid-call).
    pub fn unplug(&self, id: &str) {
        let mut inner = self.inner.lock();
        if let Some(device) = inner.devices.iter_mut().find(|d| d.id == id) {
            device.unplugged = true;
        }
    }

    /// Synthetic frequency-domain energy fed to every analyser bin.
    pub fn set_energy(&self, energy: u8) {
        self.energy.store(energy, Ordering::SeqCst);
    }

    /// Number of tracks of the given kind that are currently live.
    pub fn live_tracks(&self, kind: DeviceKind) -> usize {
        self.inner
            .lock()
            .opened
            .iter()
            .filter(|(k, live)| *k == kind && live.load(Ordering::SeqCst))
            .count()
    }

    fn open_track(
        inner: &mut BackendInner,
        device_id: &str,
        kind: DeviceKind,
    ) -> Result<Box<dyn MediaTrack>, SessionError> {
        let available = inner
            .devices
            .iter()
            .any(|d| d.id == device_id && d.kind == kind && !d.unplugged);
        if !available {
            return Err(SessionError::DeviceUnavailable);
        }

        let live = Arc::new(AtomicBool::new(true));
        inner.opened.push((kind, Arc::clone(&live)));
        Ok(Box::new(SimTrack {
            device_id: device_id.to_string(),
            kind,
            live,
        }))
    }

    fn first_available(inner: &BackendInner, kind: DeviceKind) -> Option<String> {
        inner
            .devices
            .iter()
            .find(|d| d.kind == kind && !d.unplugged)
            .map(|d| d.id.clone())
    }
}

impl CaptureBackend for SimCaptureBackend {
    fn request_access(
        &mut self,
        _constraints: &SessionConstraints,
    ) -> Result<GrantedStream, SessionError> {
        let mut inner = self.inner.lock();
        if inner.deny_access {
            return Err(SessionError::PermissionDenied);
        }

        let camera = Self::first_available(&inner, DeviceKind::Camera);
        let microphone = Self::first_available(&inner, DeviceKind::Microphone);
        if camera.is_none() && microphone.is_none() {
            return Err(SessionError::DeviceUnavailable);
        }

        inner.granted = true;
        let video = camera
            .map(|id| Self::open_track(&mut inner, &id, DeviceKind::Camera))
            .transpose()?;
        let audio = microphone
            .map(|id| Self::open_track(&mut inner, &id, DeviceKind::Microphone))
            .transpose()?;
        Ok(GrantedStream { video, audio })
    }

    fn enumerate_devices(&self) -> Result<Vec<DeviceDescriptor>, SessionError> {
        let inner = self.inner.lock();
        let mut seen_camera = false;
        let mut seen_microphone = false;
        let descriptors = inner
            .devices
            .iter()
            .filter(|d| !d.unplugged)
            .map(|d| {
                let is_default = match d.kind {
                    DeviceKind::Camera => !std::mem::replace(&mut seen_camera, true),
                    DeviceKind::Microphone => !std::mem::replace(&mut seen_microphone, true),
                };
                DeviceDescriptor {
                    id: d.id.clone(),
                    kind: d.kind,
                    // Labels are withheld until access is granted.
                    label: if inner.granted {
                        d.label.clone()
                    } else {
                        String::new()
                    },
                    is_default,
                }
            })
            .collect();
        Ok(descriptors)
    }

    fn open_video_track(
        &mut self,
        device_id: &str,
        _constraints: &SessionConstraints,
    ) -> Result<Box<dyn MediaTrack>, SessionError> {
        Self::open_track(&mut self.inner.lock(), device_id, DeviceKind::Camera)
    }

    fn open_audio_track(
        &mut self,
        device_id: &str,
        _constraints: &SessionConstraints,
    ) -> Result<Box<dyn MediaTrack>, SessionError> {
        Self::open_track(&mut self.inner.lock(), device_id, DeviceKind::Microphone)
    }

    fn create_analyser(
        &mut self,
        track: &dyn MediaTrack,
    ) -> Result<Box<dyn AudioAnalyser>, SessionError> {
        let inner = self.inner.lock();
        if inner.fail_analyser {
            return Err(SessionError::Backend("analyser creation failed".into()));
        }
        if track.kind() != DeviceKind::Microphone {
            return Err(SessionError::Backend(
                "analyser requires an audio track".into(),
            ));
        }
        Ok(Box::new(SimAnalyser {
            energy: Arc::clone(&self.energy),
            closed: false,
        }))
    }
}

struct SimTrack {
    device_id: String,
    kind: DeviceKind,
    live: Arc<AtomicBool>,
}

impl MediaTrack for SimTrack {
    fn device_id(&self) -> &str {
        &self.device_id
    }

    fn kind(&self) -> DeviceKind {
        self.kind
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    fn stop(&mut self) {
        self.live.store(false, Ordering::SeqCst);
    }
}

/// Analyser whose 128 bins all read the backend's scripted energy.
struct SimAnalyser {
    energy: Arc<AtomicU8>,
    closed: bool,
}

impl AudioAnalyser for SimAnalyser {
    fn bin_count(&self) -> usize {
        128
    }

    fn read_frequency_data(&mut self, out: &mut [u8]) {
        let value = if self.closed {
            0
        } else {
            self.energy.load(Ordering::SeqCst)
        };
        out.fill(value);
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
