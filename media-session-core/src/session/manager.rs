use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use parking_lot::Mutex;

use crate::metering::meter::AudioMeter;
use crate::models::config::SessionConstraints;
use crate::models::device::{DeviceDescriptor, DeviceKind};
use crate::models::effect::VisualEffect;
use crate::models::error::SessionError;
use crate::models::state::RecordingState;
use crate::recording::clip::{download_filename, ClipMetadata, RecordedClip};
use crate::recording::mime::MimeType;
use crate::recording::session::RecordingSession;
use crate::traits::capture_backend::{CaptureBackend, MediaTrack};
use crate::traits::download_sink::DownloadSink;
use crate::traits::recorder_backend::RecorderBackend;
use crate::traits::scheduler::{Scheduler, TaskHandle, Tick};
use crate::traits::session_delegate::{Notice, SessionDelegate};

/// Owner of the device/stream/recording lifecycle.
///
/// Consumes device ids and user actions, drives the capture and
/// recorder backends, and reports status through the delegate. All
/// ordering invariants are enforced by sequencing on the caller's
/// thread: a track is always fully stopped before the replacement is
/// acquired, and acquisitions for the same media kind never overlap.
///
/// ```text
/// UI action → MediaSessionManager → CaptureBackend / RecorderBackend
///                    ↓
///             SessionDelegate events (device lists, levels,
///             recording state, elapsed time, notices, errors)
/// ```
pub struct MediaSessionManager {
    backend: Box<dyn CaptureBackend>,
    recorder: Box<dyn RecorderBackend>,
    scheduler: Arc<dyn Scheduler>,
    constraints: SessionConstraints,
    delegate: Option<Arc<dyn SessionDelegate>>,

    cameras: Vec<DeviceDescriptor>,
    microphones: Vec<DeviceDescriptor>,
    selected_camera: Option<String>,
    selected_microphone: Option<String>,

    // At most one live track per media kind.
    video_track: Option<Box<dyn MediaTrack>>,
    audio_track: Option<Box<dyn MediaTrack>>,

    // Shared with the sampling-loop task; emptying the slot makes the
    // loop self-terminate on its next tick.
    meter: Arc<Mutex<Option<AudioMeter>>>,
    meter_task: Option<TaskHandle>,
    monitor_requested: bool,

    recording: Option<RecordingSession>,
    recording_state: RecordingState,
    timer_task: Option<TaskHandle>,
    clip: Option<RecordedClip>,

    effect: VisualEffect,
}

impl MediaSessionManager {
    pub fn new(
        backend: Box<dyn CaptureBackend>,
        recorder: Box<dyn RecorderBackend>,
        scheduler: Arc<dyn Scheduler>,
        constraints: SessionConstraints,
    ) -> Result<Self, SessionError> {
        constraints
            .validate()
            .map_err(SessionError::InvalidConstraints)?;

        Ok(Self {
            backend,
            recorder,
            scheduler,
            constraints,
            delegate: None,
            cameras: Vec::new(),
            microphones: Vec::new(),
            selected_camera: None,
            selected_microphone: None,
            video_track: None,
            audio_track: None,
            meter: Arc::new(Mutex::new(None)),
            meter_task: None,
            monitor_requested: false,
            recording: None,
            recording_state: RecordingState::Idle,
            timer_task: None,
            clip: None,
            effect: VisualEffect::None,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    // --- Accessors ---

    pub fn cameras(&self) -> &[DeviceDescriptor] {
        &self.cameras
    }

    pub fn microphones(&self) -> &[DeviceDescriptor] {
        &self.microphones
    }

    pub fn selected_camera(&self) -> Option<&str> {
        self.selected_camera.as_deref()
    }

    pub fn selected_microphone(&self) -> Option<&str> {
        self.selected_microphone.as_deref()
    }

    pub fn video_active(&self) -> bool {
        self.video_track.as_ref().is_some_and(|t| t.is_live())
    }

    pub fn audio_active(&self) -> bool {
        self.audio_track.as_ref().is_some_and(|t| t.is_live())
    }

    pub fn recording_state(&self) -> RecordingState {
        self.recording_state
    }

    pub fn active_effect(&self) -> VisualEffect {
        self.effect
    }

    pub fn monitor_active(&self) -> bool {
        self.meter_task.is_some()
    }

    /// Metadata of the sealed clip, if one is retained.
    pub fn clip_metadata(&self) -> Option<&ClipMetadata> {
        self.clip.as_ref().map(|c| &c.metadata)
    }

    // --- Device and stream lifecycle ---

    /// Request combined camera + microphone access.
    ///
    /// On success the granted tracks become the capture session, the
    /// meter is rebuilt, and devices are re-enumerated (labels only
    /// become visible after a grant). On failure no partial session is
    /// retained and the manager stays usable for a retry.
    pub fn request_access(&mut self) -> Result<(), SessionError> {
        // Release anything held from a previous grant before asking
        // again, so two hardware locks never coexist.
        self.stop_video_track();
        self.teardown_meter();
        self.stop_audio_track();

        let granted = match self.backend.request_access(&self.constraints) {
            Ok(granted) => granted,
            Err(err) => {
                log::warn!("access request failed: {}", err);
                self.report(&err);
                return Err(err);
            }
        };

        if let Some(video) = granted.video {
            self.selected_camera = Some(video.device_id().to_string());
            self.video_track = Some(video);
        }
        if let Some(audio) = granted.audio {
            self.selected_microphone = Some(audio.device_id().to_string());
            self.audio_track = Some(audio);
            self.rebuild_meter();
        }

        log::info!(
            "access granted (video: {}, audio: {})",
            self.video_track.is_some(),
            self.audio_track.is_some()
        );
        self.notify(Notice::success("camera and microphone access granted"));
        self.refresh_devices()?;
        Ok(())
    }

    /// Re-enumerate capture devices and publish the fresh snapshot.
    ///
    /// The first entry of each list is the default selection policy;
    /// empty labels before a grant are expected platform behavior.
    pub fn refresh_devices(&mut self) -> Result<(), SessionError> {
        let all = match self.backend.enumerate_devices() {
            Ok(devices) => devices,
            Err(err) => {
                self.report(&err);
                return Err(err);
            }
        };

        let mut cameras = Vec::new();
        let mut microphones = Vec::new();
        for device in all {
            match device.kind {
                DeviceKind::Camera => cameras.push(device),
                DeviceKind::Microphone => microphones.push(device),
            }
        }

        if self.selected_camera.is_none() {
            self.selected_camera = cameras.first().map(|d| d.id.clone());
        }
        if self.selected_microphone.is_none() {
            self.selected_microphone = microphones.first().map(|d| d.id.clone());
        }

        log::info!(
            "device list refreshed: {} cameras, {} microphones",
            cameras.len(),
            microphones.len()
        );
        self.cameras = cameras;
        self.microphones = microphones;

        if let Some(ref delegate) = self.delegate {
            delegate.on_device_list_changed(&self.cameras, &self.microphones);
        }
        Ok(())
    }

    /// Switch the video track to another camera.
    ///
    /// The current track is stopped before the new acquisition is
    /// issued; on failure the preview is inactive (the old lock is
    /// already released) and the audio track is untouched either way.
    pub fn select_camera(&mut self, device_id: &str) -> Result<(), SessionError> {
        if !self.cameras.iter().any(|d| d.id == device_id) {
            let err = SessionError::InvalidDevice(device_id.to_string());
            self.report(&err);
            return Err(err);
        }

        self.stop_video_track();

        match self.backend.open_video_track(device_id, &self.constraints) {
            Ok(track) => {
                log::info!("camera switched to {}", device_id);
                self.selected_camera = Some(device_id.to_string());
                self.video_track = Some(track);
                Ok(())
            }
            Err(err) => {
                self.selected_camera = None;
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Switch the audio track to another microphone.
    ///
    /// Symmetric to `select_camera`, and additionally tears down and
    /// rebuilds the audio meter bound to the new track. An analyser
    /// failure leaves the meter inactive (level reporting silently
    /// stops) rather than reusing stale analysis state.
    pub fn select_microphone(&mut self, device_id: &str) -> Result<(), SessionError> {
        if !self.microphones.iter().any(|d| d.id == device_id) {
            let err = SessionError::InvalidDevice(device_id.to_string());
            self.report(&err);
            return Err(err);
        }

        self.teardown_meter();
        self.stop_audio_track();

        match self.backend.open_audio_track(device_id, &self.constraints) {
            Ok(track) => {
                log::info!("microphone switched to {}", device_id);
                self.selected_microphone = Some(device_id.to_string());
                self.audio_track = Some(track);
                self.rebuild_meter();
                Ok(())
            }
            Err(err) => {
                self.selected_microphone = None;
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Stop the video track without changing the camera selection.
    pub fn disable_camera(&mut self) {
        self.stop_video_track();
    }

    // --- Audio level monitoring ---

    /// Begin the repeating sampling loop that reports loudness through
    /// `on_level_changed`. A no-op when no meter exists or a loop is
    /// already active; at most one loop runs per meter.
    pub fn start_audio_level_monitor(&mut self) {
        self.monitor_requested = true;
        if self.meter_task.is_some() {
            log::debug!("sampling loop already active");
            return;
        }
        if self.meter.lock().is_none() {
            log::debug!("no audio meter, sampling loop not started");
            return;
        }
        self.spawn_sampling_loop();
    }

    /// Cancel the sampling loop. Restarting later is allowed.
    pub fn stop_audio_level_monitor(&mut self) {
        self.monitor_requested = false;
        if let Some(mut task) = self.meter_task.take() {
            task.cancel();
        }
    }

    // --- Recording state machine ---

    /// Start recording the current audio track.
    ///
    /// Video is excluded from the artifact by design, this is an
    /// audio-only recorder despite the video preview. A fresh session
    /// discards the previous clip.
    pub fn start_recording(&mut self) -> Result<(), SessionError> {
        if self.recording_state.is_recording() {
            let err = SessionError::AlreadyRecording;
            self.report(&err);
            return Err(err);
        }
        let Some(track) = self.audio_track.as_deref() else {
            let err = SessionError::NoAudioSource;
            self.report(&err);
            return Err(err);
        };

        self.clip = None;

        let mime = MimeType::negotiate(&*self.recorder);
        let session = RecordingSession::new(mime);
        let sink = session.chunk_sink();

        let started = self.recorder.start(
            track,
            mime.recorder_hint(),
            self.constraints.chunk_interval,
            sink,
        );
        if let Err(err) = started {
            self.report(&err);
            return Err(err);
        }

        let started_at = Instant::now();
        let session_id = session.id();
        self.recording = Some(session);
        self.recording_state = RecordingState::Recording {
            started_at,
            session_id,
        };
        self.emit_state();
        self.spawn_elapsed_timer(started_at);

        log::info!(
            "recording {} started ({})",
            session_id,
            mime.container_label()
        );
        self.notify(Notice::success("recording started"));
        Ok(())
    }

    /// Stop the current recording and seal the artifact.
    ///
    /// Calling outside the Recording state is a benign no-op, callers
    /// are allowed to stop idempotently.
    pub fn stop_recording(&mut self) -> Result<(), SessionError> {
        let RecordingState::Recording {
            started_at,
            session_id,
        } = self.recording_state
        else {
            log::debug!("stop_recording outside Recording state, ignoring");
            return Ok(());
        };

        // Stop the recorder first so any pending fragment is flushed
        // into the session before sealing.
        if let Err(err) = self.recorder.stop() {
            log::warn!("recorder stop reported: {}", err);
        }
        if let Some(mut task) = self.timer_task.take() {
            task.cancel();
        }

        let duration = started_at.elapsed();
        self.recording_state = RecordingState::Stopped { duration };
        let sealed = self.recording.take().map(|session| session.seal(duration));
        self.emit_state();

        match sealed {
            Some(Ok(clip)) => {
                log::info!(
                    "recording {} sealed: {} bytes ({})",
                    session_id,
                    clip.bytes.len(),
                    clip.mime.container_label()
                );
                self.clip = Some(clip);
                self.notify(Notice::success("recording stopped"));
            }
            Some(Err(err)) => {
                log::warn!("recording {} produced no data", session_id);
                self.report(&err);
            }
            None => {}
        }
        Ok(())
    }

    /// Offer the sealed clip for a one-shot client-side save.
    ///
    /// The filename embeds a UTC timestamp with filesystem-safe
    /// separators and the negotiated format's extension. Nothing is
    /// retained past the save trigger.
    pub fn download_result(&mut self, sink: &mut dyn DownloadSink) -> Result<String, SessionError> {
        let Some(clip) = self.clip.as_ref() else {
            let err = SessionError::NothingToDownload;
            self.report(&err);
            return Err(err);
        };

        let filename = download_filename(Utc::now(), clip.mime);
        if let Err(err) = sink.save(&filename, clip.mime.container_label(), &clip.bytes) {
            self.report(&err);
            return Err(err);
        }

        log::info!("download triggered: {}", filename);
        self.notify(Notice::success("download started"));
        Ok(filename)
    }

    // --- Presentation ---

    /// Set the single active visual effect. Unknown names map to
    /// `None`; there is no error case.
    pub fn apply_visual_effect(&mut self, name: &str) -> VisualEffect {
        let effect = VisualEffect::from_name(name);
        if effect != self.effect {
            log::debug!("visual effect {} -> {}", self.effect.name(), effect.name());
        }
        self.effect = effect;
        effect
    }

    // --- Teardown ---

    /// Release every owned resource: tracks, meter, periodic tasks,
    /// recorder, retained clip. Safe to call repeatedly; the embedding
    /// shell calls it on exit and whenever the UI is backgrounded so
    /// hardware is released promptly.
    pub fn teardown(&mut self) {
        if self.recording_state.is_recording() {
            if let Err(err) = self.recorder.stop() {
                log::warn!("recorder stop during teardown: {}", err);
            }
        }
        if let Some(mut task) = self.timer_task.take() {
            task.cancel();
        }
        self.monitor_requested = false;
        self.teardown_meter();
        self.stop_audio_track();
        self.stop_video_track();
        self.recording = None;
        self.recording_state = RecordingState::Idle;
        self.clip = None;
        log::info!("media session torn down");
    }

    // --- Internal helpers ---

    fn stop_video_track(&mut self) {
        if let Some(mut track) = self.video_track.take() {
            track.stop();
        }
    }

    fn stop_audio_track(&mut self) {
        if let Some(mut track) = self.audio_track.take() {
            track.stop();
        }
    }

    /// Cancel the sampling loop and close the meter's analyser.
    fn teardown_meter(&mut self) {
        if let Some(mut task) = self.meter_task.take() {
            task.cancel();
        }
        if let Some(mut meter) = self.meter.lock().take() {
            meter.close();
        }
    }

    /// Build a fresh meter for the current audio track, restarting the
    /// sampling loop if monitoring was requested. Analyser failure
    /// leaves the meter inactive.
    fn rebuild_meter(&mut self) {
        self.teardown_meter();
        let Some(track) = self.audio_track.as_deref() else {
            return;
        };
        match self.backend.create_analyser(track) {
            Ok(analyser) => {
                *self.meter.lock() = Some(AudioMeter::new(analyser));
                if self.monitor_requested {
                    self.spawn_sampling_loop();
                }
            }
            Err(err) => {
                log::warn!("audio meter unavailable: {}", err);
            }
        }
    }

    fn spawn_sampling_loop(&mut self) {
        let meter = Arc::clone(&self.meter);
        let delegate = self.delegate.clone();
        let handle = self.scheduler.schedule_repeating(
            "audio-level-meter",
            self.constraints.meter_interval,
            Box::new(move || {
                let percent = match meter.lock().as_mut() {
                    Some(meter) => meter.sample_percent(),
                    // Meter torn down: the loop ends itself.
                    None => return Tick::Stop,
                };
                if let Some(ref delegate) = delegate {
                    delegate.on_level_changed(percent);
                }
                Tick::Continue
            }),
        );
        self.meter_task = Some(handle);
    }

    fn spawn_elapsed_timer(&mut self, started_at: Instant) {
        let delegate = self.delegate.clone();
        let handle = self.scheduler.schedule_repeating(
            "recording-timer",
            self.constraints.timer_interval,
            Box::new(move || {
                if let Some(ref delegate) = delegate {
                    delegate.on_elapsed_time_changed(started_at.elapsed());
                }
                Tick::Continue
            }),
        );
        self.timer_task = Some(handle);
    }

    fn emit_state(&self) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_recording_state_changed(&self.recording_state);
        }
    }

    fn notify(&self, notice: Notice) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_notice(&notice);
        }
    }

    /// Route a failure: benign conditions become warning notices,
    /// everything else goes through the error channel.
    fn report(&self, error: &SessionError) {
        if error.is_benign() {
            log::debug!("benign condition: {}", error);
            self.notify(Notice::warning(error.to_string()));
        } else {
            log::error!("session error: {}", error);
            if let Some(ref delegate) = self.delegate {
                delegate.on_error(error);
            }
        }
    }
}

impl Drop for MediaSessionManager {
    fn drop(&mut self) {
        self.teardown();
    }
}
