//! Device, stream, and meter lifecycle driven through the simulated
//! backends: access grants, track switching, level monitoring, and
//! teardown.

use std::sync::Arc;

use media_session_core::{
    DeviceKind, MediaSessionManager, SessionConstraints, SessionError, VisualEffect,
};
use media_session_sim::{
    CollectingDelegate, ManualScheduler, SessionEvent, SimCaptureBackend, SimRecorder,
};

fn manager_with(
    backend: &SimCaptureBackend,
    recorder: &SimRecorder,
    scheduler: &ManualScheduler,
    delegate: &CollectingDelegate,
) -> MediaSessionManager {
    let mut manager = MediaSessionManager::new(
        Box::new(backend.clone()),
        Box::new(recorder.clone()),
        Arc::new(scheduler.clone()),
        SessionConstraints::default(),
    )
    .unwrap();
    manager.set_delegate(Arc::new(delegate.clone()));
    manager
}

fn two_cameras_one_mic() -> SimCaptureBackend {
    let backend = SimCaptureBackend::new();
    backend.add_camera("cam-1", "Front Camera");
    backend.add_camera("cam-2", "Rear Camera");
    backend.add_microphone("mic-1", "Built-in Mic");
    backend
}

#[test]
fn granted_access_populates_session_and_devices() {
    let backend = two_cameras_one_mic();
    let delegate = CollectingDelegate::new();
    let mut manager = manager_with(
        &backend,
        &SimRecorder::new(),
        &ManualScheduler::new(),
        &delegate,
    );

    manager.request_access().unwrap();

    assert!(manager.video_active());
    assert!(manager.audio_active());
    assert_eq!(manager.selected_camera(), Some("cam-1"));
    assert_eq!(manager.selected_microphone(), Some("mic-1"));
    assert_eq!(manager.cameras().len(), 2);
    assert_eq!(manager.microphones().len(), 1);
    // Labels become visible after the grant.
    assert_eq!(manager.cameras()[0].label, "Front Camera");
    assert!(delegate.events().contains(&SessionEvent::DeviceList {
        cameras: 2,
        microphones: 1,
    }));
}

#[test]
fn labels_are_empty_before_grant() {
    let backend = two_cameras_one_mic();
    let mut manager = manager_with(
        &backend,
        &SimRecorder::new(),
        &ManualScheduler::new(),
        &CollectingDelegate::new(),
    );

    manager.refresh_devices().unwrap();

    assert_eq!(manager.cameras().len(), 2);
    assert!(manager.cameras().iter().all(|d| d.label.is_empty()));
    // First entry of each list is the default selection policy.
    assert_eq!(manager.selected_camera(), Some("cam-1"));
    assert_eq!(manager.selected_microphone(), Some("mic-1"));
}

#[test]
fn denied_access_leaves_manager_usable() {
    let backend = two_cameras_one_mic();
    backend.deny_access(true);
    let delegate = CollectingDelegate::new();
    let mut manager = manager_with(
        &backend,
        &SimRecorder::new(),
        &ManualScheduler::new(),
        &delegate,
    );

    assert_eq!(
        manager.request_access().unwrap_err(),
        SessionError::PermissionDenied
    );
    assert!(!manager.video_active());
    assert!(!manager.audio_active());
    assert_eq!(delegate.errors(), vec![SessionError::PermissionDenied]);

    // Retrying after the user relents succeeds from the same manager.
    backend.deny_access(false);
    manager.request_access().unwrap();
    assert!(manager.video_active());
}

#[test]
fn access_without_hardware_is_device_unavailable() {
    let backend = SimCaptureBackend::new();
    let mut manager = manager_with(
        &backend,
        &SimRecorder::new(),
        &ManualScheduler::new(),
        &CollectingDelegate::new(),
    );

    assert_eq!(
        manager.request_access().unwrap_err(),
        SessionError::DeviceUnavailable
    );
}

#[test]
fn selecting_second_camera_keeps_audio_untouched() {
    let backend = two_cameras_one_mic();
    let mut manager = manager_with(
        &backend,
        &SimRecorder::new(),
        &ManualScheduler::new(),
        &CollectingDelegate::new(),
    );
    manager.request_access().unwrap();

    manager.select_camera("cam-2").unwrap();

    assert_eq!(manager.selected_camera(), Some("cam-2"));
    assert_eq!(manager.selected_microphone(), Some("mic-1"));
    assert!(manager.audio_active());
    assert_eq!(backend.live_tracks(DeviceKind::Camera), 1);
    assert_eq!(backend.live_tracks(DeviceKind::Microphone), 1);
}

#[test]
fn unknown_device_id_is_rejected_without_side_effects() {
    let backend = two_cameras_one_mic();
    let delegate = CollectingDelegate::new();
    let mut manager = manager_with(
        &backend,
        &SimRecorder::new(),
        &ManualScheduler::new(),
        &delegate,
    );
    manager.request_access().unwrap();

    let err = manager.select_camera("cam-99").unwrap_err();
    assert_eq!(err, SessionError::InvalidDevice("cam-99".into()));

    // Validation precedes the stop: the current track is untouched.
    assert!(manager.video_active());
    assert_eq!(manager.selected_camera(), Some("cam-1"));
    assert!(delegate.errors().contains(&err));
}

#[test]
fn never_more_than_one_live_track_per_kind() {
    let backend = two_cameras_one_mic();
    backend.add_microphone("mic-2", "Headset");
    let mut manager = manager_with(
        &backend,
        &SimRecorder::new(),
        &ManualScheduler::new(),
        &CollectingDelegate::new(),
    );
    manager.request_access().unwrap();

    for id in ["cam-2", "cam-1", "cam-2"] {
        manager.select_camera(id).unwrap();
        assert_eq!(backend.live_tracks(DeviceKind::Camera), 1);
    }
    for id in ["mic-2", "mic-1"] {
        manager.select_microphone(id).unwrap();
        assert_eq!(backend.live_tracks(DeviceKind::Microphone), 1);
    }
}

#[test]
fn unplugged_camera_leaves_preview_inactive() {
    let backend = two_cameras_one_mic();
    let mut manager = manager_with(
        &backend,
        &SimRecorder::new(),
        &ManualScheduler::new(),
        &CollectingDelegate::new(),
    );
    manager.request_access().unwrap();

    // Device disappears after enumeration but before the switch.
    backend.unplug("cam-2");
    let err = manager.select_camera("cam-2").unwrap_err();

    assert_eq!(err, SessionError::DeviceUnavailable);
    // Stop-before-acquire: the old lock is already released, the
    // preview is inactive, and audio is unaffected.
    assert!(!manager.video_active());
    assert_eq!(manager.selected_camera(), None);
    assert!(manager.audio_active());
    assert_eq!(backend.live_tracks(DeviceKind::Camera), 0);
}

#[test]
fn disable_camera_keeps_selection() {
    let backend = two_cameras_one_mic();
    let mut manager = manager_with(
        &backend,
        &SimRecorder::new(),
        &ManualScheduler::new(),
        &CollectingDelegate::new(),
    );
    manager.request_access().unwrap();

    manager.disable_camera();

    assert!(!manager.video_active());
    assert_eq!(manager.selected_camera(), Some("cam-1"));
    assert_eq!(backend.live_tracks(DeviceKind::Camera), 0);
}

#[test]
fn level_readings_are_clamped() {
    let backend = two_cameras_one_mic();
    let scheduler = ManualScheduler::new();
    let delegate = CollectingDelegate::new();
    let mut manager = manager_with(&backend, &SimRecorder::new(), &scheduler, &delegate);
    manager.request_access().unwrap();
    manager.start_audio_level_monitor();

    backend.set_energy(0);
    scheduler.advance(1);
    backend.set_energy(255);
    scheduler.advance(1);
    backend.set_energy(64);
    scheduler.advance(1);

    assert_eq!(delegate.levels(), vec![0.0, 100.0, 50.0]);
}

#[test]
fn monitor_start_is_duplicate_free_and_restartable() {
    let backend = two_cameras_one_mic();
    let scheduler = ManualScheduler::new();
    let mut manager = manager_with(
        &backend,
        &SimRecorder::new(),
        &scheduler,
        &CollectingDelegate::new(),
    );
    manager.request_access().unwrap();

    manager.start_audio_level_monitor();
    manager.start_audio_level_monitor();
    assert_eq!(
        scheduler
            .active_labels()
            .iter()
            .filter(|l| *l == "audio-level-meter")
            .count(),
        1
    );

    manager.stop_audio_level_monitor();
    assert_eq!(scheduler.active_tasks(), 0);

    manager.start_audio_level_monitor();
    assert_eq!(scheduler.active_tasks(), 1);
}

#[test]
fn microphone_switch_rebuilds_meter_and_keeps_monitoring() {
    let backend = two_cameras_one_mic();
    backend.add_microphone("mic-2", "Headset");
    let scheduler = ManualScheduler::new();
    let delegate = CollectingDelegate::new();
    let mut manager = manager_with(&backend, &SimRecorder::new(), &scheduler, &delegate);
    manager.request_access().unwrap();
    manager.start_audio_level_monitor();

    backend.set_energy(64);
    scheduler.advance(1);

    manager.select_microphone("mic-2").unwrap();

    // Exactly one sampling loop survives the rebuild.
    assert_eq!(
        scheduler
            .active_labels()
            .iter()
            .filter(|l| *l == "audio-level-meter")
            .count(),
        1
    );
    scheduler.advance(1);
    assert_eq!(delegate.levels(), vec![50.0, 50.0]);
}

#[test]
fn analyser_failure_silences_level_reporting() {
    let backend = two_cameras_one_mic();
    backend.add_microphone("mic-2", "Headset");
    let scheduler = ManualScheduler::new();
    let delegate = CollectingDelegate::new();
    let mut manager = manager_with(&backend, &SimRecorder::new(), &scheduler, &delegate);
    manager.request_access().unwrap();
    manager.start_audio_level_monitor();

    backend.fail_analyser(true);
    manager.select_microphone("mic-2").unwrap();

    // The switch itself succeeded, but no meter exists and no loop runs.
    assert!(manager.audio_active());
    assert!(!manager.monitor_active());
    scheduler.advance(3);
    assert!(delegate.levels().is_empty());
}

#[test]
fn meter_uses_display_refresh_cadence() {
    let backend = two_cameras_one_mic();
    let scheduler = ManualScheduler::new();
    let mut manager = manager_with(
        &backend,
        &SimRecorder::new(),
        &scheduler,
        &CollectingDelegate::new(),
    );
    manager.request_access().unwrap();
    manager.start_audio_level_monitor();

    assert_eq!(
        scheduler.period_of("audio-level-meter"),
        Some(SessionConstraints::default().meter_interval)
    );
}

#[test]
fn teardown_is_idempotent_and_releases_everything() {
    let backend = two_cameras_one_mic();
    let scheduler = ManualScheduler::new();
    let delegate = CollectingDelegate::new();
    let mut manager = manager_with(&backend, &SimRecorder::new(), &scheduler, &delegate);
    manager.request_access().unwrap();
    manager.start_audio_level_monitor();

    manager.teardown();
    manager.teardown();

    assert!(!manager.video_active());
    assert!(!manager.audio_active());
    assert_eq!(backend.live_tracks(DeviceKind::Camera), 0);
    assert_eq!(backend.live_tracks(DeviceKind::Microphone), 0);
    assert_eq!(scheduler.active_tasks(), 0);
    assert!(manager.clip_metadata().is_none());

    delegate.clear();
    scheduler.advance(3);
    assert!(delegate.levels().is_empty());
}

#[test]
fn visual_effects_replace_each_other() {
    let backend = two_cameras_one_mic();
    let mut manager = manager_with(
        &backend,
        &SimRecorder::new(),
        &ManualScheduler::new(),
        &CollectingDelegate::new(),
    );
    manager.request_access().unwrap();

    assert_eq!(manager.apply_visual_effect("sepia"), VisualEffect::Sepia);
    assert_eq!(manager.apply_visual_effect("blur"), VisualEffect::Blur);
    assert_eq!(manager.active_effect(), VisualEffect::Blur);

    // Unknown names clear the effect instead of erroring.
    assert_eq!(manager.apply_visual_effect("vignette"), VisualEffect::None);
    assert_eq!(manager.active_effect().css_filter(), "none");
}
