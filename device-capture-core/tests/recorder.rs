//! Behavior tests for `CaptureRecorder` driven through the sim backends.

use std::sync::Arc;

use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use device_capture_core::{
    CaptureError, CaptureRecorder, MediaKind, RecorderDelegate, RecordingResult,
    ResourceAllocator, SessionPhase, StreamConstraints,
};
use device_capture_sim::{MemoryAllocator, SimMediaProvider, SimRecorderFactory};

struct Harness {
    provider: Arc<SimMediaProvider>,
    factory: Arc<SimRecorderFactory>,
    allocator: Arc<MemoryAllocator>,
    recorder: CaptureRecorder<SimMediaProvider, SimRecorderFactory>,
}

fn harness_with(provider: SimMediaProvider, kind: MediaKind, base_name: &str) -> Harness {
    let provider = Arc::new(provider);
    let factory = Arc::new(SimRecorderFactory::new());
    let allocator = Arc::new(MemoryAllocator::new());
    let recorder = CaptureRecorder::new(
        Arc::clone(&provider),
        Arc::clone(&factory),
        Arc::clone(&allocator) as Arc<dyn ResourceAllocator>,
        kind,
        base_name,
    );
    Harness {
        provider,
        factory,
        allocator,
        recorder,
    }
}

fn harness(kind: MediaKind, base_name: &str) -> Harness {
    harness_with(SimMediaProvider::granting(), kind, base_name)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[derive(Default)]
struct RecordingRecorderDelegate {
    phases: Mutex<Vec<SessionPhase>>,
    errors: Mutex<Vec<CaptureError>>,
    finished: Mutex<Vec<RecordingResult>>,
}

impl RecorderDelegate for RecordingRecorderDelegate {
    fn on_state_changed(&self, phase: SessionPhase) {
        self.phases.lock().push(phase);
    }

    fn on_error(&self, error: &CaptureError) {
        self.errors.lock().push(error.clone());
    }

    fn on_capture_finished(&self, result: &RecordingResult) {
        self.finished.lock().push(result.clone());
    }
}

#[test]
fn audio_session_assembles_chunks_in_order() {
    let h = harness(MediaKind::Audio, "clip");
    assert_eq!(h.recorder.file_name(), "clip.ogg");
    assert_eq!(h.recorder.phase(), SessionPhase::Idle);

    h.recorder.start();
    assert_eq!(h.recorder.phase(), SessionPhase::Recording);
    assert_eq!(
        h.provider.last_constraints(),
        Some(StreamConstraints { audio: true, video: false })
    );

    let sim = h.factory.last().unwrap();
    sim.push_chunk(b"c1".to_vec());
    sim.push_chunk(b"c2".to_vec());

    h.recorder.stop();
    assert_eq!(h.recorder.phase(), SessionPhase::Idle);
    assert!(h.recorder.last_error().is_none());

    let result = h.recorder.result().unwrap();
    assert_eq!(result.file_name, "clip.ogg");
    assert_eq!(result.chunk_count, 2);
    assert_eq!(result.byte_len, 4);
    assert_eq!(result.checksum, sha256_hex(b"c1c2"));
    assert_eq!(h.allocator.bytes_for(&result.resource), Some(b"c1c2".to_vec()));
    assert_eq!(h.recorder.resource(), Some(result.resource));
}

#[test]
fn chunks_pending_at_stop_flush_into_the_result() {
    let h = harness(MediaKind::Audio, "note");
    h.recorder.start();

    let sim = h.factory.last().unwrap();
    sim.push_chunk(b"head".to_vec());
    sim.queue_chunk(b"tail".to_vec());

    h.recorder.stop();

    let result = h.recorder.result().unwrap();
    assert_eq!(result.chunk_count, 2);
    assert_eq!(h.allocator.bytes_for(&result.resource), Some(b"headtail".to_vec()));
    assert_eq!(result.checksum, sha256_hex(b"headtail"));
}

#[test]
fn double_start_reports_already_in_progress_and_requests_no_second_stream() {
    let h = harness(MediaKind::Audio, "clip");
    h.recorder.start();
    h.recorder.start();

    assert_eq!(h.recorder.last_error(), Some(CaptureError::AlreadyInProgress));
    assert_eq!(h.provider.request_count(), 1);
    assert_eq!(h.recorder.phase(), SessionPhase::Recording);

    // The first session is unaffected and still assembles.
    h.factory.last().unwrap().push_chunk(b"x".to_vec());
    h.recorder.stop();
    assert_eq!(h.recorder.result().unwrap().chunk_count, 1);
}

#[test]
fn stop_without_start_reports_not_in_progress() {
    let h = harness(MediaKind::Audio, "clip");
    h.recorder.stop();

    assert_eq!(h.recorder.last_error(), Some(CaptureError::NotInProgress));
    assert!(h.recorder.result().is_none());
    assert_eq!(h.recorder.phase(), SessionPhase::Idle);
    assert_eq!(h.provider.request_count(), 0);
}

#[test]
fn denied_video_session_recovers_and_retries() {
    let h = harness_with(
        SimMediaProvider::denying(CaptureError::PermissionDenied("camera blocked".into())),
        MediaKind::Video,
        "take",
    );
    assert_eq!(h.recorder.file_name(), "take.webm");

    h.recorder.start();
    let error = h.recorder.last_error().unwrap();
    assert!(error.is_permission_denied());
    assert!(h.recorder.result().is_none());
    assert_eq!(h.recorder.phase(), SessionPhase::Idle);

    // Grant and retry: the failed attempt must not wedge the phase.
    h.provider.set_denial(None);
    h.recorder.start();
    assert_eq!(h.recorder.phase(), SessionPhase::Recording);
    // The stale error stays in the slot until stop clears it.
    assert!(h.recorder.last_error().unwrap().is_permission_denied());
    assert_eq!(
        h.provider.last_constraints(),
        Some(StreamConstraints { audio: false, video: true })
    );

    h.factory.last().unwrap().push_chunk(b"frame".to_vec());
    h.recorder.stop();
    assert!(h.recorder.result().is_some());
    assert!(h.recorder.last_error().is_none());
}

#[test]
fn stop_releases_every_track() {
    let h = harness(MediaKind::AudioVideo, "both");
    h.recorder.start();
    assert_eq!(
        h.provider.last_constraints(),
        Some(StreamConstraints { audio: true, video: true })
    );

    let stream = h.provider.streams().pop().unwrap();
    assert_eq!(stream.sim_tracks().len(), 2);
    assert!(!stream.all_tracks_stopped());

    h.recorder.stop();
    assert!(stream.all_tracks_stopped());
    assert!(h.factory.last().unwrap().is_stopped());
}

#[test]
fn dropping_a_live_recorder_releases_tracks_without_assembling() {
    let provider = Arc::new(SimMediaProvider::granting());
    let factory = Arc::new(SimRecorderFactory::new());
    let allocator = Arc::new(MemoryAllocator::new());

    {
        let recorder = CaptureRecorder::new(
            Arc::clone(&provider),
            Arc::clone(&factory),
            Arc::clone(&allocator) as Arc<dyn ResourceAllocator>,
            MediaKind::Audio,
            "orphan",
        );
        recorder.start();
        factory.last().unwrap().push_chunk(b"late".to_vec());
    }

    let stream = provider.streams().pop().unwrap();
    assert!(stream.all_tracks_stopped());
    assert_eq!(allocator.allocation_count(), 0);
}

#[test]
fn a_new_session_replaces_buffer_and_result() {
    let h = harness(MediaKind::Audio, "clip");

    h.recorder.start();
    h.factory.last().unwrap().push_chunk(b"one".to_vec());
    h.recorder.stop();
    let first = h.recorder.result().unwrap();

    h.recorder.start();
    h.factory.last().unwrap().push_chunk(b"two!".to_vec());
    h.recorder.stop();
    let second = h.recorder.result().unwrap();

    assert_ne!(first.resource, second.resource);
    assert_eq!(second.chunk_count, 1);
    assert_eq!(second.byte_len, 4);
    assert_eq!(h.allocator.bytes_for(&second.resource), Some(b"two!".to_vec()));
    // Two distinct encoder sessions were opened.
    assert_eq!(h.factory.opened().len(), 2);
}

#[test]
fn file_names_follow_the_media_kind() {
    assert_eq!(harness(MediaKind::Audio, "memo").recorder.file_name(), "memo.ogg");
    assert_eq!(harness(MediaKind::Video, "memo").recorder.file_name(), "memo.webm");
    assert_eq!(
        harness(MediaKind::AudioVideo, "memo").recorder.file_name(),
        "memo.webm"
    );
}

#[test]
fn result_carries_duration_and_rfc3339_timestamp() {
    let h = harness(MediaKind::Audio, "clip");
    h.recorder.start();
    h.factory.last().unwrap().push_chunk(b"a".to_vec());
    h.recorder.stop();

    let result = h.recorder.result().unwrap();
    assert!(result.duration_secs >= 0.0);
    assert!(chrono::DateTime::parse_from_rfc3339(&result.created_at).is_ok());
}

#[test]
fn delegate_observes_the_full_phase_cycle() {
    let h = harness(MediaKind::Audio, "clip");
    let delegate = Arc::new(RecordingRecorderDelegate::default());
    h.recorder.set_delegate(Arc::clone(&delegate) as Arc<dyn RecorderDelegate>);

    h.recorder.start();
    h.factory.last().unwrap().push_chunk(b"a".to_vec());
    h.recorder.stop();

    assert_eq!(
        *delegate.phases.lock(),
        vec![
            SessionPhase::RequestingPermission,
            SessionPhase::Recording,
            SessionPhase::Stopping,
            SessionPhase::Idle,
        ]
    );
    assert_eq!(delegate.finished.lock().len(), 1);
    assert!(delegate.errors.lock().is_empty());
}

#[test]
fn delegate_sees_denial_then_permission_requirement() {
    let h = harness_with(
        SimMediaProvider::denying(CaptureError::PermissionDenied("camera blocked".into())),
        MediaKind::Video,
        "take",
    );
    let delegate = Arc::new(RecordingRecorderDelegate::default());
    h.recorder.set_delegate(Arc::clone(&delegate) as Arc<dyn RecorderDelegate>);

    h.recorder.start();

    assert_eq!(
        *delegate.phases.lock(),
        vec![SessionPhase::RequestingPermission, SessionPhase::Idle]
    );
    assert_eq!(
        *delegate.errors.lock(),
        vec![
            CaptureError::PermissionDenied("camera blocked".into()),
            CaptureError::PermissionRequired,
        ]
    );
    assert!(delegate.finished.lock().is_empty());
}
