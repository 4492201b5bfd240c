use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use crate::models::error::CaptureError;
use crate::models::media::{MediaKind, RecordingResult, ResourceHandle};
use crate::models::state::SessionPhase;
use crate::traits::media_provider::{MediaProvider, MediaStream};
use crate::traits::recorder_delegate::RecorderDelegate;
use crate::traits::resource_allocator::ResourceAllocator;
use crate::traits::stream_recorder::{ChunkCallback, RecorderFactory, StopCallback, StreamRecorder};

/// Published recorder state, shared with the completion callback.
struct RecorderShared {
    phase: SessionPhase,
    error: Option<CaptureError>,
    result: Option<RecordingResult>,
    delegate: Option<Arc<dyn RecorderDelegate>>,
}

impl RecorderShared {
    fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            error: None,
            result: None,
            delegate: None,
        }
    }
}

/// Stateful media capture controller.
///
/// One session at a time: `start` acquires a stream scoped to the
/// recorder's kind and begins encoding into the chunk buffer; `stop`
/// flushes the encoder, assembles the buffered chunks in arrival order
/// into an allocated resource, and releases every track.
///
/// ```text
/// [MediaProvider] → stream → [StreamRecorder] → chunk callback → chunk buffer
///                                            → stop completion → [ResourceAllocator] → RecordingResult
/// ```
///
/// Failures land in the error slot, never in a return value, and every
/// failing transition settles back in `Idle` so the next attempt is not
/// blocked by a stale phase.
pub struct CaptureRecorder<P: MediaProvider, F: RecorderFactory> {
    provider: Arc<P>,
    factory: Arc<F>,
    allocator: Arc<dyn ResourceAllocator>,
    kind: MediaKind,
    file_name: String,

    shared: Arc<Mutex<RecorderShared>>,

    // Chunk buffer shared with the recorder's chunk callback.
    chunks: Arc<Mutex<Vec<Vec<u8>>>>,

    // Handles owned by the live session.
    stream: Mutex<Option<Arc<dyn MediaStream>>>,
    recorder: Mutex<Option<Box<dyn StreamRecorder>>>,
    started_at: Mutex<Option<Instant>>,
}

impl<P: MediaProvider, F: RecorderFactory> CaptureRecorder<P, F> {
    /// Recorder for `kind`, publishing captures as `<base_name>.<extension>`.
    pub fn new(
        provider: Arc<P>,
        factory: Arc<F>,
        allocator: Arc<dyn ResourceAllocator>,
        kind: MediaKind,
        base_name: &str,
    ) -> Self {
        let file_name = format!("{}.{}", base_name, kind.file_extension());
        Self {
            provider,
            factory,
            allocator,
            kind,
            file_name,
            shared: Arc::new(Mutex::new(RecorderShared::new())),
            chunks: Arc::new(Mutex::new(Vec::new())),
            stream: Mutex::new(None),
            recorder: Mutex::new(None),
            started_at: Mutex::new(None),
        }
    }

    pub fn set_delegate(&self, delegate: Arc<dyn RecorderDelegate>) {
        self.shared.lock().delegate = Some(delegate);
    }

    /// Begin a capture session.
    ///
    /// Publishes `AlreadyInProgress` when a session is live (no second
    /// stream is ever requested). A failed acquisition publishes the
    /// provider's error followed by `PermissionRequired` and settles back
    /// in `Idle`, so a later `start` can try again.
    pub fn start(&self) {
        let busy = {
            let s = self.shared.lock();
            s.phase.is_busy()
        };
        if busy {
            self.publish_error(CaptureError::AlreadyInProgress);
            return;
        }

        self.set_phase(SessionPhase::RequestingPermission);

        match self.provider.request_stream(self.kind.constraints()) {
            Ok(stream) => {
                *self.stream.lock() = Some(stream);
            }
            Err(error) => {
                log::warn!("stream acquisition failed: {}", error);
                self.publish_error(error);
            }
        }

        self.begin_recording();
    }

    /// End the live session.
    ///
    /// Clears the previous error and result, flushes the encoder, and
    /// stores the assembled `RecordingResult`. Publishes `NotInProgress`
    /// when nothing is recording, leaving the result slot untouched.
    pub fn stop(&self) {
        let recording = {
            let s = self.shared.lock();
            s.phase.is_recording()
        };
        if !recording {
            self.publish_error(CaptureError::NotInProgress);
            return;
        }

        {
            let mut s = self.shared.lock();
            s.error = None;
            s.result = None;
        }

        let recorder = self.recorder.lock().take();
        let stream = self.stream.lock().take();
        let started_at = self.started_at.lock().take();

        let (mut recorder, stream) = match (recorder, stream) {
            (Some(recorder), Some(stream)) => (recorder, stream),
            (recorder, stream) => {
                // Half-open session: report it, release whatever half
                // exists, and recover to idle.
                log::warn!("stop with incomplete session handles");
                self.publish_error(CaptureError::InconsistentState);
                drop(recorder);
                if let Some(stream) = stream {
                    release_tracks(stream.as_ref());
                }
                self.set_phase(SessionPhase::Idle);
                return;
            }
        };

        self.set_phase(SessionPhase::Stopping);

        let duration_secs = started_at.map(|t| t.elapsed().as_secs_f64()).unwrap_or(0.0);

        let shared = Arc::clone(&self.shared);
        let chunks = Arc::clone(&self.chunks);
        let allocator = Arc::clone(&self.allocator);
        let file_name = self.file_name.clone();

        let on_stop: StopCallback = Box::new(move || {
            // The platform has flushed every pending chunk by now.
            let ordered = chunks.lock().clone();
            let resource = allocator.allocate(&ordered);

            let mut hasher = Sha256::new();
            let mut byte_len = 0u64;
            for chunk in &ordered {
                hasher.update(chunk);
                byte_len += chunk.len() as u64;
            }

            let result = RecordingResult {
                resource,
                file_name,
                byte_len,
                chunk_count: ordered.len(),
                checksum: format!("{:x}", hasher.finalize()),
                duration_secs,
                created_at: chrono::Utc::now().to_rfc3339(),
            };

            let delegate = {
                let mut s = shared.lock();
                s.result = Some(result.clone());
                s.delegate.clone()
            };
            if let Some(delegate) = delegate {
                delegate.on_capture_finished(&result);
            }
        });

        recorder.stop(on_stop);
        release_tracks(stream.as_ref());

        log::debug!("recording stopped ({})", self.file_name);
        self.set_phase(SessionPhase::Idle);
    }

    pub fn phase(&self) -> SessionPhase {
        self.shared.lock().phase
    }

    pub fn is_recording(&self) -> bool {
        self.shared.lock().phase.is_recording()
    }

    /// Most recently published error, if any.
    pub fn last_error(&self) -> Option<CaptureError> {
        self.shared.lock().error.clone()
    }

    /// Assembled result of the last completed session, if any.
    pub fn result(&self) -> Option<RecordingResult> {
        self.shared.lock().result.clone()
    }

    /// Handle to the last assembled resource.
    pub fn resource(&self) -> Option<ResourceHandle> {
        self.shared.lock().result.as_ref().map(|r| r.resource.clone())
    }

    /// Public name of the capture, `<base>.<extension>`. Derived once at
    /// construction from the media kind.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Second half of `start`: with a stream in hand, open the encoder and
    /// enter `Recording`; without one, report and settle back in idle.
    fn begin_recording(&self) {
        let stream = self.stream.lock().clone();
        let Some(stream) = stream else {
            self.publish_error(CaptureError::PermissionRequired);
            self.set_phase(SessionPhase::Idle);
            return;
        };

        self.chunks.lock().clear();

        let chunks = Arc::clone(&self.chunks);
        let on_chunk: ChunkCallback = Arc::new(move |chunk: Vec<u8>| {
            chunks.lock().push(chunk);
        });

        let mut recorder = self.factory.open_recorder(Arc::clone(&stream));
        recorder.start(on_chunk);

        *self.recorder.lock() = Some(recorder);
        *self.started_at.lock() = Some(Instant::now());

        log::debug!("recording started ({})", self.file_name);
        self.set_phase(SessionPhase::Recording);
    }

    fn set_phase(&self, phase: SessionPhase) {
        let delegate = {
            let mut s = self.shared.lock();
            s.phase = phase;
            s.delegate.clone()
        };

        if let Some(delegate) = delegate {
            delegate.on_state_changed(phase);
        }
    }

    fn publish_error(&self, error: CaptureError) {
        let delegate = {
            let mut s = self.shared.lock();
            s.error = Some(error.clone());
            s.delegate.clone()
        };

        if let Some(delegate) = delegate {
            delegate.on_error(&error);
        }
    }
}

impl<P: MediaProvider, F: RecorderFactory> Drop for CaptureRecorder<P, F> {
    fn drop(&mut self) {
        // A live session's devices must not outlive the controller. The
        // encoder is dropped without flushing; late results are discarded.
        let stream = self.stream.lock().take();
        if let Some(stream) = stream {
            release_tracks(stream.as_ref());
        }
        self.recorder.lock().take();
    }
}

fn release_tracks(stream: &dyn MediaStream) {
    for track in stream.tracks() {
        track.stop();
    }
}
