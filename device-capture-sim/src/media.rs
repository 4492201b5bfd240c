//! Grant/deny media acquisition backend.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use device_capture_core::models::error::CaptureError;
use device_capture_core::models::media::{StreamConstraints, TrackKind};
use device_capture_core::traits::media_provider::{MediaProvider, MediaStream, MediaTrack};

/// Track whose only behavior is remembering that it was stopped.
pub struct SimMediaTrack {
    kind: TrackKind,
    stopped: AtomicBool,
}

impl SimMediaTrack {
    pub fn new(kind: TrackKind) -> Self {
        Self {
            kind,
            stopped: AtomicBool::new(false),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl MediaTrack for SimMediaTrack {
    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// Stream holding one sim track per requested kind.
pub struct SimMediaStream {
    tracks: Vec<Arc<SimMediaTrack>>,
}

impl SimMediaStream {
    pub fn new(constraints: StreamConstraints) -> Self {
        let mut tracks = Vec::new();
        if constraints.audio {
            tracks.push(Arc::new(SimMediaTrack::new(TrackKind::Audio)));
        }
        if constraints.video {
            tracks.push(Arc::new(SimMediaTrack::new(TrackKind::Video)));
        }
        Self { tracks }
    }

    /// Typed view of the tracks, for release assertions.
    pub fn sim_tracks(&self) -> &[Arc<SimMediaTrack>] {
        &self.tracks
    }

    pub fn all_tracks_stopped(&self) -> bool {
        self.tracks.iter().all(|t| t.is_stopped())
    }
}

impl MediaStream for SimMediaStream {
    fn tracks(&self) -> Vec<Arc<dyn MediaTrack>> {
        self.tracks
            .iter()
            .map(|t| Arc::clone(t) as Arc<dyn MediaTrack>)
            .collect()
    }
}

/// Media provider with a grant/deny switch and a request log.
pub struct SimMediaProvider {
    denial: Mutex<Option<CaptureError>>,
    requests: AtomicUsize,
    last_constraints: Mutex<Option<StreamConstraints>>,
    streams: Mutex<Vec<Arc<SimMediaStream>>>,
}

impl SimMediaProvider {
    /// Provider that grants every request.
    pub fn granting() -> Self {
        Self {
            denial: Mutex::new(None),
            requests: AtomicUsize::new(0),
            last_constraints: Mutex::new(None),
            streams: Mutex::new(Vec::new()),
        }
    }

    /// Provider that denies every request with `error`.
    pub fn denying(error: CaptureError) -> Self {
        let provider = Self::granting();
        *provider.denial.lock() = Some(error);
        provider
    }

    /// Flip the grant/deny switch after construction.
    pub fn set_denial(&self, error: Option<CaptureError>) {
        *self.denial.lock() = error;
    }

    /// How many acquisitions have been attempted, granted or not.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Constraints of the most recent acquisition attempt.
    pub fn last_constraints(&self) -> Option<StreamConstraints> {
        *self.last_constraints.lock()
    }

    /// Every stream handed out so far, oldest first.
    pub fn streams(&self) -> Vec<Arc<SimMediaStream>> {
        self.streams.lock().clone()
    }
}

impl MediaProvider for SimMediaProvider {
    fn request_stream(
        &self,
        constraints: StreamConstraints,
    ) -> Result<Arc<dyn MediaStream>, CaptureError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.last_constraints.lock() = Some(constraints);

        if let Some(error) = self.denial.lock().clone() {
            log::debug!("denying stream request: {}", error);
            return Err(error);
        }

        let stream = Arc::new(SimMediaStream::new(constraints));
        self.streams.lock().push(Arc::clone(&stream));
        Ok(stream)
    }
}
