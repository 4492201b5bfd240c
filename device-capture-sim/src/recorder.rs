//! Hand-driven stream recorder.

use std::sync::Arc;

use parking_lot::Mutex;

use device_capture_core::traits::media_provider::MediaStream;
use device_capture_core::traits::stream_recorder::{
    ChunkCallback, RecorderFactory, StopCallback, StreamRecorder,
};

#[derive(Default)]
struct RecorderState {
    on_chunk: Option<ChunkCallback>,
    queued: Vec<Vec<u8>>,
    started: bool,
    stopped: bool,
}

/// Test handle to one opened recorder.
///
/// The factory keeps a handle per `open_recorder` call so a test can drive
/// chunk delivery while the controller owns the boxed recorder.
pub struct SimStreamRecorder {
    state: Mutex<RecorderState>,
}

impl SimStreamRecorder {
    fn new() -> Self {
        Self {
            state: Mutex::new(RecorderState::default()),
        }
    }

    /// Deliver a chunk immediately. The recorder must be started.
    pub fn push_chunk(&self, chunk: Vec<u8>) {
        let on_chunk = {
            let state = self.state.lock();
            assert!(
                state.started && !state.stopped,
                "push_chunk on a recorder that is not running"
            );
            state.on_chunk.clone()
        };
        if let Some(on_chunk) = on_chunk {
            on_chunk(chunk);
        }
    }

    /// Hold a chunk back until `stop`, where it flushes before the
    /// completion callback fires.
    pub fn queue_chunk(&self, chunk: Vec<u8>) {
        self.state.lock().queued.push(chunk);
    }

    pub fn is_started(&self) -> bool {
        self.state.lock().started
    }

    pub fn is_stopped(&self) -> bool {
        self.state.lock().stopped
    }
}

/// The boxed half handed to the controller.
struct SimRecorderBinding {
    inner: Arc<SimStreamRecorder>,
}

impl StreamRecorder for SimRecorderBinding {
    fn start(&mut self, on_chunk: ChunkCallback) {
        let mut state = self.inner.state.lock();
        state.on_chunk = Some(on_chunk);
        state.started = true;
    }

    fn stop(&mut self, on_stop: StopCallback) {
        // Flush queued chunks in order, then fire the one-shot completion.
        let (on_chunk, queued) = {
            let mut state = self.inner.state.lock();
            state.stopped = true;
            (state.on_chunk.clone(), std::mem::take(&mut state.queued))
        };

        if let Some(on_chunk) = on_chunk {
            for chunk in queued {
                on_chunk(chunk);
            }
        }
        on_stop();
    }
}

/// Opens sim recorders and keeps a test handle to each.
pub struct SimRecorderFactory {
    opened: Mutex<Vec<Arc<SimStreamRecorder>>>,
}

impl SimRecorderFactory {
    pub fn new() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
        }
    }

    /// Recorders opened so far, oldest first.
    pub fn opened(&self) -> Vec<Arc<SimStreamRecorder>> {
        self.opened.lock().clone()
    }

    /// The most recently opened recorder.
    pub fn last(&self) -> Option<Arc<SimStreamRecorder>> {
        self.opened.lock().last().cloned()
    }
}

impl Default for SimRecorderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RecorderFactory for SimRecorderFactory {
    fn open_recorder(&self, _stream: Arc<dyn MediaStream>) -> Box<dyn StreamRecorder> {
        let inner = Arc::new(SimStreamRecorder::new());
        self.opened.lock().push(Arc::clone(&inner));
        log::debug!("sim recorder {} opened", self.opened.lock().len());
        Box::new(SimRecorderBinding { inner })
    }
}
