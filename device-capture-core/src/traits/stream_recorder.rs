use std::sync::Arc;

use super::media_provider::MediaStream;

/// Callback invoked for every encoded chunk the recorder emits.
///
/// Chunks arrive in emission order; delivery is serialized by the platform.
pub type ChunkCallback = Arc<dyn Fn(Vec<u8>) + Send + Sync + 'static>;

/// One-shot callback fired after the recorder has flushed every pending
/// chunk of the session.
pub type StopCallback = Box<dyn FnOnce() + Send + 'static>;

/// An active encoder bound to one media stream.
pub trait StreamRecorder: Send {
    /// Begin encoding, delivering chunks via `on_chunk`.
    fn start(&mut self, on_chunk: ChunkCallback);

    /// Stop encoding. `on_stop` fires exactly once, after the final chunk
    /// has been delivered.
    fn stop(&mut self, on_stop: StopCallback);
}

/// Opens recorders bound to acquired streams.
pub trait RecorderFactory: Send + Sync {
    fn open_recorder(&self, stream: Arc<dyn MediaStream>) -> Box<dyn StreamRecorder>;
}
