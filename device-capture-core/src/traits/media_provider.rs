use std::sync::Arc;

use crate::models::error::CaptureError;
use crate::models::media::{StreamConstraints, TrackKind};

/// A single track within an acquired media stream.
pub trait MediaTrack: Send + Sync {
    fn kind(&self) -> TrackKind;

    /// Release the underlying device. Idempotent.
    fn stop(&self);
}

/// A live media stream composed of independently stoppable tracks.
pub trait MediaStream: Send + Sync {
    fn tracks(&self) -> Vec<Arc<dyn MediaTrack>>;
}

impl std::fmt::Debug for dyn MediaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStream").finish_non_exhaustive()
    }
}

/// Interface to the platform media-capture capability.
///
/// Acquisition is the permission point: the call resolves with a live
/// stream or the platform's denial. An acquired stream is exclusively
/// owned by the session that requested it.
pub trait MediaProvider: Send + Sync {
    fn request_stream(
        &self,
        constraints: StreamConstraints,
    ) -> Result<Arc<dyn MediaStream>, CaptureError>;
}
