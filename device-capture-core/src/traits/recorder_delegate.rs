use crate::models::error::CaptureError;
use crate::models::media::RecordingResult;
use crate::models::state::SessionPhase;

/// Event observer for a capture recorder.
///
/// Methods fire from whatever context drove the transition, including the
/// platform's completion callback.
pub trait RecorderDelegate: Send + Sync {
    /// Called on every phase transition.
    fn on_state_changed(&self, phase: SessionPhase);

    /// Called when an error lands in the error slot.
    fn on_error(&self, error: &CaptureError);

    /// Called when a session's resource has been assembled.
    fn on_capture_finished(&self, result: &RecordingResult);
}
