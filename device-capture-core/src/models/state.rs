/// Recorder session state machine.
///
/// State transitions:
/// ```text
/// idle → requesting-permission → recording → stopping → idle
///                 ↓ (no stream)
///                idle
/// ```
///
/// One session at a time: `start` is only legal from `Idle`, `stop` only
/// from `Recording`. Failed transitions land back in `Idle` so the next
/// attempt is never blocked by a stale phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    RequestingPermission,
    Recording,
    Stopping,
}

impl SessionPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    /// True while a session holds the provider (anything but idle).
    pub fn is_busy(&self) -> bool {
        !self.is_idle()
    }
}
