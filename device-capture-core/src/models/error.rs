use thiserror::Error;

/// Errors surfaced by the capture controllers.
///
/// Controllers never return these from lifecycle calls; they publish them
/// into the owning controller's error slot, so a caller always observes the
/// most recent failure alongside the rest of the session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("device does not support positioning")]
    UnsupportedCapability,

    #[error("permission not granted: {0}")]
    PermissionDenied(String),

    #[error("permission required before recording")]
    PermissionRequired,

    #[error("already recording, stop first")]
    AlreadyInProgress,

    #[error("nothing is recording now")]
    NotInProgress,

    #[error("permission required first")]
    InconsistentState,

    #[error("provider error: {message}")]
    Provider {
        /// Platform error code, when the platform has one.
        code: Option<u16>,
        message: String,
    },
}

impl CaptureError {
    /// Provider-reported failure with the platform's code and message.
    pub fn provider(code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Provider {
            code,
            message: message.into(),
        }
    }

    /// True for the permission-failure family, whether the prompt was
    /// denied outright or no stream was available when recording began.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_) | Self::PermissionRequired)
    }
}
