use crate::models::error::CaptureError;
use crate::models::geo::PositionFix;

/// Event observer for a position watcher.
///
/// Methods fire from whatever context the provider delivers callbacks on;
/// implementations marshal to their own thread if they need one.
pub trait WatchDelegate: Send + Sync {
    /// A fix passed the throttle gate and replaced the snapshot.
    fn on_fix(&self, fix: &PositionFix);

    /// An error was published. Errors are never throttled.
    fn on_error(&self, error: &CaptureError);
}
