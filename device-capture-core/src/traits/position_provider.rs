use std::sync::Arc;

use crate::models::error::CaptureError;
use crate::models::geo::{FixOptions, PositionFix};

/// Callback invoked for every fix the provider produces.
pub type FixCallback = Arc<dyn Fn(PositionFix) + Send + Sync + 'static>;

/// Callback invoked when the provider fails to produce a fix.
///
/// Backends map platform failures (code + message) into `CaptureError`
/// before delivery; see `CaptureError::provider`.
pub type PositionErrorCallback = Arc<dyn Fn(CaptureError) + Send + Sync + 'static>;

/// Identifier for an open continuous subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Interface to the platform positioning capability.
///
/// Implementations deliver fix and error callbacks serially. A subscription
/// stays live until `cancel`; a one-shot resolves with exactly one fix or
/// one error and cannot be cancelled in flight.
pub trait PositionProvider: Send + Sync {
    /// Whether positioning hardware is present at all.
    fn is_available(&self) -> bool;

    /// Resolve a single fix.
    fn request_once(&self, options: &FixOptions, on_fix: FixCallback, on_error: PositionErrorCallback);

    /// Open a continuous subscription.
    fn subscribe(
        &self,
        options: &FixOptions,
        on_fix: FixCallback,
        on_error: PositionErrorCallback,
    ) -> SubscriptionId;

    /// Tear down a subscription. Unknown ids are ignored.
    fn cancel(&self, id: SubscriptionId);
}
