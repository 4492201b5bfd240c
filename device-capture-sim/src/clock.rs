//! Hand-advanced time source.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

use device_capture_core::traits::clock::Clock;

/// Clock that only moves when told to.
///
/// `now` is a fixed base instant plus the accumulated offset, so a test
/// decides exactly when a throttle window expires.
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Move time forward by `step`.
    pub fn advance(&self, step: Duration) {
        *self.offset.lock() += step;
    }

    /// Jump to an absolute offset from the base instant.
    ///
    /// Lets a test replay a timeline of absolute arrival times without
    /// accumulating deltas.
    pub fn set_offset(&self, offset: Duration) {
        *self.offset.lock() = offset;
    }

    pub fn offset(&self) -> Duration {
        *self.offset.lock()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock()
    }
}
