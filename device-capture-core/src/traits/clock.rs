use std::time::Instant;

/// Time source consulted by throttling logic.
///
/// Production code runs on `SystemClock`; tests substitute a hand-advanced
/// clock so window expiry is deterministic.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Monotonic clock backed by `Instant::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
