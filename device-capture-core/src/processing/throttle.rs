use std::time::{Duration, Instant};

/// Shortest publication window a caller can request.
pub const MIN_THROTTLE: Duration = Duration::from_millis(500);

/// Leading-edge publication gate for continuous position updates.
///
/// The first fix admitted opens a window; fixes arriving inside an open
/// window are dropped, and the next fix at or past expiry is admitted and
/// opens a fresh window from its own arrival time. Expiry alone never
/// publishes anything retroactively.
#[derive(Debug, Clone)]
pub struct ThrottleWindow {
    window: Duration,
    open_until: Option<Instant>,
}

impl ThrottleWindow {
    /// Gate with the requested window, clamped up to [`MIN_THROTTLE`].
    /// `None` (and zero) mean the floor.
    pub fn new(requested: Option<Duration>) -> Self {
        let window = requested.unwrap_or(MIN_THROTTLE).max(MIN_THROTTLE);
        Self {
            window,
            open_until: None,
        }
    }

    /// Effective window after clamping.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether a fix observed at `now` may be published.
    ///
    /// Admission opens a window ending at `now + window()`; a fix landing
    /// exactly on the boundary is admitted. The first call always admits.
    pub fn admit(&mut self, now: Instant) -> bool {
        match self.open_until {
            Some(until) if now < until => false,
            _ => {
                self.open_until = Some(now + self.window);
                true
            }
        }
    }
}
