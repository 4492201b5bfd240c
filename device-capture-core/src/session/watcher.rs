use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::models::error::CaptureError;
use crate::models::geo::{Coordinates, PositionFix, WatchConfig, WatchDiagnostics, WatchMode};
use crate::processing::throttle::ThrottleWindow;
use crate::traits::clock::{Clock, SystemClock};
use crate::traits::position_provider::{
    FixCallback, PositionErrorCallback, PositionProvider, SubscriptionId,
};
use crate::traits::watch_delegate::WatchDelegate;

/// Published watcher state, shared with the provider callbacks.
struct WatcherShared {
    fix: PositionFix,
    error: Option<CaptureError>,
    throttle: ThrottleWindow,
    diagnostics: WatchDiagnostics,
    delegate: Option<Arc<dyn WatchDelegate>>,
}

impl WatcherShared {
    fn new(throttle: ThrottleWindow) -> Self {
        Self {
            fix: PositionFix::default(),
            error: None,
            throttle,
            diagnostics: WatchDiagnostics::default(),
            delegate: None,
        }
    }
}

/// Stateful geolocation controller.
///
/// Construction is inert; `activate` wires the watcher to the provider in
/// the configured mode, exactly once. Continuous mode publishes the first
/// fix of each throttle window and drops the rest; single-shot mode never
/// throttles. Provider errors always publish and leave the window alone.
///
/// ```text
/// [PositionProvider] → fix callback → [ThrottleWindow] → snapshot + delegate
///                    → error callback ─────────────────→ error slot + delegate
/// ```
pub struct PositionWatcher<P: PositionProvider> {
    provider: Arc<P>,
    mode: WatchMode,
    config: WatchConfig,
    clock: Arc<dyn Clock>,
    shared: Arc<Mutex<WatcherShared>>,
    subscription: Mutex<Option<SubscriptionId>>,
    activated: Mutex<bool>,
}

impl<P: PositionProvider> PositionWatcher<P> {
    pub fn new(provider: Arc<P>, mode: WatchMode, config: WatchConfig) -> Self {
        Self::with_clock(provider, mode, config, Arc::new(SystemClock))
    }

    /// Watcher with an explicit time source for the throttle gate.
    pub fn with_clock(
        provider: Arc<P>,
        mode: WatchMode,
        config: WatchConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let throttle = ThrottleWindow::new(config.throttle);
        Self {
            provider,
            mode,
            config,
            clock,
            shared: Arc::new(Mutex::new(WatcherShared::new(throttle))),
            subscription: Mutex::new(None),
            activated: Mutex::new(false),
        }
    }

    pub fn set_delegate(&self, delegate: Arc<dyn WatchDelegate>) {
        self.shared.lock().delegate = Some(delegate);
    }

    /// Wire the watcher to the provider. Repeat calls are no-ops.
    ///
    /// An unavailable provider publishes `UnsupportedCapability` and makes
    /// no provider calls at all.
    pub fn activate(&self) {
        {
            let mut activated = self.activated.lock();
            if *activated {
                return;
            }
            *activated = true;
        }

        if !self.provider.is_available() {
            log::warn!("position provider unavailable");
            Self::publish_error(&self.shared, CaptureError::UnsupportedCapability);
            return;
        }

        let on_fix = self.fix_callback();
        let on_error = Self::error_callback(&self.shared);

        match self.mode {
            WatchMode::SingleShot => {
                log::debug!("requesting single position fix");
                self.provider.request_once(&self.config.options, on_fix, on_error);
            }
            WatchMode::Continuous => {
                let id = self.provider.subscribe(&self.config.options, on_fix, on_error);
                log::debug!("position subscription {:?} open", id);
                *self.subscription.lock() = Some(id);
            }
        }
    }

    /// Latest accepted coordinates; zero-valued until the first fix.
    pub fn coords(&self) -> Coordinates {
        self.shared.lock().fix.coords
    }

    /// Provider timestamp of the latest accepted fix, epoch milliseconds.
    /// Zero until the first fix.
    pub fn timestamp_ms(&self) -> u64 {
        self.shared.lock().fix.timestamp_ms
    }

    /// Latest accepted fix as one snapshot.
    pub fn fix(&self) -> PositionFix {
        self.shared.lock().fix
    }

    /// Most recently published error, if any.
    pub fn last_error(&self) -> Option<CaptureError> {
        self.shared.lock().error.clone()
    }

    pub fn diagnostics(&self) -> WatchDiagnostics {
        self.shared.lock().diagnostics
    }

    pub fn mode(&self) -> WatchMode {
        self.mode
    }

    /// Effective publication window after clamping.
    pub fn throttle_window(&self) -> Duration {
        self.shared.lock().throttle.window()
    }

    /// Whether a continuous subscription is currently open. Single-shot
    /// watchers never hold one.
    pub fn is_active(&self) -> bool {
        self.subscription.lock().is_some()
    }

    /// Cancel the provider subscription, if one is open. Idempotent.
    ///
    /// An in-flight one-shot cannot be cancelled; a late result still
    /// lands in the snapshot.
    pub fn stop(&self) {
        let id = self.subscription.lock().take();
        if let Some(id) = id {
            log::debug!("position subscription {:?} closed", id);
            self.provider.cancel(id);
        }
    }

    fn fix_callback(&self) -> FixCallback {
        let shared = Arc::clone(&self.shared);
        let clock = Arc::clone(&self.clock);
        let mode = self.mode;

        Arc::new(move |fix: PositionFix| {
            let delegate = {
                let mut s = shared.lock();
                s.diagnostics.fixes_received += 1;

                let admitted = match mode {
                    WatchMode::SingleShot => true,
                    WatchMode::Continuous => s.throttle.admit(clock.now()),
                };
                if !admitted {
                    s.diagnostics.fixes_dropped += 1;
                    return;
                }

                s.fix = fix;
                s.diagnostics.fixes_published += 1;
                s.delegate.clone()
            };

            if let Some(delegate) = delegate {
                delegate.on_fix(&fix);
            }
        })
    }

    fn error_callback(shared: &Arc<Mutex<WatcherShared>>) -> PositionErrorCallback {
        let shared = Arc::clone(shared);
        Arc::new(move |error: CaptureError| {
            log::warn!("position error published: {}", error);
            Self::publish_error(&shared, error);
        })
    }

    fn publish_error(shared: &Arc<Mutex<WatcherShared>>, error: CaptureError) {
        let delegate = {
            let mut s = shared.lock();
            s.diagnostics.provider_errors += 1;
            s.error = Some(error.clone());
            s.delegate.clone()
        };

        if let Some(delegate) = delegate {
            delegate.on_error(&error);
        }
    }
}

impl<P: PositionProvider> Drop for PositionWatcher<P> {
    fn drop(&mut self) {
        self.stop();
    }
}
