//! Scripted positioning backend.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use device_capture_core::models::error::CaptureError;
use device_capture_core::models::geo::{FixOptions, PositionFix};
use device_capture_core::traits::position_provider::{
    FixCallback, PositionErrorCallback, PositionProvider, SubscriptionId,
};

struct Watch {
    on_fix: FixCallback,
    on_error: PositionErrorCallback,
}

/// Position provider that emits only what a test scripts.
///
/// `emit_fix` / `emit_error` broadcast to every open subscription and
/// resolve every pending one-shot request. Callbacks run on the caller's
/// thread, serially, matching the contract real platforms give.
pub struct ScriptedPositionProvider {
    available: Mutex<bool>,
    next_id: Mutex<u64>,
    watches: Mutex<HashMap<u64, Watch>>,
    pending_once: Mutex<Vec<Watch>>,
    last_options: Mutex<Option<FixOptions>>,
}

impl ScriptedPositionProvider {
    pub fn new() -> Self {
        Self {
            available: Mutex::new(true),
            next_id: Mutex::new(1),
            watches: Mutex::new(HashMap::new()),
            pending_once: Mutex::new(Vec::new()),
            last_options: Mutex::new(None),
        }
    }

    /// Provider that reports no positioning hardware.
    pub fn unavailable() -> Self {
        let provider = Self::new();
        *provider.available.lock() = false;
        provider
    }

    /// Deliver a fix to every open subscription and pending one-shot.
    pub fn emit_fix(&self, fix: PositionFix) {
        // Clone the callbacks out before invoking anything, so a callback
        // is free to call back into the provider (e.g. cancel).
        let callbacks: Vec<FixCallback> = self
            .watches
            .lock()
            .values()
            .map(|w| Arc::clone(&w.on_fix))
            .collect();
        let pending: Vec<Watch> = self.pending_once.lock().drain(..).collect();

        for on_fix in callbacks {
            on_fix(fix);
        }
        for watch in pending {
            (watch.on_fix)(fix);
        }
    }

    /// Deliver a platform failure to every open subscription and pending
    /// one-shot.
    pub fn emit_error(&self, code: Option<u16>, message: &str) {
        let error = CaptureError::provider(code, message);
        log::debug!("scripted position error: {}", error);

        let callbacks: Vec<PositionErrorCallback> = self
            .watches
            .lock()
            .values()
            .map(|w| Arc::clone(&w.on_error))
            .collect();
        let pending: Vec<Watch> = self.pending_once.lock().drain(..).collect();

        for on_error in callbacks {
            on_error(error.clone());
        }
        for watch in pending {
            (watch.on_error)(error.clone());
        }
    }

    /// Number of open subscriptions.
    pub fn active_watches(&self) -> usize {
        self.watches.lock().len()
    }

    /// Number of one-shot requests awaiting resolution.
    pub fn pending_one_shots(&self) -> usize {
        self.pending_once.lock().len()
    }

    /// Options seen by the most recent `request_once` or `subscribe`.
    pub fn last_options(&self) -> Option<FixOptions> {
        *self.last_options.lock()
    }
}

impl Default for ScriptedPositionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionProvider for ScriptedPositionProvider {
    fn is_available(&self) -> bool {
        *self.available.lock()
    }

    fn request_once(&self, options: &FixOptions, on_fix: FixCallback, on_error: PositionErrorCallback) {
        *self.last_options.lock() = Some(*options);
        self.pending_once.lock().push(Watch { on_fix, on_error });
    }

    fn subscribe(
        &self,
        options: &FixOptions,
        on_fix: FixCallback,
        on_error: PositionErrorCallback,
    ) -> SubscriptionId {
        *self.last_options.lock() = Some(*options);

        let id = {
            let mut next = self.next_id.lock();
            let id = *next;
            *next += 1;
            id
        };
        self.watches.lock().insert(id, Watch { on_fix, on_error });
        log::debug!("scripted subscription {} open", id);
        SubscriptionId(id)
    }

    fn cancel(&self, id: SubscriptionId) {
        if self.watches.lock().remove(&id.0).is_some() {
            log::debug!("scripted subscription {} cancelled", id.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_callbacks() -> (Arc<AtomicUsize>, FixCallback, PositionErrorCallback) {
        let fixes = Arc::new(AtomicUsize::new(0));
        let on_fix = {
            let fixes = Arc::clone(&fixes);
            Arc::new(move |_fix: PositionFix| {
                fixes.fetch_add(1, Ordering::SeqCst);
            }) as FixCallback
        };
        let on_error = Arc::new(|_err: CaptureError| {}) as PositionErrorCallback;
        (fixes, on_fix, on_error)
    }

    #[test]
    fn broadcast_reaches_open_subscriptions() {
        let provider = ScriptedPositionProvider::new();
        let (fixes, on_fix, on_error) = counting_callbacks();

        let id = provider.subscribe(&FixOptions::default(), on_fix, on_error);
        provider.emit_fix(PositionFix::default());
        provider.emit_fix(PositionFix::default());
        assert_eq!(fixes.load(Ordering::SeqCst), 2);

        provider.cancel(id);
        provider.emit_fix(PositionFix::default());
        assert_eq!(fixes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn cancel_unknown_id_is_ignored() {
        let provider = ScriptedPositionProvider::new();
        provider.cancel(SubscriptionId(42));
        assert_eq!(provider.active_watches(), 0);
    }

    #[test]
    fn one_shots_resolve_exactly_once() {
        let provider = ScriptedPositionProvider::new();
        let (fixes, on_fix, on_error) = counting_callbacks();

        provider.request_once(&FixOptions::default(), on_fix, on_error);
        assert_eq!(provider.pending_one_shots(), 1);

        provider.emit_fix(PositionFix::default());
        provider.emit_fix(PositionFix::default());
        assert_eq!(fixes.load(Ordering::SeqCst), 1);
        assert_eq!(provider.pending_one_shots(), 0);
    }

    #[test]
    fn records_last_seen_options() {
        let provider = ScriptedPositionProvider::new();
        let (_fixes, on_fix, on_error) = counting_callbacks();

        let options = FixOptions {
            high_accuracy: true,
            ..FixOptions::default()
        };
        provider.subscribe(&options, on_fix, on_error);
        assert_eq!(provider.last_options(), Some(options));
    }
}
