use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A geographic reading as reported by the positioning hardware.
///
/// Readings the device cannot produce stay `None`; the zero-valued default
/// is what a watcher exposes before its first fix.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Horizontal accuracy radius in meters.
    pub accuracy: f64,
    /// Meters above the reference ellipsoid.
    pub altitude: Option<f64>,
    pub altitude_accuracy: Option<f64>,
    /// Degrees clockwise from true north.
    pub heading: Option<f64>,
    /// Ground speed in meters per second.
    pub speed: Option<f64>,
}

/// Snapshot of one accepted fix.
///
/// Watchers replace the whole snapshot on every accepted update;
/// `timestamp_ms` is the provider's epoch-millisecond stamp, zero until the
/// first fix lands.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionFix {
    pub coords: Coordinates,
    pub timestamp_ms: u64,
}

/// How a watcher consumes the provider. Fixed for the watcher's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WatchMode {
    /// Resolve one fix (or one error), then done. Never throttled.
    SingleShot,
    /// Subscribe for updates until `stop`; publication is throttled.
    Continuous,
}

/// Options forwarded to the position provider.
///
/// Merged once at watcher construction; the provider sees the same set for
/// the lifetime of the watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixOptions {
    /// Ask the device for its best readings, at a power and latency cost.
    pub high_accuracy: bool,
    /// How long the provider may spend producing a single fix.
    pub timeout: Duration,
    /// Accept a cached fix no older than this; `None` means fresh fixes only.
    pub max_fix_age: Option<Duration>,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            high_accuracy: false,
            timeout: Duration::from_secs(5),
            max_fix_age: None,
        }
    }
}

/// Construction-time configuration for a `PositionWatcher`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatchConfig {
    pub options: FixOptions,
    /// Minimum spacing between published updates in continuous mode.
    /// Requests under the floor (and `None`) clamp up to the floor.
    pub throttle: Option<Duration>,
}

/// Counters describing what a watcher has seen and published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatchDiagnostics {
    /// Fixes delivered by the provider.
    pub fixes_received: u64,
    /// Fixes that passed the throttle gate and replaced the snapshot.
    pub fixes_published: u64,
    /// Fixes dropped inside an open throttle window.
    pub fixes_dropped: u64,
    /// Errors published to the error slot.
    pub provider_errors: u64,
}
