//! # device-capture-core
//!
//! Platform-agnostic device capture core library.
//!
//! Provides stateful controllers for two device capabilities: geolocation
//! (`PositionWatcher`, one-shot or continuous with throttled publication)
//! and media recording (`CaptureRecorder`, stream acquisition through
//! assembled resource). Platform backends implement the provider traits
//! and plug into the controllers; `device-capture-sim` ships deterministic
//! in-memory backends for tests.
//!
//! ## Architecture
//!
//! ```text
//! device-capture-core (this crate)
//! ├── traits/       ← PositionProvider, MediaProvider, StreamRecorder, ResourceAllocator, Clock, delegates
//! ├── models/       ← CaptureError, SessionPhase, PositionFix, MediaKind, RecordingResult
//! ├── processing/   ← ThrottleWindow (leading-edge publication gate)
//! └── session/      ← PositionWatcher, CaptureRecorder (stateful controllers)
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::error::CaptureError;
pub use models::geo::{Coordinates, FixOptions, PositionFix, WatchConfig, WatchDiagnostics, WatchMode};
pub use models::media::{
    extension_for_mime, MediaKind, RecordingResult, ResourceHandle, StreamConstraints, TrackKind,
};
pub use models::state::SessionPhase;
pub use processing::throttle::{ThrottleWindow, MIN_THROTTLE};
pub use session::recorder::CaptureRecorder;
pub use session::watcher::PositionWatcher;
pub use traits::clock::{Clock, SystemClock};
pub use traits::media_provider::{MediaProvider, MediaStream, MediaTrack};
pub use traits::position_provider::{
    FixCallback, PositionErrorCallback, PositionProvider, SubscriptionId,
};
pub use traits::recorder_delegate::RecorderDelegate;
pub use traits::resource_allocator::ResourceAllocator;
pub use traits::stream_recorder::{ChunkCallback, RecorderFactory, StopCallback, StreamRecorder};
pub use traits::watch_delegate::WatchDelegate;
