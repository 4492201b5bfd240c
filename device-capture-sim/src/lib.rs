//! # device-capture-sim
//!
//! Deterministic in-memory backends for device-capture-core.
//!
//! Provides:
//! - `ScriptedPositionProvider`: hand-driven fix and error emission
//! - `SimMediaProvider`: grant/deny media stream acquisition with a request log
//! - `SimRecorderFactory` / `SimStreamRecorder`: hand-driven chunk delivery
//! - `MemoryAllocator`: `mem://` handles over assembled bytes
//! - `ManualClock`: hand-advanced time source for throttle windows
//!
//! Nothing here talks to hardware; every backend does exactly what a test
//! tells it to, when it tells it to.
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use device_capture_core::{PositionWatcher, WatchConfig, WatchMode};
//! use device_capture_sim::{ManualClock, ScriptedPositionProvider};
//!
//! let provider = Arc::new(ScriptedPositionProvider::new());
//! let clock = Arc::new(ManualClock::new());
//! let watcher = PositionWatcher::with_clock(
//!     Arc::clone(&provider),
//!     WatchMode::Continuous,
//!     WatchConfig::default(),
//!     clock.clone(),
//! );
//! watcher.activate();
//! provider.emit_fix(some_fix);
//! ```

pub mod allocator;
pub mod clock;
pub mod media;
pub mod position;
pub mod recorder;

pub use allocator::MemoryAllocator;
pub use clock::ManualClock;
pub use media::{SimMediaProvider, SimMediaStream, SimMediaTrack};
pub use position::ScriptedPositionProvider;
pub use recorder::{SimRecorderFactory, SimStreamRecorder};
