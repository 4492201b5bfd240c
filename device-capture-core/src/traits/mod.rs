pub mod clock;
pub mod media_provider;
pub mod position_provider;
pub mod recorder_delegate;
pub mod resource_allocator;
pub mod stream_recorder;
pub mod watch_delegate;
