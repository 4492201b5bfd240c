pub mod recorder;
pub mod watcher;
