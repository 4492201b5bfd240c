pub mod error;
pub mod geo;
pub mod media;
pub mod state;
