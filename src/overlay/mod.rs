pub mod config;
pub mod cue;
pub mod delegate;
pub mod engine;
pub mod frame;
pub mod playback;
