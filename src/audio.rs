//! Audio playback: a rodio thread driven by `AudioCmd`s.
//!
//! The thread publishes the now-playing index and elapsed time through a
//! shared `PlaybackHandle`, which the UI polls as its playback clock.

mod clock;
mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::{AudioCmd, PlaybackHandle, PlaybackInfo};

#[cfg(test)]
mod tests;
