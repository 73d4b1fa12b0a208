//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the current library,
//! selection, playback state and the lyric session of the playing song.

mod model;
mod notice;

pub use model::*;
pub use notice::{Notice, NoticeLevel};

#[cfg(test)]
mod tests;
