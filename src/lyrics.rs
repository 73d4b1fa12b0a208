//! Embedded lyric engine.
//!
//! Lyrics live in the audio file's tag as pairs of frames per language: a
//! time-coded frame and a plain-text frame. This module extracts them into a
//! `LyricCollection`, picks the language to show, matches the playback clock
//! to a caption and writes timing changes back into the file.

pub mod cycle;
pub mod embed;
pub mod extract;
pub mod id3;
pub mod inline;
pub mod model;
pub mod offset;
pub mod select;
pub mod session;
pub mod sync;
pub mod tag;
pub mod worker;

pub use id3::Id3TagStore;
pub use model::{Caption, LyricCollection, LyricTrack};
pub use session::{LyricSession, Report};
pub use sync::{DEFAULT_LEAD_MS, SyncEngine};
pub use tag::{FrameKind, TagStore};
pub use worker::LyricWorker;
