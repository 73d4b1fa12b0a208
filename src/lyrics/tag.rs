//! Tag reader/writer seam.
//!
//! The lyric engine only needs two frame kinds per language: a time-coded
//! frame (binary timestamps) and a plain-text frame. `TagStore` hides how a
//! concrete container stores them.

use std::fmt;
use std::path::Path;

use super::model::Caption;
use crate::error::Result;

/// The two lyric-like frame kinds the engine consumes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameKind {
    TimeCoded,
    PlainText,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::TimeCoded => f.write_str("time-coded lyric"),
            FrameKind::PlainText => f.write_str("plain lyric text"),
        }
    }
}

/// A time-coded lyric frame: descriptor plus `(timestamp, text)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeCodedFrame {
    pub descriptor: String,
    pub captions: Vec<Caption>,
}

/// A plain lyric text frame: descriptor plus the raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainTextFrame {
    pub descriptor: String,
    pub body: String,
}

/// The lyric frames of one opened tag, each list in tag order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub time_coded: Vec<TimeCodedFrame>,
    pub plain: Vec<PlainTextFrame>,
}

/// Reads and rewrites lyric frames of audio files.
pub trait TagStore: Send + Sync {
    /// Open the tag of `path` and decode its lyric frames.
    ///
    /// Fails with `NotTagged` when no tag is present and `FrameType` when a
    /// lyric frame exists but cannot be decoded as its kind.
    fn open_tag(&self, path: &Path) -> Result<Tag>;

    /// Replace the `kind` frame whose descriptor is `language_tag`.
    ///
    /// Plain-text frames receive the captions rendered as inline
    /// time-marker text.
    fn write_frame(
        &self,
        path: &Path,
        kind: FrameKind,
        language_tag: &str,
        captions: &[Caption],
    ) -> Result<()>;
}
