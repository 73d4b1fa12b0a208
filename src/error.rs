use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the lyric pipeline (extraction, persistence, embedding).
///
/// `NotTagged` is benign: callers treat it as "this song has no lyrics".
/// Everything else is surfaced to the user.
#[derive(Debug, Error)]
pub enum LyricError {
    #[error("{} carries no lyric tag", path.display())]
    NotTagged { path: PathBuf },

    #[error("{frame} frame in {} is not decodable: {reason}", path.display())]
    FrameType {
        path: PathBuf,
        frame: &'static str,
        reason: String,
    },

    #[error("failed to write lyrics to {}: {reason}", path.display())]
    Persistence { path: PathBuf, reason: String },

    #[error("failed to read tag from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LyricError {
    /// True when the error only means "no lyrics here".
    pub fn is_not_tagged(&self) -> bool {
        matches!(self, Self::NotTagged { .. })
    }
}

pub type Result<T> = std::result::Result<T, LyricError>;
