//! Cycling through the available lyric languages.

use std::fmt;
use std::path::Path;

use tracing::debug;

use super::extract::extract;
use super::model::LyricCollection;
use super::tag::TagStore;
use crate::error::Result;

/// What a language switch ended up doing, for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    NoLyrics,
    OnlyTrack(String),
    Switched(String),
}

impl fmt::Display for SwitchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchOutcome::NoLyrics => f.write_str("No embedded lyric found"),
            SwitchOutcome::OnlyTrack(tag) => {
                write!(f, "{tag} lyric is the only lyric available")
            }
            SwitchOutcome::Switched(tag) => write!(f, "{tag} lyric switched successfully"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switched {
    pub collection: LyricCollection,
    pub active: Option<String>,
    pub outcome: SwitchOutcome,
}

/// Reload `path` and move to the language after `current`.
///
/// The file is always re-read since an offset commit may have rewritten it.
/// An untagged file is the same as a file without lyrics.
pub fn switch_track(
    store: &dyn TagStore,
    path: &Path,
    current: Option<&str>,
) -> Result<Switched> {
    let collection = match extract(store, path) {
        Ok(c) => c,
        Err(e) if e.is_not_tagged() => LyricCollection::new(),
        Err(e) => return Err(e),
    };

    let (active, outcome) = match collection.len() {
        0 => (None, SwitchOutcome::NoLyrics),
        1 => {
            let tag = collection.tracks()[0].language_tag.clone();
            (Some(tag.clone()), SwitchOutcome::OnlyTrack(tag))
        }
        _ => {
            let idx = next_index(&collection, current);
            let tag = collection.tracks()[idx].language_tag.clone();
            (Some(tag.clone()), SwitchOutcome::Switched(tag))
        }
    };

    debug!(path = %path.display(), ?current, ?active, "switched lyric track");
    Ok(Switched {
        collection,
        active,
        outcome,
    })
}

/// Index after `current`, wrapping; unknown or missing `current` gives 0.
pub fn next_index(collection: &LyricCollection, current: Option<&str>) -> usize {
    if collection.is_empty() {
        return 0;
    }
    match current.and_then(|tag| collection.position(tag)) {
        Some(pos) => (pos + 1) % collection.len(),
        None => 0,
    }
}
