//! Timing offsets: shift a track, persist it into the file, reload.
//!
//! The shifted track is built as a new value and only handed back once the
//! write and the reload both succeeded. Callers keep their current collection
//! untouched on any failure.

use std::path::Path;

use tracing::{info, warn};

use super::extract::extract;
use super::model::{LyricCollection, LyricTrack};
use super::select::select;
use super::tag::{FrameKind, TagStore};
use crate::error::{LyricError, Result};

/// Result of a committed offset adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    /// Collection freshly extracted after the write.
    pub collection: LyricCollection,
    /// Tag of the track that should be active in `collection`.
    pub active: Option<String>,
}

/// Shift the `language_tag` track of `path` by `delta_ms`, write it back and
/// reload the file.
///
/// The file is the base of every shift, so back-to-back adjustments add up
/// and a sidecar embedded in between is not overwritten by a stale copy.
pub fn adjust(
    store: &dyn TagStore,
    path: &Path,
    language_tag: &str,
    delta_ms: i64,
    preferred: &str,
) -> Result<Committed> {
    let current = extract(store, path)?;
    let base = current
        .get(language_tag)
        .ok_or_else(|| LyricError::Persistence {
            path: path.to_path_buf(),
            reason: format!("no {language_tag} lyric left in the file"),
        })?;

    let pending = base.with_offset(delta_ms);
    if let Err(e) = persist(store, path, &pending) {
        restore_plain_text(store, path, base);
        return Err(e);
    }

    let collection = extract(store, path)?;
    let active = reselect(&collection, language_tag, preferred).map(|t| t.language_tag.clone());

    info!(
        path = %path.display(),
        language_tag,
        delta_ms,
        "committed lyric offset"
    );
    Ok(Committed { collection, active })
}

/// Write both lyric frames of `track` with its pending offset baked in.
///
/// The time-coded frame is authoritative when reloading, so it goes last:
/// once it is written the change is committed.
pub fn persist(store: &dyn TagStore, path: &Path, track: &LyricTrack) -> Result<()> {
    let captions = track.shifted_captions();
    for kind in [FrameKind::PlainText, FrameKind::TimeCoded] {
        store
            .write_frame(path, kind, &track.language_tag, &captions)
            .map_err(|e| {
                warn!(path = %path.display(), %kind, error = %e, "lyric write failed");
                as_persistence(path, e)
            })?;
    }
    Ok(())
}

/// Put the plain-text frame back after the time-coded write failed.
fn restore_plain_text(store: &dyn TagStore, path: &Path, base: &LyricTrack) {
    let restored = store.write_frame(
        path,
        FrameKind::PlainText,
        &base.language_tag,
        &base.captions,
    );
    if let Err(e) = restored {
        warn!(path = %path.display(), error = %e, "could not restore plain-text lyric frame");
    }
}

/// Find the previously active language in a reloaded collection.
///
/// The first track whose tag contains `previous` wins; otherwise the usual
/// preference cascade applies.
pub fn reselect<'a>(
    collection: &'a LyricCollection,
    previous: &str,
    preferred: &str,
) -> Option<&'a LyricTrack> {
    collection
        .iter()
        .find(|t| t.language_tag.contains(previous))
        .or_else(|| select(collection, preferred))
}

fn as_persistence(path: &Path, err: LyricError) -> LyricError {
    match err {
        LyricError::Persistence { .. } => err,
        other => LyricError::Persistence {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}
