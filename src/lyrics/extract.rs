//! Build a `LyricCollection` from the lyric frames of an audio file.
//!
//! Each time-coded frame is paired with the plain-text frame carrying the
//! same descriptor. Construction is two-phase: the plain body is parsed as
//! inline time-marker text to get a baseline, then the binary captions of the
//! time-coded frame replace that baseline when they are non-empty.

use std::path::Path;

use tracing::{debug, info};

use super::inline;
use super::model::{Caption, LyricCollection, LyricTrack};
use super::tag::{PlainTextFrame, Tag, TagStore, TimeCodedFrame};
use crate::error::Result;

/// Read `path` through `store` and build one track per paired language.
pub fn extract(store: &dyn TagStore, path: &Path) -> Result<LyricCollection> {
    let tag = store.open_tag(path)?;
    let collection = collect_tracks(&tag);
    info!(
        path = %path.display(),
        languages = ?collection.language_tags(),
        "extracted embedded lyrics"
    );
    Ok(collection)
}

/// Pair frames of an already opened tag.
pub fn collect_tracks(tag: &Tag) -> LyricCollection {
    let mut collection = LyricCollection::new();

    for time_coded in &tag.time_coded {
        let mut paired = false;
        for plain in tag
            .plain
            .iter()
            .filter(|p| p.descriptor == time_coded.descriptor)
        {
            paired = true;
            let captions = reconcile(baseline(plain), time_coded);
            collection.insert(LyricTrack::new(time_coded.descriptor.clone(), captions));
        }

        if !paired {
            debug!(
                descriptor = %time_coded.descriptor,
                "time-coded frame without plain-text partner, skipped"
            );
        }
    }

    collection
}

/// Phase one: captions recovered from inline markers in the plain body.
pub fn baseline(plain: &PlainTextFrame) -> Vec<Caption> {
    inline::parse(&plain.body)
}

/// Phase two: binary captions win whenever the frame carries any.
pub fn reconcile(baseline: Vec<Caption>, time_coded: &TimeCodedFrame) -> Vec<Caption> {
    if time_coded.captions.is_empty() {
        baseline
    } else {
        time_coded.captions.clone()
    }
}
