//! Embed a sidecar `.lrc` file into the audio file's tag.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use super::extract::extract;
use super::inline;
use super::model::{LyricCollection, LyricTrack};
use super::offset::persist;
use super::tag::TagStore;
use crate::error::{LyricError, Result};

const SIDECAR_EXTENSIONS: &[&str] = &["lrc", "LRC"];

/// Same-stem `.lrc` next to `audio_path`, if present.
pub fn find_sidecar(audio_path: &Path) -> Option<PathBuf> {
    let parent = audio_path.parent()?;
    let stem = audio_path.file_stem()?.to_str()?;

    SIDECAR_EXTENSIONS
        .iter()
        .map(|ext| parent.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
}

/// Parse the sidecar of `audio_path`, store it as `language_tag` and reload.
pub fn embed_sidecar(
    store: &dyn TagStore,
    audio_path: &Path,
    language_tag: &str,
) -> Result<LyricCollection> {
    let sidecar = find_sidecar(audio_path).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no .lrc file next to {}", audio_path.display()),
        )
    })?;

    let captions = inline::parse(&fs::read_to_string(&sidecar)?);
    if captions.is_empty() {
        return Err(LyricError::Persistence {
            path: audio_path.to_path_buf(),
            reason: format!("{} has no timed lines", sidecar.display()),
        });
    }

    let track = LyricTrack::new(language_tag, captions);
    persist(store, audio_path, &track)?;

    info!(
        audio = %audio_path.display(),
        sidecar = %sidecar.display(),
        language_tag,
        lines = track.captions.len(),
        "embedded sidecar lyrics"
    );
    extract(store, audio_path)
}
