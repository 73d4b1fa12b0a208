//! Per-song lyric state owned by the playback controller.
//!
//! Every song load starts a new generation. Work handed to the lyric worker
//! carries the generation it was issued for, and results from an older
//! generation are dropped instead of being applied to the wrong song.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::model::{LyricCollection, LyricTrack};
use super::select::{preferred_or_default, select};
use super::sync::SyncEngine;
use super::worker::{LyricEvent, LyricEventKind, LyricJob};

/// Something to tell the user after applying a worker result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Info(String),
    Warning(String),
    Error(String),
}

#[derive(Debug)]
pub struct LyricSession {
    song: Option<PathBuf>,
    generation: u64,
    collection: LyricCollection,
    active: Option<String>,
    preferred: String,
    engine: SyncEngine,
}

impl LyricSession {
    pub fn new(preferred: &str, engine: SyncEngine) -> Self {
        Self {
            song: None,
            generation: 0,
            collection: LyricCollection::new(),
            active: None,
            preferred: preferred_or_default(preferred).to_string(),
            engine,
        }
    }

    /// Forget the current song's lyrics and return the load job for `path`.
    pub fn begin_song(&mut self, path: PathBuf) -> LyricJob {
        self.generation += 1;
        self.collection = LyricCollection::new();
        self.active = None;
        self.song = Some(path.clone());
        LyricJob::Load {
            generation: self.generation,
            path,
        }
    }

    /// Playback stopped: drop lyrics and invalidate in-flight work.
    pub fn end_song(&mut self) {
        self.generation += 1;
        self.collection = LyricCollection::new();
        self.active = None;
        self.song = None;
    }

    pub fn song(&self) -> Option<&Path> {
        self.song.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.song.is_some() && self.generation == generation
    }

    pub fn collection(&self) -> &LyricCollection {
        &self.collection
    }

    pub fn active_track(&self) -> Option<&LyricTrack> {
        self.active.as_deref().and_then(|tag| self.collection.get(tag))
    }

    pub fn active_language(&self) -> Option<&str> {
        self.active_track().map(|t| t.language_tag.as_str())
    }

    pub fn preferred(&self) -> &str {
        &self.preferred
    }

    /// Caption to show right now. Never blocks and never fails.
    pub fn caption_at(&self, position_secs: u64, full_duration_secs: u64) -> &str {
        self.engine
            .active_caption(self.active_track(), position_secs, full_duration_secs)
    }

    /// Swap in a new collection and pick the active track by preference.
    pub fn install(&mut self, collection: LyricCollection) {
        let active = select(&collection, &self.preferred).map(|t| t.language_tag.clone());
        self.install_with(collection, active);
    }

    /// Swap in a new collection with an already chosen active track.
    pub fn install_with(&mut self, collection: LyricCollection, active: Option<String>) {
        self.active = active.filter(|tag| collection.get(tag).is_some());
        self.collection = collection;
    }

    pub fn switch_job(&self) -> Option<LyricJob> {
        let path = self.song.clone()?;
        Some(LyricJob::Switch {
            generation: self.generation,
            path,
            current: self.active.clone(),
        })
    }

    /// Job shifting the active track by `delta_ms`; `None` without an active track.
    ///
    /// Only the language is captured: the worker shifts whatever the file
    /// holds when the job runs, so queued adjustments accumulate.
    pub fn adjust_job(&self, delta_ms: i64) -> Option<LyricJob> {
        let path = self.song.clone()?;
        let language_tag = self.active_track()?.language_tag.clone();
        Some(LyricJob::Adjust {
            generation: self.generation,
            path,
            language_tag,
            delta_ms,
            preferred: self.preferred.clone(),
        })
    }

    pub fn embed_job(&self) -> Option<LyricJob> {
        let path = self.song.clone()?;
        Some(LyricJob::Embed {
            generation: self.generation,
            path,
            language_tag: self.preferred.clone(),
        })
    }

    /// Apply a worker result if it still belongs to the current song.
    pub fn apply(&mut self, event: LyricEvent) -> Option<Report> {
        if !self.is_current(event.generation) {
            debug!(
                generation = event.generation,
                current = self.generation,
                "discarding stale lyric result"
            );
            return None;
        }

        match event.kind {
            LyricEventKind::Loaded(Ok(collection)) => {
                self.install(collection);
                None
            }
            LyricEventKind::Loaded(Err(e)) if e.is_not_tagged() => {
                self.install(LyricCollection::new());
                None
            }
            LyricEventKind::Loaded(Err(e)) => {
                self.install(LyricCollection::new());
                Some(Report::Error(e.to_string()))
            }
            LyricEventKind::Switched(Ok(switched)) => {
                let report = match switched.active {
                    Some(_) if switched.collection.len() > 1 => {
                        Report::Info(switched.outcome.to_string())
                    }
                    _ => Report::Warning(switched.outcome.to_string()),
                };
                self.install_with(switched.collection, switched.active);
                Some(report)
            }
            LyricEventKind::Switched(Err(e)) => Some(Report::Error(e.to_string())),
            LyricEventKind::Adjusted {
                delta_ms,
                result: Ok(committed),
            } => {
                self.install_with(committed.collection, committed.active);
                Some(Report::Info(format!("lyric timing shifted by {delta_ms:+}ms")))
            }
            LyricEventKind::Adjusted { result: Err(e), .. } => {
                Some(Report::Error(e.to_string()))
            }
            LyricEventKind::Embedded {
                language_tag,
                result: Ok(collection),
            } => {
                self.install_with(collection, Some(language_tag.clone()));
                Some(Report::Info(format!("embedded {language_tag} lyric")))
            }
            LyricEventKind::Embedded { result: Err(e), .. } => Some(Report::Error(e.to_string())),
        }
    }
}
