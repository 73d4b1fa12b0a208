//! Application model types: `App` and `PlaybackState`.
//!
//! The `App` struct holds the current library, selected track, playback
//! related flags, the lyric session and the notice currently on screen.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::audio::PlaybackHandle;
use crate::library::Track;
use crate::lyrics::worker::LyricJob;
use crate::lyrics::{LyricSession, Report};

use super::notice::{Notice, NoticeLevel};

/// The playback state of the application.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub selected: usize,
    pub playback: PlaybackState,
    pub playback_handle: Option<PlaybackHandle>,

    /// Cursor follows the playing track until the user moves it.
    pub follow_playback: bool,
    pub current_dir: Option<String>,

    pub lyrics: LyricSession,
    pub notice: Option<Notice>,
    notice_ttl: Duration,
}

impl App {
    /// Create a new `App` with the provided list of `tracks`.
    pub fn new(tracks: Vec<Track>, lyrics: LyricSession) -> Self {
        Self {
            tracks,
            selected: 0,
            playback: PlaybackState::Stopped,
            playback_handle: None,
            follow_playback: true,
            current_dir: None,
            lyrics,
            notice: None,
            notice_ttl: Duration::from_secs(3),
        }
    }

    pub fn set_notice_ttl(&mut self, ttl: Duration) {
        self.notice_ttl = ttl;
    }
    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }
    /// Record the current directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }
    /// Return true if the library contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }
    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    pub fn set_selected(&mut self, idx: usize) {
        if idx < self.tracks.len() {
            self.selected = idx;
        }
    }

    /// Move selection to the next track, wrapping.
    pub fn next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.tracks.len();
        }
    }

    /// Move selection to the previous track, wrapping.
    pub fn prev(&mut self) {
        if self.has_tracks() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.tracks.len() - 1);
        }
    }

    /// Snapshot of the audio thread: now-playing index, elapsed, playing.
    pub fn playback_snapshot(&self) -> Option<(Option<usize>, Duration, bool)> {
        let handle = self.playback_handle.as_ref()?;
        let info = handle.lock().ok()?;
        Some((info.index, info.elapsed, info.playing))
    }

    pub fn now_playing(&self) -> Option<&Track> {
        let (index, _, _) = self.playback_snapshot()?;
        index.and_then(|i| self.tracks.get(i))
    }

    /// Bring the lyric session in line with the playing track.
    ///
    /// Returns the load job when a different song started.
    pub fn sync_song(&mut self, now_playing: Option<usize>) -> Option<LyricJob> {
        match now_playing.and_then(|i| self.tracks.get(i)) {
            Some(track) if self.lyrics.song() != Some(track.path.as_path()) => {
                debug!(path = %track.path.display(), "song changed, loading lyrics");
                Some(self.lyrics.begin_song(track.path.clone()))
            }
            Some(_) => None,
            None => {
                if self.lyrics.song().is_some() {
                    self.lyrics.end_song();
                }
                None
            }
        }
    }

    /// Caption for the playing track at `elapsed`.
    pub fn current_caption(&self, elapsed: Duration) -> &str {
        let duration = self.now_playing().map_or(0, Track::duration_secs);
        self.lyrics.caption_at(elapsed.as_secs(), duration)
    }

    pub fn notify(&mut self, text: impl Into<String>, level: NoticeLevel) {
        self.notice = Some(Notice::new(text, level, Instant::now(), self.notice_ttl));
    }

    pub fn report(&mut self, report: Report) {
        self.notice = Some(Notice::from_report(report, Instant::now(), self.notice_ttl));
    }

    /// Drop the notice once its time is up.
    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }
}
