//! Real-time caption matching.
//!
//! Caption `i` is shown during `[timestamp[i], timestamp[i + 1])`; the last
//! caption stays up until the end of the song, end included. The query time
//! runs ahead of the playback clock by a lead so lines appear slightly before
//! they are sung.

use super::model::LyricTrack;

/// Display lead applied to the playback position, in milliseconds.
pub const DEFAULT_LEAD_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncEngine {
    lead_ms: u64,
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self {
            lead_ms: DEFAULT_LEAD_MS,
        }
    }
}

impl SyncEngine {
    pub fn new(lead_ms: u64) -> Self {
        Self { lead_ms }
    }

    pub fn lead_ms(&self) -> u64 {
        self.lead_ms
    }

    /// Text visible at `position_secs` of a song lasting `full_duration_secs`.
    ///
    /// A line takes over exactly at its own timestamp. Windows are scanned in
    /// caption order and the earliest match wins.
    /// No track, no captions or a position before the first line all give `""`.
    pub fn active_caption<'a>(
        &self,
        track: Option<&'a LyricTrack>,
        position_secs: u64,
        full_duration_secs: u64,
    ) -> &'a str {
        let Some(track) = track else {
            return "";
        };

        let now = position_secs
            .saturating_mul(1000)
            .saturating_add(self.lead_ms);
        let song_end = full_duration_secs.saturating_mul(1000);

        let captions = &track.captions;
        for (i, caption) in captions.iter().enumerate() {
            let in_window = match captions.get(i + 1) {
                Some(next) => caption.timestamp <= now && now < next.timestamp,
                None => caption.timestamp <= now && now <= song_end,
            };
            if in_window {
                return &caption.text;
            }
        }

        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::model::Caption;

    fn hello_world() -> LyricTrack {
        LyricTrack::new(
            "en",
            vec![Caption::new(0, "Hello"), Caption::new(3000, "World")],
        )
    }

    #[test]
    fn picks_the_caption_whose_window_contains_the_lead_adjusted_time() {
        let engine = SyncEngine::default();
        let track = hello_world();
        assert_eq!(engine.active_caption(Some(&track), 1, 10), "Hello");
    }

    #[test]
    fn next_caption_takes_over_exactly_at_its_timestamp() {
        let engine = SyncEngine::default();
        let track = hello_world();
        assert_eq!(engine.active_caption(Some(&track), 2, 10), "World");

        let engine = SyncEngine::new(999);
        assert_eq!(engine.active_caption(Some(&track), 2, 10), "Hello");
    }

    #[test]
    fn earliest_caption_wins_when_windows_overlap() {
        let engine = SyncEngine::new(0);
        let track = LyricTrack::new(
            "en",
            vec![
                Caption::new(0, "first"),
                Caption::new(4000, "second"),
                Caption::new(2000, "out of order"),
            ],
        );
        assert_eq!(engine.active_caption(Some(&track), 3, 10), "first");
    }

    #[test]
    fn last_caption_lasts_until_end_of_song() {
        let engine = SyncEngine::default();
        let track = hello_world();
        assert_eq!(engine.active_caption(Some(&track), 9, 10), "World");
        assert_eq!(engine.active_caption(Some(&track), 10, 10), "");
    }

    #[test]
    fn nothing_before_the_first_caption() {
        let engine = SyncEngine::default();
        let track = LyricTrack::new("en", vec![Caption::new(5000, "late")]);
        assert_eq!(engine.active_caption(Some(&track), 0, 10), "");
        assert_eq!(engine.active_caption(Some(&track), 4, 10), "late");
    }

    #[test]
    fn missing_or_empty_track_never_fails() {
        let engine = SyncEngine::default();
        let empty = LyricTrack::new("en", Vec::new());
        for pos in [0, 1, 59, u64::MAX] {
            assert_eq!(engine.active_caption(None, pos, 60), "");
            assert_eq!(engine.active_caption(Some(&empty), pos, 60), "");
        }
    }
}
