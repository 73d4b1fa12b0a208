//! Lyric data model: captions, per-language tracks and the per-song collection.

/// A single lyric line shown from `timestamp` (milliseconds) onwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub timestamp: u64,
    pub text: String,
}

impl Caption {
    pub fn new(timestamp: u64, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }
}

/// One language's lyrics for one song.
///
/// `offset_ms` is a pending write-time delta: it is baked into the captions
/// when the track is persisted and does not survive a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricTrack {
    pub language_tag: String,
    pub captions: Vec<Caption>,
    pub offset_ms: i64,
}

impl LyricTrack {
    pub fn new(language_tag: impl Into<String>, captions: Vec<Caption>) -> Self {
        Self {
            language_tag: language_tag.into(),
            captions,
            offset_ms: 0,
        }
    }

    pub fn has_lyrics(&self) -> bool {
        !self.captions.is_empty()
    }

    /// Copy of this track with `delta_ms` added to its pending offset.
    pub fn with_offset(&self, delta_ms: i64) -> Self {
        Self {
            offset_ms: self.offset_ms.saturating_add(delta_ms),
            ..self.clone()
        }
    }

    /// Captions with the pending offset applied. Timestamps saturate at zero.
    ///
    /// Lines pushed onto the same timestamp collapse into the last of them,
    /// the one that would actually be on screen.
    pub fn shifted_captions(&self) -> Vec<Caption> {
        let mut shifted: Vec<Caption> = Vec::with_capacity(self.captions.len());
        for c in &self.captions {
            let caption = Caption {
                timestamp: c.timestamp.saturating_add_signed(self.offset_ms),
                text: c.text.clone(),
            };
            match shifted.last_mut() {
                Some(prev) if prev.timestamp == caption.timestamp => *prev = caption,
                _ => shifted.push(caption),
            }
        }
        shifted
    }
}

/// All lyric tracks of the loaded song, in extraction order, unique by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricCollection {
    tracks: Vec<LyricTrack>,
}

impl LyricCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `track`; a track with the same tag is replaced where it stands.
    pub fn insert(&mut self, track: LyricTrack) {
        match self
            .tracks
            .iter_mut()
            .find(|t| t.language_tag == track.language_tag)
        {
            Some(slot) => *slot = track,
            None => self.tracks.push(track),
        }
    }

    pub fn get(&self, language_tag: &str) -> Option<&LyricTrack> {
        self.tracks.iter().find(|t| t.language_tag == language_tag)
    }

    pub fn position(&self, language_tag: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.language_tag == language_tag)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LyricTrack> {
        self.tracks.iter()
    }

    pub fn tracks(&self) -> &[LyricTrack] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn language_tags(&self) -> Vec<&str> {
        self.tracks.iter().map(|t| t.language_tag.as_str()).collect()
    }
}

impl FromIterator<LyricTrack> for LyricCollection {
    fn from_iter<I: IntoIterator<Item = LyricTrack>>(iter: I) -> Self {
        let mut collection = Self::new();
        for track in iter {
            collection.insert(track);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a LyricCollection {
    type Item = &'a LyricTrack;
    type IntoIter = std::slice::Iter<'a, LyricTrack>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
