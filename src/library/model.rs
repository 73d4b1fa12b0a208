use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub duration: Option<Duration>,
    pub display: String,
}

impl Track {
    /// Build a track, deriving `display` as "Artist - Title" (or just the title).
    pub fn new(
        path: PathBuf,
        title: String,
        artist: Option<String>,
        duration: Option<Duration>,
    ) -> Self {
        let display = match artist.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => format!("{} - {}", a, title.trim()),
            _ => title.trim().to_string(),
        };
        Self {
            path,
            title,
            artist,
            duration,
            display,
        }
    }

    /// Whole seconds of the track, 0 when unknown.
    pub fn duration_secs(&self) -> u64 {
        self.duration.map_or(0, |d| d.as_secs())
    }
}
